//! Built-in Austin, Texas dataset.
//!
//! Approximate relative positions for a stylized downtown map; the
//! origin is roughly the Capitol grounds.

use crate::{Catalog, LandmarkKind, LandmarkRecord};

fn record(
    id: &str,
    name: &str,
    description: &str,
    position: [f64; 3],
    kind: LandmarkKind,
    scale: [f64; 3],
    color: &str,
) -> LandmarkRecord {
    LandmarkRecord {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        position,
        kind,
        scale: Some(scale),
        color: Some(color.to_string()),
    }
}

/// The ten landmarks of the stylized Austin map.
pub fn austin_landmarks() -> Catalog {
    let records = vec![
        record(
            "capitol",
            "Texas State Capitol",
            "The seat of government of the American state of Texas.",
            [0.0, 0.0, -10.0],
            LandmarkKind::Building,
            [4.0, 6.0, 4.0],
            "#E57373",
        ),
        record(
            "ut-austin",
            "UT Austin",
            "The University of Texas at Austin campus.",
            [0.0, 0.0, -35.0],
            LandmarkKind::District,
            [12.0, 1.0, 12.0],
            "#BF5700",
        ),
        record(
            "congress-ave",
            "Congress Avenue",
            "The main street of downtown Austin.",
            [0.0, 0.1, 10.0],
            LandmarkKind::District,
            [2.0, 0.2, 40.0],
            "#9CA3AF",
        ),
        record(
            "lady-bird-lake",
            "Lady Bird Lake",
            "A river-like reservoir on the Colorado River.",
            [0.0, -0.5, 30.0],
            LandmarkKind::Water,
            [100.0, 1.0, 15.0],
            "#3B82F6",
        ),
        record(
            "zilker",
            "Zilker Park",
            "Austin's most popular metropolitan park.",
            [-35.0, 0.0, 35.0],
            LandmarkKind::Park,
            [25.0, 0.5, 20.0],
            "#10B981",
        ),
        record(
            "dirty-6th",
            "6th Street",
            "Historic street famous for its nightlife.",
            [10.0, 0.0, 5.0],
            LandmarkKind::District,
            [15.0, 0.5, 2.0],
            "#F59E0B",
        ),
        record(
            "rainey",
            "Rainey Street",
            "A historic district with bungalow style houses turned into bars.",
            [12.0, 0.0, 25.0],
            LandmarkKind::District,
            [6.0, 0.5, 8.0],
            "#8B5CF6",
        ),
        record(
            "soco",
            "South Congress",
            "A vibrant neighborhood known for its boutiques and eateries.",
            [0.0, 0.0, 55.0],
            LandmarkKind::District,
            [4.0, 1.0, 20.0],
            "#EC4899",
        ),
        record(
            "frost-tower",
            "Frost Bank Tower",
            "One of the most recognizable skyscrapers in Austin.",
            [4.0, 0.0, 2.0],
            LandmarkKind::Building,
            [2.0, 12.0, 2.0],
            "#A5B4FC",
        ),
        record(
            "moody-center",
            "Moody Center",
            "Multi-purpose arena on the UT campus.",
            [5.0, 0.0, -25.0],
            LandmarkKind::Building,
            [6.0, 3.0, 6.0],
            "#FCD34D",
        ),
    ];

    // The authored list has unique ids; a failure here is a programming
    // error in this module, not a runtime condition.
    Catalog::new(records).expect("built-in catalog is valid")
}
