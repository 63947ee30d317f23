use serde::{Deserialize, Serialize};

pub mod austin;

/// Coarse landmark class; drives shape and material selection downstream.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandmarkKind {
    Building,
    Park,
    Water,
    District,
}

impl LandmarkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LandmarkKind::Building => "building",
            LandmarkKind::Park => "park",
            LandmarkKind::Water => "water",
            LandmarkKind::District => "district",
        }
    }
}

/// One point of interest on the map.
///
/// Records are defined at load time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    /// World coordinates `[x, y, z]`.
    pub position: [f64; 3],
    #[serde(rename = "type")]
    pub kind: LandmarkKind,
    /// `[width, height, depth]`; defaults apply when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<[f64; 3]>,
    /// Display color as `#rrggbb`; a per-kind fallback applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl LandmarkRecord {
    /// Extent assumed per axis when a record carries no explicit scale.
    pub const DEFAULT_EXTENT: f64 = 5.0;

    pub fn scale_or_default(&self) -> [f64; 3] {
        self.scale.unwrap_or([Self::DEFAULT_EXTENT; 3])
    }

    pub fn height(&self) -> f64 {
        self.scale_or_default()[1]
    }

    /// Largest scale component; the camera framing distance derives from it.
    pub fn max_extent(&self) -> f64 {
        let [w, h, d] = self.scale_or_default();
        w.max(h).max(d)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    DuplicateId(String),
    Parse(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::DuplicateId(id) => write!(f, "duplicate landmark id: {id}"),
            CatalogError::Parse(msg) => write!(f, "catalog parse error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Validated, read-only landmark list.
///
/// Invariant: ids are unique. Iteration order is the authored order of
/// the records, which downstream code relies on for stable entity
/// indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LandmarkRecord>", into = "Vec<LandmarkRecord>")]
pub struct Catalog {
    records: Vec<LandmarkRecord>,
}

impl Catalog {
    pub fn new(records: Vec<LandmarkRecord>) -> Result<Self, CatalogError> {
        {
            let mut seen = std::collections::HashSet::new();
            for record in &records {
                if !seen.insert(record.id.as_str()) {
                    return Err(CatalogError::DuplicateId(record.id.clone()));
                }
            }
        }
        Ok(Self { records })
    }

    /// Load a catalog from a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<LandmarkRecord> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(records)
    }

    pub fn records(&self) -> &[LandmarkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&LandmarkRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}

impl TryFrom<Vec<LandmarkRecord>> for Catalog {
    type Error = CatalogError;

    fn try_from(records: Vec<LandmarkRecord>) -> Result<Self, Self::Error> {
        Self::new(records)
    }
}

impl From<Catalog> for Vec<LandmarkRecord> {
    fn from(catalog: Catalog) -> Self {
        catalog.records
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, CatalogError, LandmarkKind, LandmarkRecord};
    use pretty_assertions::assert_eq;

    fn record(id: &str) -> LandmarkRecord {
        LandmarkRecord {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: String::new(),
            position: [0.0, 0.0, 0.0],
            kind: LandmarkKind::Building,
            scale: None,
            color: None,
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new(vec![record("a"), record("b"), record("a")]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId("a".to_string()));
    }

    #[test]
    fn lookup_by_id_and_index() {
        let catalog = Catalog::new(vec![record("a"), record("b")]).unwrap();
        assert_eq!(catalog.get("b").unwrap().name, "B");
        assert_eq!(catalog.index_of("b"), Some(1));
        assert_eq!(catalog.get("missing"), None);
    }

    #[test]
    fn scale_defaults_apply_when_absent() {
        let r = record("a");
        assert_eq!(r.scale_or_default(), [5.0, 5.0, 5.0]);
        assert_eq!(r.max_extent(), 5.0);

        let mut tall = record("b");
        tall.scale = Some([2.0, 12.0, 2.0]);
        assert_eq!(tall.max_extent(), 12.0);
        assert_eq!(tall.height(), 12.0);
    }

    #[test]
    fn parses_records_from_json() {
        let json = r##"[
            {
                "id": "frost-tower",
                "name": "Frost Bank Tower",
                "description": "One of the most recognizable skyscrapers in Austin.",
                "position": [4.0, 0.0, 2.0],
                "type": "building",
                "scale": [2.0, 12.0, 2.0],
                "color": "#A5B4FC"
            },
            {
                "id": "lady-bird-lake",
                "name": "Lady Bird Lake",
                "description": "A river-like reservoir on the Colorado River.",
                "position": [0.0, -0.5, 30.0],
                "type": "water"
            }
        ]"##;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("lady-bird-lake").unwrap().kind, LandmarkKind::Water);
        assert_eq!(catalog.get("lady-bird-lake").unwrap().scale, None);
    }

    #[test]
    fn duplicate_ids_fail_json_load_too() {
        let json = r#"[
            {"id": "x", "name": "X", "description": "", "position": [0,0,0], "type": "park"},
            {"id": "x", "name": "X2", "description": "", "position": [1,0,1], "type": "park"}
        ]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::DuplicateId(_))
        ));
    }
}
