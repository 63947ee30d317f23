use catalog::{Catalog, LandmarkRecord};
use runtime::Frame;

use crate::World;
use crate::entity::EntityId;

/// Vertical bob amplitude while selected (world units).
pub const BOB_AMPLITUDE: f64 = 0.5;

/// Bob angular frequency (radians per second of session time).
pub const BOB_FREQUENCY: f64 = 2.0;

/// Spin rate about +Y while selected (radians per second).
pub const SPIN_RATE: f64 = 0.5;

/// Exponential return-to-rest rate when deselected (per second).
const RELAX_RATE: f64 = 6.0;

/// Resting center height of a landmark's primary mesh.
pub fn resting_height(record: &LandmarkRecord) -> f64 {
    record.position[1] + record.height() / 2.0
}

/// Per-frame landmark animation pass.
///
/// The selected landmark bobs on a sine of session time and spins
/// about its vertical axis; every other landmark relaxes exponentially
/// back to its resting pose. Runs once per rendered frame.
pub fn animate_landmarks(
    world: &mut World,
    catalog: &Catalog,
    frame: Frame,
    selected: Option<EntityId>,
) {
    for (entity, landmark) in world.landmark_entities() {
        let Some(record) = catalog.records().get(landmark.index) else {
            continue;
        };
        let rest_y = resting_height(record);
        let Some(transform) = world.transform_mut(entity) else {
            continue;
        };

        if selected == Some(entity) {
            transform.position.y =
                rest_y + (frame.time.0 * BOB_FREQUENCY).sin() * BOB_AMPLITUDE;
            transform.yaw_rad += frame.dt_s * SPIN_RATE;
        } else {
            let alpha = 1.0 - (-RELAX_RATE * frame.dt_s).exp();
            transform.position.y += (rest_y - transform.position.y) * alpha;
            let yaw = wrap_angle(transform.yaw_rad);
            transform.yaw_rad = yaw * (1.0 - alpha);
        }
    }
}

/// Wrap an angle into `(-pi, pi]` so the relax path takes the short way
/// around instead of unwinding accumulated spin turns.
fn wrap_angle(a: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    let mut wrapped = a % TAU;
    if wrapped > PI {
        wrapped -= TAU;
    } else if wrapped <= -PI {
        wrapped += TAU;
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::{BOB_AMPLITUDE, SPIN_RATE, animate_landmarks, resting_height, wrap_angle};
    use crate::World;
    use crate::components::{Drawable3D, LandmarkRef, Material, Transform};
    use catalog::{Catalog, LandmarkKind, LandmarkRecord};
    use foundation::color::Rgba;
    use foundation::math::Vec3;
    use runtime::Frame;

    fn one_record_catalog() -> Catalog {
        Catalog::new(vec![LandmarkRecord {
            id: "tower".to_string(),
            name: "Tower".to_string(),
            description: String::new(),
            position: [3.0, 0.0, -2.0],
            kind: LandmarkKind::Building,
            scale: Some([2.0, 4.0, 2.0]),
            color: None,
        }])
        .unwrap()
    }

    fn spawn(world: &mut World, rest_y: f64) -> crate::entity::EntityId {
        let entity = world.spawn();
        world.set_transform(entity, Transform::translate(Vec3::new(3.0, rest_y, -2.0)));
        world.set_drawable_3d(
            entity,
            Drawable3D::boxy(2.0, 4.0, 2.0, Material::matte(Rgba::WHITE)),
        );
        world.set_landmark_ref(entity, LandmarkRef::new(0));
        entity
    }

    #[test]
    fn selected_landmark_bobs_on_session_time() {
        let catalog = one_record_catalog();
        let rest = resting_height(&catalog.records()[0]);
        let mut world = World::new();
        let entity = spawn(&mut world, rest);

        // sin(2t) == 1 at t = pi/4, so the bob sits at full amplitude.
        let frame = Frame::at_time(0, 1.0 / 60.0, std::f64::consts::FRAC_PI_4);
        animate_landmarks(&mut world, &catalog, frame, Some(entity));

        let y = world.transform(entity).unwrap().position.y;
        assert!((y - (rest + BOB_AMPLITUDE)).abs() < 1e-9);
    }

    #[test]
    fn selected_landmark_spins_by_dt() {
        let catalog = one_record_catalog();
        let rest = resting_height(&catalog.records()[0]);
        let mut world = World::new();
        let entity = spawn(&mut world, rest);

        let frame = Frame::new(0, 0.1);
        animate_landmarks(&mut world, &catalog, frame, Some(entity));
        animate_landmarks(&mut world, &catalog, frame.next(), Some(entity));

        let yaw = world.transform(entity).unwrap().yaw_rad;
        assert!((yaw - 2.0 * 0.1 * SPIN_RATE).abs() < 1e-12);
    }

    #[test]
    fn deselected_landmark_relaxes_to_rest() {
        let catalog = one_record_catalog();
        let rest = resting_height(&catalog.records()[0]);
        let mut world = World::new();
        let entity = spawn(&mut world, rest);

        // Displace as if it had been bobbing, then let it settle.
        world.transform_mut(entity).unwrap().position.y = rest + BOB_AMPLITUDE;
        world.transform_mut(entity).unwrap().yaw_rad = 1.2;

        let mut frame = Frame::new(0, 1.0 / 60.0);
        let mut last_gap = BOB_AMPLITUDE;
        for _ in 0..30 {
            animate_landmarks(&mut world, &catalog, frame, None);
            let gap = (world.transform(entity).unwrap().position.y - rest).abs();
            assert!(gap < last_gap);
            last_gap = gap;
            frame = frame.next();
        }

        for _ in 0..300 {
            animate_landmarks(&mut world, &catalog, frame, None);
            frame = frame.next();
        }
        let transform = world.transform(entity).unwrap();
        assert!((transform.position.y - rest).abs() < 1e-3);
        assert!(transform.yaw_rad.abs() < 1e-3);
    }

    #[test]
    fn relax_takes_short_way_around_full_turns() {
        // Ten radians of accumulated spin is just over one and a half
        // turns; the wrapped angle is the small negative remainder.
        let two_turns = 2.0 * std::f64::consts::TAU;
        assert!((wrap_angle(10.0) - (10.0 - two_turns)).abs() < 1e-9);
        assert!(wrap_angle(10.0).abs() <= std::f64::consts::PI);
        assert_eq!(wrap_angle(0.0), 0.0);
    }
}
