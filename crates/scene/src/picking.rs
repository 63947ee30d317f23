use foundation::math::Vec3;
use foundation::math::precision::stable_total_cmp_f64;

use crate::World;
use crate::components::ComponentBounds;
use crate::entity::EntityId;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub entity: EntityId,
    /// Catalog index of the picked landmark.
    pub landmark_index: usize,
    pub distance: f64,
    pub point: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    pub max_distance: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            max_distance: 1.0e30,
        }
    }
}

/// Deterministic ray picking over landmark entities.
///
/// Only entities carrying a `LandmarkRef` participate, so decorative
/// geometry (ground plane, ornaments) never swallows a click. The
/// topmost hit wins and there is nothing to propagate past it.
///
/// Ordering contract:
/// - The closest hit along the (normalized) ray wins.
/// - At equal distance, the lower `EntityId::index()` wins.
pub fn pick_ray(world: &World, ray: Ray, opts: PickOptions) -> Option<PickHit> {
    let dir = ray.dir.normalized()?;

    let mut best: Option<(f64, EntityId, usize)> = None;

    for (entity, landmark) in world.landmark_entities() {
        let Some(bounds) = world.bounds(entity) else {
            continue;
        };
        let Some(t) = ray_aabb_hit_t(ray.origin, dir, bounds, 0.0, opts.max_distance) else {
            continue;
        };

        best = match best {
            None => Some((t, entity, landmark.index)),
            Some((bt, be, bi)) => {
                let ord = stable_total_cmp_f64(t, bt).then_with(|| entity.index().cmp(&be.index()));
                if ord.is_lt() {
                    Some((t, entity, landmark.index))
                } else {
                    Some((bt, be, bi))
                }
            }
        };
    }

    let (t, entity, landmark_index) = best?;
    Some(PickHit {
        entity,
        landmark_index,
        distance: t,
        point: ray.origin + dir.scale(t),
    })
}

fn ray_aabb_hit_t(
    origin: Vec3,
    dir: Vec3,
    bounds: ComponentBounds,
    mut t_min: f64,
    mut t_max: f64,
) -> Option<f64> {
    // Slabs intersection; returns entry distance.
    let origin = [origin.x, origin.y, origin.z];
    let dir = [dir.x, dir.y, dir.z];
    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        let (min, max) = match axis {
            0 => (bounds.min.x, bounds.max.x),
            1 => (bounds.min.y, bounds.max.y),
            _ => (bounds.min.z, bounds.max.z),
        };

        if d.abs() < 1e-12 {
            if o < min || o > max {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t1 = (min - o) * inv;
        let mut t2 = (max - o) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_max < t_min {
            return None;
        }
    }

    Some(t_min.max(0.0))
}
