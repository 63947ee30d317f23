use catalog::{LandmarkKind, LandmarkRecord};
use foundation::color::Rgba;
use foundation::math::Vec3;

use crate::World;
use crate::components::{
    ComponentBounds, Drawable3D, Label, LandmarkRef, Material, Shape3D, Transform,
};
use crate::entity::EntityId;

/// Hover highlight color.
const HOVER_COLOR: Rgba = Rgba::WHITE;

/// Emissive glow intensity while selected.
const SELECTED_EMISSIVE_INTENSITY: f32 = 0.5;

/// Capitol rotunda proportions.
const ROTUNDA_TOP_RADIUS: f64 = 2.0;
const ROTUNDA_BOTTOM_RADIUS: f64 = 3.0;
const ROTUNDA_SEGMENTS: u32 = 8;
const DOME_RADIUS: f64 = 1.5;
const DOME_LIFT: f64 = 1.0;

/// Label clearance above a landmark's top.
const LABEL_CLEARANCE: f64 = 2.0;

/// Display color for records that carry none.
pub fn fallback_color(kind: LandmarkKind) -> Rgba {
    match kind {
        LandmarkKind::Building => Rgba::rgb(0.61, 0.64, 0.69),
        LandmarkKind::Park => Rgba::rgb(0.06, 0.73, 0.51),
        LandmarkKind::Water => Rgba::rgb(0.23, 0.51, 0.96),
        LandmarkKind::District => Rgba::rgb(0.96, 0.62, 0.04),
    }
}

pub fn record_color(record: &LandmarkRecord) -> Rgba {
    record
        .color
        .as_deref()
        .and_then(Rgba::from_hex)
        .unwrap_or_else(|| fallback_color(record.kind))
}

/// Shape policy: the capitol renders as a rotunda-like cylinder,
/// everything else (parks included) as a box sized by the record.
pub fn primary_shape(record: &LandmarkRecord) -> Shape3D {
    let [width, height, depth] = record.scale_or_default();
    if record.id == "capitol" {
        Shape3D::Cylinder {
            top_radius: ROTUNDA_TOP_RADIUS,
            bottom_radius: ROTUNDA_BOTTOM_RADIUS,
            height,
            radial_segments: ROTUNDA_SEGMENTS,
        }
    } else {
        Shape3D::Box {
            width,
            height,
            depth,
        }
    }
}

/// Resting-state surface for a record; water gets the glossy
/// translucent treatment.
pub fn base_material(record: &LandmarkRecord) -> Material {
    let color = record_color(record);
    match record.kind {
        LandmarkKind::Water => Material::water(color),
        _ => Material::matte(color),
    }
}

/// Material with hover/selection state applied: hover overrides the
/// color with the highlight, selection adds the emissive glow.
pub fn display_material(record: &LandmarkRecord, hovered: bool, selected: bool) -> Material {
    let base = base_material(record);
    let material = if hovered {
        base.with_color(HOVER_COLOR)
    } else {
        base
    };
    if selected {
        material.with_emissive(record_color(record), SELECTED_EMISSIVE_INTENSITY)
    } else {
        material
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LandmarkEntities {
    pub primary: EntityId,
    /// Capitol dome; decorative only, never pickable.
    pub ornament: Option<EntityId>,
}

/// Spawn the drawable(s) for one catalog record.
///
/// Exactly one primary, pickable drawable per record; the capitol
/// additionally gets its dome ornament.
pub fn spawn_landmark(world: &mut World, index: usize, record: &LandmarkRecord) -> LandmarkEntities {
    let [x, y, z] = record.position;
    let height = record.height();
    let center = Vec3::new(x, y + height / 2.0, z);
    let shape = primary_shape(record);

    let primary = world.spawn();
    world.set_transform(primary, Transform::translate(center));
    world.set_drawable_3d(
        primary,
        Drawable3D {
            shape,
            material: base_material(record),
        },
    );
    world.set_bounds(
        primary,
        ComponentBounds::from_center_half_extents(center, shape.half_extents()),
    );
    world.set_label(
        primary,
        Label::new(
            record.name.clone(),
            Vec3::new(x, y + height + LABEL_CLEARANCE, z),
        ),
    );
    world.set_landmark_ref(primary, LandmarkRef::new(index));

    let ornament = (record.id == "capitol").then(|| {
        let dome = world.spawn();
        world.set_transform(
            dome,
            Transform::translate(Vec3::new(x, y + height + DOME_LIFT, z)),
        );
        world.set_drawable_3d(
            dome,
            Drawable3D::sphere(DOME_RADIUS, Material::matte(record_color(record))),
        );
        dome
    });

    LandmarkEntities { primary, ornament }
}
