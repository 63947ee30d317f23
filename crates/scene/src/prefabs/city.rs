use catalog::Catalog;
use foundation::color::Rgba;
use foundation::math::Vec3;

use crate::World;
use crate::components::{Drawable3D, Material, Transform};
use crate::prefabs::landmark::{LandmarkEntities, spawn_landmark};

const GROUND_SIZE: f64 = 500.0;
const GROUND_HEIGHT: f64 = -0.2;

/// Shadow-casting key light.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub intensity: f32,
    pub shadow_map_size: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fog {
    pub color: Rgba,
    pub near: f64,
    pub far: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroundGrid {
    pub size: f64,
    pub height: f64,
    pub cell_color: Rgba,
    pub section_color: Rgba,
    pub fade_distance: f64,
}

/// Decorative night-sky points.
#[derive(Debug, Clone, PartialEq)]
pub struct Starfield {
    pub radius: f64,
    pub depth: f64,
    pub count: u32,
}

/// Scene-level description consumed by the external renderer: lights,
/// fog, grid, and starfield are not entities.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub ambient_intensity: f32,
    pub directional: DirectionalLight,
    pub fog: Fog,
    pub grid: GroundGrid,
    pub starfield: Starfield,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.4,
            directional: DirectionalLight {
                position: Vec3::new(50.0, 50.0, 25.0),
                intensity: 1.0,
                shadow_map_size: 1024,
            },
            fog: Fog {
                color: palette("#111827"),
                near: 30.0,
                far: 250.0,
            },
            grid: GroundGrid {
                size: 300.0,
                height: -0.1,
                cell_color: palette("#4B5563"),
                section_color: palette("#6B7280"),
                fade_distance: 150.0,
            },
            starfield: Starfield {
                radius: 300.0,
                depth: 50.0,
                count: 5000,
            },
        }
    }
}

/// Composed map scene: one world, its environment, and the spawned
/// landmark entities in catalog order.
#[derive(Debug)]
pub struct CityScene {
    pub world: World,
    pub environment: Environment,
    pub landmarks: Vec<LandmarkEntities>,
}

/// Build the full map scene from a catalog.
pub fn compose_city(catalog: &Catalog) -> CityScene {
    let mut world = World::new();
    spawn_ground(&mut world);

    let landmarks = catalog
        .records()
        .iter()
        .enumerate()
        .map(|(index, record)| spawn_landmark(&mut world, index, record))
        .collect();

    CityScene {
        world,
        environment: Environment::default(),
        landmarks,
    }
}

fn spawn_ground(world: &mut World) {
    let ground = world.spawn();
    world.set_transform(
        ground,
        Transform::translate(Vec3::new(0.0, GROUND_HEIGHT, 0.0)),
    );
    world.set_drawable_3d(
        ground,
        Drawable3D::plane(
            GROUND_SIZE,
            GROUND_SIZE,
            Material::matte(palette("#1f2937")).with_roughness_metalness(0.8, 0.2),
        ),
    );
}

// The palette strings in this module are authored; a bad one is a
// programming error, not a runtime condition.
fn palette(hex: &str) -> Rgba {
    Rgba::from_hex(hex).expect("authored palette color")
}
