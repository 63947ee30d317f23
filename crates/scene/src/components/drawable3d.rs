use crate::components::Material;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape3D {
    Box {
        width: f64,
        height: f64,
        depth: f64,
    },
    Cylinder {
        top_radius: f64,
        bottom_radius: f64,
        height: f64,
        radial_segments: u32,
    },
    Sphere {
        radius: f64,
    },
    Plane {
        width: f64,
        depth: f64,
    },
}

impl Shape3D {
    /// Half-extents of the shape's local AABB.
    pub fn half_extents(&self) -> [f64; 3] {
        match *self {
            Shape3D::Box {
                width,
                height,
                depth,
            } => [width / 2.0, height / 2.0, depth / 2.0],
            Shape3D::Cylinder {
                top_radius,
                bottom_radius,
                height,
                ..
            } => {
                let r = top_radius.max(bottom_radius);
                [r, height / 2.0, r]
            }
            Shape3D::Sphere { radius } => [radius, radius, radius],
            Shape3D::Plane { width, depth } => [width / 2.0, 0.0, depth / 2.0],
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Drawable3D {
    pub shape: Shape3D,
    pub material: Material,
}

impl Drawable3D {
    pub fn boxy(width: f64, height: f64, depth: f64, material: Material) -> Self {
        Self {
            shape: Shape3D::Box {
                width,
                height,
                depth,
            },
            material,
        }
    }

    pub fn cylinder(
        top_radius: f64,
        bottom_radius: f64,
        height: f64,
        radial_segments: u32,
        material: Material,
    ) -> Self {
        Self {
            shape: Shape3D::Cylinder {
                top_radius,
                bottom_radius,
                height,
                radial_segments,
            },
            material,
        }
    }

    pub fn sphere(radius: f64, material: Material) -> Self {
        Self {
            shape: Shape3D::Sphere { radius },
            material,
        }
    }

    pub fn plane(width: f64, depth: f64, material: Material) -> Self {
        Self {
            shape: Shape3D::Plane { width, depth },
            material,
        }
    }
}
