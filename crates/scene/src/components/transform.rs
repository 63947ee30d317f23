use foundation::math::Vec3;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Rotation about +Y, radians.
    pub yaw_rad: f64,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw_rad: 0.0,
        }
    }

    pub fn translate(position: Vec3) -> Self {
        Self {
            position,
            yaw_rad: 0.0,
        }
    }
}
