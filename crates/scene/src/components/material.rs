use foundation::color::Rgba;

/// PBR-ish surface description consumed by the external renderer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub color: Rgba,
    pub emissive: Rgba,
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
    pub transparent: bool,
}

impl Material {
    /// Default opaque surface.
    pub fn matte(color: Rgba) -> Self {
        Self {
            color,
            emissive: Rgba::BLACK,
            emissive_intensity: 0.0,
            roughness: 0.7,
            metalness: 0.1,
            opacity: 1.0,
            transparent: false,
        }
    }

    /// Glossy translucent surface used for liquid areas.
    pub fn water(color: Rgba) -> Self {
        Self {
            color,
            emissive: Rgba::BLACK,
            emissive_intensity: 0.0,
            roughness: 0.1,
            metalness: 0.8,
            opacity: 0.6,
            transparent: true,
        }
    }

    pub fn with_color(self, color: Rgba) -> Self {
        Self { color, ..self }
    }

    pub fn with_emissive(self, emissive: Rgba, intensity: f32) -> Self {
        Self {
            emissive,
            emissive_intensity: intensity,
            ..self
        }
    }

    pub fn with_roughness_metalness(self, roughness: f32, metalness: f32) -> Self {
        Self {
            roughness,
            metalness,
            ..self
        }
    }
}
