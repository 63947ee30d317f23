use catalog::LandmarkRecord;
use foundation::math::Vec3;

use crate::picking::Ray;

/// Vertical field of view, degrees.
const FOV_Y_DEG: f64 = 50.0;

/// Wheel-zoom distance range (world units).
const MIN_DISTANCE: f64 = 10.0;
const MAX_DISTANCE: f64 = 200.0;

/// Orbit pitch range, radians. The upper bound keeps the eye from
/// dipping below the ground plane.
const MIN_PITCH: f64 = 0.05;
const MAX_PITCH: f64 = std::f64::consts::FRAC_PI_2 - 0.1;

/// Zoom smoothing factor (higher = faster response).
const ZOOM_SMOOTHING: f64 = 8.0;

/// Wheel delta to exponential zoom factor.
const WHEEL_ZOOM_RATE: f64 = 0.002;

/// Landmark framing: `offset = FRAME_EXTENT_FACTOR * max extent + FRAME_MARGIN`.
const FRAME_EXTENT_FACTOR: f64 = 2.0;
const FRAME_MARGIN: f64 = 15.0;

/// Orbit camera over the city map.
///
/// Framing contract (deterministic given the record):
/// - orbit target becomes `(x, 0, z)`
/// - eye becomes `(x + offset, y + offset, z + offset)` where
///   `offset = 2 * max(scale) + 15` (default extent when scale absent)
///
/// Framing is a snap, not a tween, and deselection never moves the
/// camera. The wheel-zoom clamps apply to user input only; a framed
/// distance may legitimately sit outside them.
#[derive(Debug, Clone, PartialEq)]
pub struct MapCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y_deg: f64,
    target_distance: f64,
}

impl Default for MapCamera {
    fn default() -> Self {
        let position = Vec3::new(50.0, 50.0, 50.0);
        let target = Vec3::ZERO;
        Self {
            position,
            target,
            fov_y_deg: FOV_Y_DEG,
            target_distance: (position - target).length(),
        }
    }
}

impl MapCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reposition to frame `record`.
    pub fn frame_landmark(&mut self, record: &LandmarkRecord) {
        let [x, y, z] = record.position;
        let offset = FRAME_EXTENT_FACTOR * record.max_extent() + FRAME_MARGIN;

        self.target = Vec3::new(x, 0.0, z);
        self.position = Vec3::new(x + offset, y + offset, z + offset);
        self.target_distance = (self.position - self.target).length();
    }

    /// Rotate the eye around the target by yaw/pitch deltas (radians).
    pub fn orbit(&mut self, d_yaw: f64, d_pitch: f64) {
        let offset = self.position - self.target;
        let distance = offset.length();
        if distance <= 0.0 {
            return;
        }

        let yaw = offset.z.atan2(offset.x) + d_yaw;
        let pitch = ((offset.y / distance).clamp(-1.0, 1.0).asin() + d_pitch)
            .clamp(MIN_PITCH, MAX_PITCH);

        let dir = Vec3::new(
            pitch.cos() * yaw.cos(),
            pitch.sin(),
            pitch.cos() * yaw.sin(),
        );
        self.position = self.target + dir.scale(distance);
    }

    /// Exponential wheel zoom toward a clamped target distance.
    ///
    /// Positive delta zooms out, negative zooms in.
    pub fn wheel_zoom(&mut self, delta: f64) {
        let factor = (delta * WHEEL_ZOOM_RATE).exp();
        self.target_distance = (self.target_distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Per-frame smoothing of the eye distance toward the zoom target.
    pub fn update(&mut self, dt_s: f64) {
        let offset = self.position - self.target;
        let distance = offset.length();
        if distance <= 0.0 {
            return;
        }

        let alpha = 1.0 - (-ZOOM_SMOOTHING * dt_s.clamp(0.0, 0.1)).exp();
        let next = distance + (self.target_distance - distance) * alpha;
        self.position = self.target + offset.scale(next / distance);
    }

    pub fn distance(&self) -> f64 {
        (self.position - self.target).length()
    }

    /// Ray through a screen pixel, for picking.
    pub fn screen_ray(&self, x_px: f64, y_px: f64, width_px: f64, height_px: f64) -> Option<Ray> {
        if width_px <= 0.0 || height_px <= 0.0 {
            return None;
        }

        let forward = (self.target - self.position).normalized()?;
        let right = forward.cross(Vec3::new(0.0, 1.0, 0.0)).normalized()?;
        let up = right.cross(forward);

        let aspect = width_px / height_px;
        let tan_half = (self.fov_y_deg.to_radians() * 0.5).tan();
        let ndc_x = 2.0 * x_px / width_px - 1.0;
        let ndc_y = 1.0 - 2.0 * y_px / height_px;

        let dir = forward
            + right.scale(ndc_x * tan_half * aspect)
            + up.scale(ndc_y * tan_half);
        Some(Ray::new(self.position, dir))
    }
}
