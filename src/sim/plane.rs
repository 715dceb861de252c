//! Horizontal-plane view over a 3-D velocity
//!
//! The play area lies on the (x, z) plane, so steering only ever rotates
//! the x/z components while the vertical y component is left alone.

use glam::Vec3;

use crate::normalize_angle;

/// Angle/length accessors used to steer and pin the ball velocity
pub trait PlaneVector {
    /// Signed angle of the (x, z) projection, in (-π, π]
    fn angle(&self) -> f32;

    /// Rotate the (x, z) projection to `angle`, keeping its magnitude and y
    fn set_angle(&mut self, angle: f32);

    /// Rescale all three components to magnitude `length`
    ///
    /// A zero vector has no direction; it becomes `length` along +X.
    fn set_length(&mut self, length: f32);

    /// Add `delta` radians to the plane angle
    fn rotate_angle(&mut self, delta: f32) {
        let angle = normalize_angle(self.angle() + delta);
        self.set_angle(angle);
    }
}

impl PlaneVector for Vec3 {
    fn angle(&self) -> f32 {
        self.z.atan2(self.x)
    }

    fn set_angle(&mut self, angle: f32) {
        let planar = (self.x * self.x + self.z * self.z).sqrt();
        self.x = planar * angle.cos();
        self.z = planar * angle.sin();
    }

    fn set_length(&mut self, length: f32) {
        let dir = self.try_normalize().unwrap_or(Vec3::X);
        *self = dir * length;
    }
}
