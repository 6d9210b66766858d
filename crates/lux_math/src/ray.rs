use crate::Vec3;

/// A parametric ray: origin plus a scaled direction.
///
/// `time` records when the ray was emitted within the camera shutter
/// interval and drives motion blur; it stays 0 when unused.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub time: f32,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3, time: f32) -> Self {
        Self {
            origin,
            direction,
            time,
        }
    }

    /// The point at parameter t: origin + t * direction.
    ///
    /// Distances are parametric, not physical; `direction` is not
    /// required to be normalized.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
