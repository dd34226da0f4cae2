//! Ray type shared by the acceleration structure and the integrators.

use glam::Vec3;

/// A ray with origin, direction, and time.
///
/// The component-wise reciprocal of the direction is precomputed at
/// construction for the AABB slab test. A zero direction component yields an
/// infinite reciprocal, which the slab test handles through ordinary IEEE
/// arithmetic.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray
    pub origin: Vec3,
    /// Direction vector (not necessarily normalized)
    pub direction: Vec3,
    /// Per-component reciprocal of `direction`
    pub direction_inv: Vec3,
    /// Time value for motion blur
    pub time: f32,
    /// Lower bound of the valid parametric range
    pub t_min: f32,
    /// Upper bound of the valid parametric range
    pub t_max: f32,
}

impl Ray {
    /// Create a new ray at time 0.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::with_time(origin, direction, 0.0)
    }

    /// Create a new ray with an explicit time value.
    #[inline]
    pub fn with_time(origin: Vec3, direction: Vec3, time: f32) -> Self {
        Self {
            origin,
            direction,
            direction_inv: direction.recip(),
            time,
            t_min: 0.0,
            t_max: f32::INFINITY,
        }
    }

    /// Compute a point along the ray at parameter t.
    /// P(t) = origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }

    /// Per-axis positivity of the direction, read off the reciprocal so a
    /// +0 component (infinite reciprocal) still counts as positive and the
    /// slab test keeps a valid interval for it.
    #[inline]
    pub fn dir_is_pos(&self) -> [bool; 3] {
        [
            self.direction_inv.x > 0.0,
            self.direction_inv.y > 0.0,
            self.direction_inv.z > 0.0,
        ]
    }
}
