//! Ray/scene hit record shared by the BVH and both integrators.

use crate::{Material, Primitive};
use lux_math::Vec3;

/// Record of a ray/scene intersection.
///
/// The default value is the "no hit" sentinel: `happened` false, distance
/// at infinity, no object or material reference, zero emission.
#[derive(Clone, Copy)]
pub struct Intersection<'a> {
    /// Whether the ray hit anything
    pub happened: bool,
    /// Point of intersection
    pub point: Vec3,
    /// Surface normal at the intersection
    pub normal: Vec3,
    /// Distance along the ray to the intersection
    pub distance: f32,
    /// The primitive that was hit
    pub object: Option<&'a Primitive>,
    /// Material of the hit primitive
    pub material: Option<&'a Material>,
    /// Radiance emitted at the intersection point
    pub emission: Vec3,
}

impl<'a> Default for Intersection<'a> {
    fn default() -> Self {
        Self {
            happened: false,
            point: Vec3::ZERO,
            normal: Vec3::ZERO,
            distance: f32::INFINITY,
            object: None,
            material: None,
            emission: Vec3::ZERO,
        }
    }
}

/// True when `i1` is the closer of the two intersections.
///
/// A miss loses to anything; two hits compare by distance, with equal
/// distances favoring `i1`.
pub fn closer(i1: &Intersection, i2: &Intersection) -> bool {
    if !i1.happened {
        return false;
    }
    if !i2.happened {
        return true;
    }
    i1.distance <= i2.distance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit_at(distance: f32) -> Intersection<'static> {
        Intersection {
            happened: true,
            distance,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_is_not_hit() {
        let isect = Intersection::default();

        assert!(!isect.happened);
        assert_eq!(isect.distance, f32::INFINITY);
        assert!(isect.object.is_none());
        assert!(isect.material.is_none());
        assert_eq!(isect.emission, Vec3::ZERO);
    }

    #[test]
    fn test_closer_truth_table() {
        let miss = Intersection::default();

        // miss vs miss: neither is closer; the right operand wins the merge
        assert!(!closer(&miss, &miss));
        // miss vs hit and hit vs miss: the hit wins
        assert!(!closer(&miss, &hit_at(1.0)));
        assert!(closer(&hit_at(1.0), &miss));
        // two hits: smaller distance wins
        assert!(closer(&hit_at(1.0), &hit_at(2.0)));
        assert!(!closer(&hit_at(2.0), &hit_at(1.0)));
        // equal distances favor the left operand
        assert!(closer(&hit_at(3.0), &hit_at(3.0)));
    }
}
