//! Axis-aligned bounding box for spatial acceleration structures (BVH).

use crate::Ray;
use glam::Vec3;

/// Axis-aligned bounding box stored as two corner points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// An empty box (contains nothing; unioning is the identity).
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create a box from two corner points, in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// The smallest box enclosing both operands.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// The smallest box enclosing this box and a point.
    pub fn union_point(&self, p: Vec3) -> Aabb {
        Aabb {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    /// Center point of the box.
    pub fn centroid(&self) -> Vec3 {
        0.5 * self.min + 0.5 * self.max
    }

    /// Extent of the box along each axis.
    pub fn diagonal(&self) -> Vec3 {
        self.max - self.min
    }

    /// Index (0=X, 1=Y, 2=Z) of the axis with the greatest extent.
    ///
    /// Ties resolve in favor of the first comparison that holds: x, then y,
    /// then z.
    pub fn max_extent(&self) -> usize {
        let d = self.diagonal();
        if d.x > d.y && d.x > d.z {
            0
        } else if d.y > d.z {
            1
        } else {
            2
        }
    }

    /// Slab test against a ray, given the precomputed reciprocal direction
    /// and per-axis direction-positivity flags.
    ///
    /// The boundary is inclusive: a ray exactly tangent to a face (entry
    /// parameter equal to exit parameter) counts as a hit. Zero direction
    /// components flow through as infinite reciprocals; no axis is guarded.
    /// The flags must agree with the reciprocal's sign (see
    /// [`Ray::dir_is_pos`]) so that a degenerate +0 component selects the
    /// near plane that keeps the interval correct.
    pub fn intersect_p(&self, ray: &Ray, inv_dir: Vec3, dir_is_pos: [bool; 3]) -> bool {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;

        for axis in 0..3 {
            let (near, far) = if dir_is_pos[axis] {
                (self.min[axis], self.max[axis])
            } else {
                (self.max[axis], self.min[axis])
            };
            t_enter = t_enter.max((near - ray.origin[axis]) * inv_dir[axis]);
            t_exit = t_exit.min((far - ray.origin[axis]) * inv_dir[axis]);
        }

        t_enter <= t_exit && t_exit >= 0.0
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(aabb: &Aabb, ray: &Ray) -> bool {
        aabb.intersect_p(ray, ray.direction_inv, ray.dir_is_pos())
    }

    #[test]
    fn test_aabb_new_orders_corners() {
        let aabb = Aabb::new(Vec3::new(10.0, -1.0, 3.0), Vec3::new(0.0, 1.0, -3.0));

        assert_eq!(aabb.min, Vec3::new(0.0, -1.0, -3.0));
        assert_eq!(aabb.max, Vec3::new(10.0, 1.0, 3.0));
    }

    #[test]
    fn test_aabb_union() {
        let a = Aabb::new(Vec3::ZERO, Vec3::new(5.0, 5.0, 5.0));
        let b = Aabb::new(Vec3::new(3.0, 3.0, 3.0), Vec3::new(10.0, 10.0, 10.0));
        let u = a.union(&b);

        assert_eq!(u.min, Vec3::ZERO);
        assert_eq!(u.max, Vec3::splat(10.0));
    }

    #[test]
    fn test_aabb_union_with_empty_is_identity() {
        let a = Aabb::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(4.0, 2.0, 3.0));

        assert_eq!(Aabb::EMPTY.union(&a), a);
    }

    #[test]
    fn test_aabb_union_point() {
        let aabb = Aabb::EMPTY
            .union_point(Vec3::new(1.0, 2.0, 3.0))
            .union_point(Vec3::new(-1.0, 0.0, 5.0));

        assert_eq!(aabb.min, Vec3::new(-1.0, 0.0, 3.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 5.0));
    }

    #[test]
    fn test_aabb_centroid() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::splat(10.0));

        assert_eq!(aabb.centroid(), Vec3::splat(5.0));
    }

    #[test]
    fn test_aabb_max_extent() {
        assert_eq!(Aabb::new(Vec3::ZERO, Vec3::new(10.0, 1.0, 1.0)).max_extent(), 0);
        assert_eq!(Aabb::new(Vec3::ZERO, Vec3::new(1.0, 10.0, 1.0)).max_extent(), 1);
        assert_eq!(Aabb::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 10.0)).max_extent(), 2);
        // Exact three-way tie lands on z: x loses its strict comparison,
        // then y loses its own.
        assert_eq!(Aabb::new(Vec3::ZERO, Vec3::splat(1.0)).max_extent(), 2);
    }

    #[test]
    fn test_aabb_slab_hit_and_miss() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));

        // Pointing at the box
        assert!(hit(&aabb, &Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z)));
        // Pointing away
        assert!(!hit(&aabb, &Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::NEG_Z)));
        // Offset to the side
        assert!(!hit(&aabb, &Ray::new(Vec3::new(10.0, 0.0, -5.0), Vec3::Z)));
        // Negative direction components
        assert!(hit(&aabb, &Ray::new(Vec3::new(5.0, 5.0, 5.0), Vec3::splat(-1.0))));
    }

    #[test]
    fn test_aabb_slab_origin_inside() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));

        assert!(hit(&aabb, &Ray::new(Vec3::ZERO, Vec3::new(0.3, -0.2, 0.9))));
    }

    #[test]
    fn test_aabb_slab_tangent_ray_is_hit() {
        // Flat box, the bounds of an axis-aligned quad: the z slab collapses
        // to a single parameter, so entry equals exit. The inclusive
        // convention must classify this as a hit or every axis-aligned quad
        // in a scene would be unreachable.
        let flat = Aabb::new(Vec3::new(-1.0, -1.0, 0.5), Vec3::new(1.0, 1.0, 0.5));
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!(hit(&flat, &ray));

        // A diagonal ray touching the box exactly at one corner also has
        // entry == exit.
        let aabb = Aabb::new(Vec3::ZERO, Vec3::splat(2.0));
        let corner = Ray::new(Vec3::new(-2.0, 0.0, 0.0), Vec3::splat(1.0));
        assert!(hit(&aabb, &corner));
    }

    #[test]
    fn test_aabb_slab_degenerate_direction_component() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));

        // y and z components are exactly zero; the reciprocals are infinite
        // and the test still classifies correctly.
        assert!(hit(&aabb, &Ray::new(Vec3::new(-5.0, 0.5, 0.5), Vec3::X)));
        assert!(!hit(&aabb, &Ray::new(Vec3::new(-5.0, 2.0, 0.5), Vec3::X)));
    }
}
