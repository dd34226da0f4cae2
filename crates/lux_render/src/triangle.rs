//! Triangle primitive.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::{gen_f32, Intersection, Material};
use lux_math::{Aabb, Ray, Vec3};
use rand::RngCore;

/// A single triangle with a precomputed unit face normal.
#[derive(Debug, Clone)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    /// Edges v1 - v0 and v2 - v0
    e1: Vec3,
    e2: Vec3,
    /// Unit face normal, right-handed from the winding order
    pub normal: Vec3,
    pub material: Material,
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> Self {
        let e1 = v1 - v0;
        let e2 = v2 - v0;
        Self {
            v0,
            v1,
            v2,
            e1,
            e2,
            normal: e1.cross(e2).normalize(),
            material,
        }
    }

    /// The two triangles of a planar quad with corners in winding order.
    pub fn quad(corners: [Vec3; 4], material: Material) -> [Triangle; 2] {
        let [a, b, c, d] = corners;
        [
            Triangle::new(a, b, c, material.clone()),
            Triangle::new(a, c, d, material),
        ]
    }

    /// Flatten an indexed triangle list into individual triangles.
    pub fn mesh(vertices: &[Vec3], indices: &[[usize; 3]], material: &Material) -> Vec<Triangle> {
        indices
            .iter()
            .map(|&[i, j, k]| {
                Triangle::new(vertices[i], vertices[j], vertices[k], material.clone())
            })
            .collect()
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.v0, self.v1).union_point(self.v2)
    }

    /// Möller-Trumbore intersection. Back faces are culled: rays traveling
    /// with the normal pass through.
    pub fn intersect(&self, ray: &Ray) -> Intersection<'_> {
        if ray.direction.dot(self.normal) > 0.0 {
            return Intersection::default();
        }

        let pvec = ray.direction.cross(self.e2);
        let det = self.e1.dot(pvec);
        if det.abs() < 1e-8 {
            return Intersection::default();
        }
        let det_inv = 1.0 / det;

        let tvec = ray.origin - self.v0;
        let u = tvec.dot(pvec) * det_inv;
        if !(0.0..=1.0).contains(&u) {
            return Intersection::default();
        }

        let qvec = tvec.cross(self.e1);
        let v = ray.direction.dot(qvec) * det_inv;
        if v < 0.0 || u + v > 1.0 {
            return Intersection::default();
        }

        let t = self.e2.dot(qvec) * det_inv;
        if t <= ray.t_min || t >= ray.t_max {
            return Intersection::default();
        }

        Intersection {
            happened: true,
            point: ray.at(t),
            normal: self.normal,
            distance: t,
            object: None,
            material: Some(&self.material),
            emission: Vec3::ZERO,
        }
    }

    pub fn area(&self) -> f32 {
        self.e1.cross(self.e2).length() * 0.5
    }

    /// Uniformly sample a point on the triangle via the square-root warp;
    /// the pdf is with respect to area.
    pub fn sample(&self, rng: &mut dyn RngCore) -> (Intersection<'_>, f32) {
        let x = gen_f32(rng).sqrt();
        let y = gen_f32(rng);
        let point = self.v0 * (1.0 - x) + self.v1 * (x * (1.0 - y)) + self.v2 * (x * y);

        let isect = Intersection {
            happened: true,
            point,
            normal: self.normal,
            distance: f32::INFINITY,
            object: None,
            material: Some(&self.material),
            emission: self.material.emission,
        };
        (isect, 1.0 / self.area())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
            Material::diffuse(Vec3::splat(0.5)),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let tri = unit_triangle();

        let isect = tri.intersect(&Ray::new(Vec3::ZERO, Vec3::NEG_Z));
        assert!(isect.happened);
        assert!((isect.distance - 1.0).abs() < 1e-5);
        assert!((isect.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_triangle_miss() {
        let tri = unit_triangle();

        // Pointing away
        assert!(!tri.intersect(&Ray::new(Vec3::ZERO, Vec3::Z)).happened);
        // Outside the edges
        assert!(!tri
            .intersect(&Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_Z))
            .happened);
    }

    #[test]
    fn test_triangle_backface_cull() {
        let tri = unit_triangle();

        // Winding puts the normal on +z; a ray approaching from behind
        // travels with the normal and is culled.
        let behind = Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::Z);
        assert!(!tri.intersect(&behind).happened);
    }

    #[test]
    fn test_triangle_area() {
        let tri = Triangle::new(
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Material::default(),
        );

        assert!((tri.area() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_sample_stays_inside_bounds() {
        let tri = unit_triangle();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..128 {
            let (isect, pdf) = tri.sample(&mut rng);
            assert!(isect.happened);
            // On the z = -1 plane, inside the bounding box
            assert!((isect.point.z + 1.0).abs() < 1e-6);
            assert!(isect.point.x >= -1.0 && isect.point.x <= 1.0);
            assert!(isect.point.y >= -1.0 && isect.point.y <= 1.0);
            assert!((pdf - 1.0 / tri.area()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_quad_splits_into_two_triangles() {
        let quad = Triangle::quad(
            [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            Material::default(),
        );

        let total: f32 = quad.iter().map(Triangle::area).sum();
        assert!((total - 1.0).abs() < 1e-6);
        assert!((quad[0].normal - quad[1].normal).length() < 1e-6);
    }

    #[test]
    fn test_mesh_flattens_indexed_triangles() {
        let vertices = [
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let indices = [[0, 1, 2], [0, 2, 3]];

        let tris = Triangle::mesh(&vertices, &indices, &Material::default());
        assert_eq!(tris.len(), 2);
        assert_eq!(tris[1].v1, Vec3::new(1.0, 1.0, 0.0));
    }
}
