//! Sphere primitive.

use crate::{gen_f32, Intersection, Material};
use lux_math::{Aabb, Ray, Vec3};
use rand::RngCore;
use std::f32::consts::PI;

/// A sphere with its surface material.
#[derive(Debug, Clone)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn bounds(&self) -> Aabb {
        let r = Vec3::splat(self.radius);
        Aabb::new(self.center - r, self.center + r)
    }

    /// Precise ray intersection by solving the quadratic.
    pub fn intersect(&self, ray: &Ray) -> Intersection<'_> {
        let oc = self.center - ray.origin;
        let a = ray.direction.length_squared();
        let h = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return Intersection::default();
        }
        let sqrtd = discriminant.sqrt();

        // Nearest root strictly inside the ray's parametric range
        let mut root = (h - sqrtd) / a;
        if root <= ray.t_min || root >= ray.t_max {
            root = (h + sqrtd) / a;
            if root <= ray.t_min || root >= ray.t_max {
                return Intersection::default();
            }
        }

        let point = ray.at(root);
        Intersection {
            happened: true,
            point,
            normal: (point - self.center).normalize(),
            distance: root,
            object: None,
            material: Some(&self.material),
            emission: Vec3::ZERO,
        }
    }

    pub fn area(&self) -> f32 {
        4.0 * PI * self.radius * self.radius
    }

    /// Uniformly sample a point on the surface; the pdf is with respect to
    /// area.
    pub fn sample(&self, rng: &mut dyn RngCore) -> (Intersection<'_>, f32) {
        let z = 1.0 - 2.0 * gen_f32(rng);
        let r = (1.0 - z * z).max(0.0).sqrt();
        let phi = 2.0 * PI * gen_f32(rng);
        let dir = Vec3::new(r * phi.cos(), r * phi.sin(), z);

        let isect = Intersection {
            happened: true,
            point: self.center + self.radius * dir,
            normal: dir,
            distance: f32::INFINITY,
            object: None,
            material: Some(&self.material),
            emission: self.material.emission,
        };
        (isect, 1.0 / self.area())
    }

    /// Surface normal at a point on the sphere.
    pub fn surface_normal(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize()
    }
}
