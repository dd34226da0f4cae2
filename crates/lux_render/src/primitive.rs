//! The capability seam between geometry and the rest of the core.
//!
//! `Hittable` is the narrow interface the BVH consumes. `Primitive` is the
//! closed set of scene shapes; the integrators reach the wider capability
//! surface (area, sampling, surface properties) through it.

use crate::{Color, Intersection, Material, Sphere, Triangle};
use lux_math::{Aabb, Ray, Vec2, Vec3};
use rand::RngCore;

/// Objects a ray can hit and a BVH can be built over.
pub trait Hittable {
    /// Axis-aligned bounds of the object.
    fn bounds(&self) -> Aabb;

    /// Precise ray intersection.
    fn intersect(&self, ray: &Ray) -> Intersection<'_>;
}

/// A geometric primitive in the scene.
#[derive(Debug, Clone)]
pub enum Primitive {
    Sphere(Sphere),
    Triangle(Triangle),
}

impl Primitive {
    pub fn material(&self) -> &Material {
        match self {
            Primitive::Sphere(s) => &s.material,
            Primitive::Triangle(t) => &t.material,
        }
    }

    /// Surface area of the primitive.
    pub fn area(&self) -> f32 {
        match self {
            Primitive::Sphere(s) => s.area(),
            Primitive::Triangle(t) => t.area(),
        }
    }

    /// Whether the primitive's material emits light.
    pub fn is_emissive(&self) -> bool {
        self.material().has_emission()
    }

    /// Sample a point on the surface, returning its intersection record
    /// (point, normal, emitted radiance) and a pdf with respect to area.
    pub fn sample(&self, rng: &mut dyn RngCore) -> (Intersection<'_>, f32) {
        let (mut isect, pdf) = match self {
            Primitive::Sphere(s) => s.sample(rng),
            Primitive::Triangle(t) => t.sample(rng),
        };
        isect.object = Some(self);
        (isect, pdf)
    }

    /// Shading normal and local surface coordinates at a point.
    pub fn surface_properties(&self, point: Vec3, _incoming: Vec3) -> (Vec3, Vec2) {
        match self {
            Primitive::Sphere(s) => (s.surface_normal(point), Vec2::ZERO),
            Primitive::Triangle(t) => (t.normal, Vec2::ZERO),
        }
    }

    /// Base surface color at the given local coordinates.
    pub fn base_color(&self, _st: Vec2) -> Color {
        self.material().albedo
    }
}

impl Hittable for Primitive {
    fn bounds(&self) -> Aabb {
        match self {
            Primitive::Sphere(s) => s.bounds(),
            Primitive::Triangle(t) => t.bounds(),
        }
    }

    fn intersect(&self, ray: &Ray) -> Intersection<'_> {
        let mut isect = match self {
            Primitive::Sphere(s) => s.intersect(ray),
            Primitive::Triangle(t) => t.intersect(ray),
        };
        if isect.happened {
            isect.object = Some(self);
        }
        isect
    }
}

impl Hittable for Sphere {
    fn bounds(&self) -> Aabb {
        Sphere::bounds(self)
    }

    fn intersect(&self, ray: &Ray) -> Intersection<'_> {
        Sphere::intersect(self, ray)
    }
}

impl Hittable for Triangle {
    fn bounds(&self) -> Aabb {
        Triangle::bounds(self)
    }

    fn intersect(&self, ray: &Ray) -> Intersection<'_> {
        Triangle::intersect(self, ray)
    }
}
