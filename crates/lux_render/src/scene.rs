//! Scene: object and light ownership, BVH lifecycle, light sampling.

use crate::{gen_f32, Bvh, Color, Intersection, Light, Primitive, SplitMethod};
use lux_math::Ray;
use rand::RngCore;

/// A renderable scene.
///
/// Owns the primitives and lights and at most one BVH over the primitives.
/// The tree is built by an explicit [`Scene::build_bvh`] call once the
/// object set is final; mutating the objects afterwards without rebuilding
/// is unsupported.
pub struct Scene {
    objects: Vec<Primitive>,
    lights: Vec<Light>,
    bvh: Option<Bvh>,
    /// Recursion cutoff for the Whitted integrator
    pub max_depth: u32,
    /// Continuation probability for Russian Roulette in the path tracer
    pub russian_roulette: f32,
    /// Color returned by the Whitted integrator on a primary-ray miss
    pub background: Color,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            bvh: None,
            max_depth: 5,
            russian_roulette: 0.8,
            background: Color::new(0.235294, 0.67451, 0.843137),
        }
    }

    pub fn add_object(&mut self, object: Primitive) {
        if self.bvh.is_some() {
            log::warn!("object added after the BVH was built; call build_bvh again");
        }
        self.objects.push(object);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn objects(&self) -> &[Primitive] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Build the acceleration structure over the current object set.
    pub fn build_bvh(&mut self) {
        log::info!("generating BVH over {} objects", self.objects.len());
        self.bvh = Some(Bvh::build(&self.objects, 1, SplitMethod::Naive));
    }

    /// First hit of `ray` against the scene.
    ///
    /// Reports a miss when the BVH has not been built (or was built over an
    /// empty object set).
    pub fn intersect(&self, ray: &Ray) -> Intersection<'_> {
        match &self.bvh {
            Some(bvh) => bvh.intersect(&self.objects, ray),
            None => Intersection::default(),
        }
    }

    /// Sample one point on the scene's emissive geometry, proportionally to
    /// surface area. Returns the surface sample and its pdf over area.
    ///
    /// With no emissive geometry the sample stays in its not-hit state with
    /// pdf 0: a degenerate case the caller observes, not an error.
    pub fn sample_light(&self, rng: &mut dyn RngCore) -> (Intersection<'_>, f32) {
        let emit_area_sum: f32 = self
            .objects
            .iter()
            .filter(|o| o.is_emissive())
            .map(Primitive::area)
            .sum();

        let p = gen_f32(rng) * emit_area_sum;
        let mut running = 0.0;
        for object in &self.objects {
            if object.is_emissive() {
                running += object.area();
                if p <= running {
                    return object.sample(rng);
                }
            }
        }
        (Intersection::default(), 0.0)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
