//! lux render core — CPU ray tracing.
//!
//! A bounding-volume hierarchy over scene primitives answers first-hit
//! queries; two light-transport strategies consume it: a Monte Carlo path
//! tracer with next-event estimation and Russian-Roulette termination, and a
//! Whitted-style recursive tracer for specular and refractive surfaces with
//! Phong shading for everything else.

use rand::{Rng, RngCore};

mod bvh;
mod camera;
mod integrator;
mod intersection;
mod light;
mod material;
mod primitive;
mod renderer;
mod scene;
mod sphere;
mod triangle;

pub use bvh::{Bvh, SplitMethod};
pub use camera::Camera;
pub use integrator::{Integrator, PathTracer, Whitted, RAY_BIAS, SHADOW_DIST_TOLERANCE};
pub use intersection::{closer, Intersection};
pub use light::Light;
pub use material::{fresnel, reflect, refract, Color, Material, MaterialKind};
pub use primitive::{Hittable, Primitive};
pub use renderer::{color_to_rgba, linear_to_gamma, render, Framebuffer, RenderConfig, RenderError};
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from lux_math
pub use lux_math::{Aabb, Ray, Vec2, Vec3};

/// Uniform f32 in [0, 1) from a type-erased generator.
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen()
}
