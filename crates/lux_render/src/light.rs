//! Light sources for the Whitted integrator.
//!
//! The path tracer does not use this list; it samples emissive geometry
//! directly. The Whitted shading loop only evaluates point lights and skips
//! area lights.

use lux_math::Vec3;

/// A light source in the scene.
#[derive(Debug, Clone, Copy)]
pub enum Light {
    /// Infinitesimal emitter shaded with the Phong model.
    Point { position: Vec3, intensity: Vec3 },
    /// Extended emitter; present in the list but skipped by the Whitted
    /// shading loop (no global illumination there).
    Area { position: Vec3, intensity: Vec3 },
}

impl Light {
    pub fn position(&self) -> Vec3 {
        match self {
            Light::Point { position, .. } | Light::Area { position, .. } => *position,
        }
    }

    pub fn intensity(&self) -> Vec3 {
        match self {
            Light::Point { intensity, .. } | Light::Area { intensity, .. } => *intensity,
        }
    }
}
