//! Surface scattering model.
//!
//! A closed set of material kinds: a Lambertian diffuse/glossy lobe used by
//! the path tracer, and two delta lobes (mirror, mirror + dielectric
//! refraction) handled by the Whitted integrator.

use crate::gen_f32;
use lux_math::Vec3;
use rand::RngCore;
use std::f32::consts::PI;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// How a surface scatters incoming light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    /// Lambertian diffuse with a Phong specular highlight
    DiffuseGlossy,
    /// Perfect mirror
    Reflective,
    /// Dielectric: mirror reflection plus Snell refraction
    ReflectiveRefractive,
}

/// Surface material parameters.
#[derive(Debug, Clone)]
pub struct Material {
    pub kind: MaterialKind,
    /// Radiance emitted by the surface; zero for non-lights
    pub emission: Color,
    /// Index of refraction
    pub ior: f32,
    /// Diffuse coefficient
    pub kd: f32,
    /// Specular coefficient
    pub ks: f32,
    /// Phong specular exponent
    pub specular_exponent: f32,
    /// Base surface color
    pub albedo: Color,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kind: MaterialKind::DiffuseGlossy,
            emission: Color::ZERO,
            ior: 1.3,
            kd: 0.8,
            ks: 0.2,
            specular_exponent: 25.0,
            albedo: Color::splat(0.2),
        }
    }
}

impl Material {
    /// A plain diffuse surface with the given base color.
    pub fn diffuse(albedo: Color) -> Self {
        Self {
            albedo,
            ..Default::default()
        }
    }

    /// A diffuse surface that also emits light.
    pub fn emissive(albedo: Color, emission: Color) -> Self {
        Self {
            albedo,
            emission,
            ..Default::default()
        }
    }

    /// A perfect mirror.
    pub fn reflective(ior: f32) -> Self {
        Self {
            kind: MaterialKind::Reflective,
            ior,
            ..Default::default()
        }
    }

    /// A dielectric that both reflects and refracts.
    pub fn glass(ior: f32) -> Self {
        Self {
            kind: MaterialKind::ReflectiveRefractive,
            ior,
            ..Default::default()
        }
    }

    /// Whether this material emits light.
    pub fn has_emission(&self) -> bool {
        self.emission.length() > 1e-5
    }

    /// BRDF value for light arriving from `wi` and leaving toward the viewer,
    /// where `wo` is the direction the incoming ray travels.
    ///
    /// The delta lobes evaluate to zero; their transport goes through the
    /// Whitted integrator instead.
    pub fn eval(&self, _wo: Vec3, wi: Vec3, n: Vec3) -> Color {
        match self.kind {
            MaterialKind::DiffuseGlossy => {
                if n.dot(wi) > 0.0 {
                    self.albedo * self.kd / PI
                } else {
                    Color::ZERO
                }
            }
            MaterialKind::Reflective | MaterialKind::ReflectiveRefractive => Color::ZERO,
        }
    }

    /// Importance-sample an outgoing direction for a ray arriving along `wo`.
    pub fn sample(&self, wo: Vec3, n: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        match self.kind {
            MaterialKind::DiffuseGlossy => {
                // Uniform sampling of the hemisphere around the normal
                let x1 = gen_f32(rng);
                let x2 = gen_f32(rng);
                let z = (1.0 - 2.0 * x1).abs();
                let r = (1.0 - z * z).sqrt();
                let phi = 2.0 * PI * x2;
                let local = Vec3::new(r * phi.cos(), r * phi.sin(), z);
                to_world(local, n)
            }
            MaterialKind::Reflective | MaterialKind::ReflectiveRefractive => reflect(wo, n),
        }
    }

    /// Probability density of `sample` having produced `wi`.
    pub fn pdf(&self, _wo: Vec3, wi: Vec3, n: Vec3) -> f32 {
        match self.kind {
            MaterialKind::DiffuseGlossy => {
                if wi.dot(n) > 0.0 {
                    0.5 / PI
                } else {
                    0.0
                }
            }
            // Delta distributions: the sampled direction is certain.
            MaterialKind::Reflective | MaterialKind::ReflectiveRefractive => 1.0,
        }
    }
}

/// Mirror reflection of `i` about the normal `n`.
#[inline]
pub fn reflect(i: Vec3, n: Vec3) -> Vec3 {
    i - 2.0 * i.dot(n) * n
}

/// Snell-law refraction of `i` through a surface with the given index of
/// refraction. Returns the zero vector on total internal reflection.
pub fn refract(i: Vec3, n: Vec3, ior: f32) -> Vec3 {
    let mut cosi = i.dot(n).clamp(-1.0, 1.0);
    let (mut etai, mut etat) = (1.0, ior);
    let mut normal = n;
    if cosi < 0.0 {
        cosi = -cosi;
    } else {
        std::mem::swap(&mut etai, &mut etat);
        normal = -n;
    }
    let eta = etai / etat;
    let k = 1.0 - eta * eta * (1.0 - cosi * cosi);
    if k < 0.0 {
        Vec3::ZERO
    } else {
        eta * i + (eta * cosi - k.sqrt()) * normal
    }
}

/// Fraction of light reflected at a dielectric boundary (exact Fresnel
/// equations, unpolarized average). Returns 1 on total internal reflection.
pub fn fresnel(i: Vec3, n: Vec3, ior: f32) -> f32 {
    let cosi = i.dot(n).clamp(-1.0, 1.0);
    let (mut etai, mut etat) = (1.0, ior);
    if cosi > 0.0 {
        std::mem::swap(&mut etai, &mut etat);
    }
    let sint = etai / etat * (1.0 - cosi * cosi).max(0.0).sqrt();
    if sint >= 1.0 {
        return 1.0;
    }
    let cost = (1.0 - sint * sint).max(0.0).sqrt();
    let cosi = cosi.abs();
    let rs = (etat * cosi - etai * cost) / (etat * cosi + etai * cost);
    let rp = (etai * cosi - etat * cost) / (etai * cosi + etat * cost);
    (rs * rs + rp * rp) / 2.0
}

/// Transform a vector from the local frame around `n` (with `n` as +z) into
/// world space.
fn to_world(a: Vec3, n: Vec3) -> Vec3 {
    let c = if n.x.abs() > n.y.abs() {
        let inv_len = 1.0 / (n.x * n.x + n.z * n.z).sqrt();
        Vec3::new(n.z * inv_len, 0.0, -n.x * inv_len)
    } else {
        let inv_len = 1.0 / (n.y * n.y + n.z * n.z).sqrt();
        Vec3::new(0.0, n.z * inv_len, -n.y * inv_len)
    };
    let b = c.cross(n);
    a.x * b + a.y * c + a.z * n
}
