//! Single-threaded render loop and framebuffer output.

use crate::{Camera, Color, Integrator, Scene};
use rand::RngCore;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when writing the framebuffer out.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Framebuffer dimensions do not match its pixel data")]
    BufferShape,
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel
    pub samples_per_pixel: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 16,
        }
    }
}

/// Render target holding linear RGB radiance values.
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to gamma-corrected RGBA bytes.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 4) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Encode as PNG and write to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.to_rgba())
            .ok_or(RenderError::BufferShape)?;
        img.save(path)?;
        Ok(())
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * linear_to_gamma(color.x).clamp(0.0, 1.0)) as u8;
    let g = (255.0 * linear_to_gamma(color.y).clamp(0.0, 1.0)) as u8;
    let b = (255.0 * linear_to_gamma(color.z).clamp(0.0, 1.0)) as u8;
    [r, g, b, 255]
}

/// Render the scene through the given integrator, one pixel at a time.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    integrator: &dyn Integrator,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Framebuffer {
    let mut framebuffer = Framebuffer::new(camera.image_width, camera.image_height);
    let sample_scale = 1.0 / config.samples_per_pixel as f32;

    for y in 0..camera.image_height {
        for x in 0..camera.image_width {
            let mut pixel = Color::ZERO;
            for _ in 0..config.samples_per_pixel {
                let ray = camera.get_ray(x, y, rng);
                pixel += integrator.li(scene, &ray, rng);
            }
            framebuffer.set(x, y, pixel * sample_scale);
        }
        log::debug!("rendered row {} / {}", y + 1, camera.image_height);
    }

    framebuffer
}
