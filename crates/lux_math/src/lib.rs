// Re-export glam for convenience
pub use glam::*;

// lux math types
mod aabb;
mod ray;

pub use aabb::Aabb;
pub use ray::Ray;
