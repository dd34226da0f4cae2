//! Whitted-traced scene: glass and mirror spheres over a diffuse floor,
//! shaded from two point lights.

use anyhow::Result;
use lux_render::{
    render, Camera, Light, Material, Primitive, RenderConfig, Scene, Sphere, Triangle, Vec3,
    Whitted,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let scene = build_scene();

    let mut camera = Camera::new()
        .with_resolution(640, 480)
        .with_position(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
        .with_lens(90.0, 0.0, 1.0);
    camera.initialize();

    let config = RenderConfig {
        samples_per_pixel: 4,
    };
    log::info!(
        "rendering {}x{} @ {} spp",
        camera.image_width,
        camera.image_height,
        config.samples_per_pixel
    );

    let start = std::time::Instant::now();
    let mut rng = StdRng::seed_from_u64(0);
    let framebuffer = render(&scene, &camera, &Whitted, &config, &mut rng);
    log::info!("rendered in {:.2?}", start.elapsed());

    framebuffer.save("spheres.png")?;
    log::info!("saved to spheres.png");
    Ok(())
}

fn build_scene() -> Scene {
    let mut scene = Scene::new();
    scene.max_depth = 5;
    scene.background = Vec3::new(0.235294, 0.67451, 0.843137);

    scene.add_object(Primitive::Sphere(Sphere::new(
        Vec3::new(-1.0, 0.0, -12.0),
        2.0,
        Material::diffuse(Vec3::new(0.6, 0.7, 0.8)),
    )));
    scene.add_object(Primitive::Sphere(Sphere::new(
        Vec3::new(0.5, -0.5, -8.0),
        1.5,
        Material::glass(1.5),
    )));
    scene.add_object(Primitive::Sphere(Sphere::new(
        Vec3::new(3.5, 0.5, -11.0),
        1.5,
        Material::reflective(1.8),
    )));

    // Floor, normal up
    for tri in Triangle::quad(
        [
            Vec3::new(-5.0, -3.0, -6.0),
            Vec3::new(5.0, -3.0, -6.0),
            Vec3::new(5.0, -3.0, -16.0),
            Vec3::new(-5.0, -3.0, -16.0),
        ],
        Material::diffuse(Vec3::new(0.8, 0.6, 0.2)),
    ) {
        scene.add_object(Primitive::Triangle(tri));
    }

    scene.add_light(Light::Point {
        position: Vec3::new(-20.0, 70.0, 20.0),
        intensity: Vec3::splat(0.5),
    });
    scene.add_light(Light::Point {
        position: Vec3::new(30.0, 50.0, -12.0),
        intensity: Vec3::splat(0.5),
    });

    scene.build_bvh();
    scene
}
