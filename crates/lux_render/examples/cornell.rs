//! Path-traced enclosed box scene with one area light in the ceiling.

use anyhow::Result;
use lux_render::{
    render, Camera, Light, Material, PathTracer, Primitive, RenderConfig, Scene, Sphere, Triangle,
    Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let scene = build_scene();

    let mut camera = Camera::new()
        .with_resolution(512, 512)
        .with_position(
            Vec3::new(278.0, 273.0, -800.0),
            Vec3::new(278.0, 273.0, 0.0),
            Vec3::Y,
        )
        .with_lens(40.0, 0.0, 1.0);
    camera.initialize();

    let config = RenderConfig {
        samples_per_pixel: 16,
    };
    log::info!(
        "rendering {}x{} @ {} spp",
        camera.image_width,
        camera.image_height,
        config.samples_per_pixel
    );

    let start = std::time::Instant::now();
    let mut rng = StdRng::seed_from_u64(0);
    let framebuffer = render(&scene, &camera, &PathTracer, &config, &mut rng);
    log::info!("rendered in {:.2?}", start.elapsed());

    framebuffer.save("cornell.png")?;
    log::info!("saved to cornell.png");
    Ok(())
}

fn build_scene() -> Scene {
    let white = Material::diffuse(Vec3::new(0.725, 0.71, 0.68));
    let red = Material::diffuse(Vec3::new(0.63, 0.065, 0.05));
    let green = Material::diffuse(Vec3::new(0.14, 0.45, 0.091));
    let light = Material::emissive(
        Vec3::new(0.65, 0.65, 0.65),
        Vec3::new(47.84, 38.57, 31.08),
    );

    let mut scene = Scene::new();
    scene.russian_roulette = 0.8;
    scene.background = Vec3::ZERO;

    // All walls wind so their normals face the inside of the box.
    let quads = [
        // floor (+y)
        (
            [
                Vec3::new(552.8, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 559.2),
                Vec3::new(552.8, 0.0, 559.2),
            ],
            white.clone(),
        ),
        // ceiling (-y)
        (
            [
                Vec3::new(552.8, 548.8, 0.0),
                Vec3::new(552.8, 548.8, 559.2),
                Vec3::new(0.0, 548.8, 559.2),
                Vec3::new(0.0, 548.8, 0.0),
            ],
            white.clone(),
        ),
        // back wall (-z)
        (
            [
                Vec3::new(552.8, 0.0, 559.2),
                Vec3::new(0.0, 0.0, 559.2),
                Vec3::new(0.0, 548.8, 559.2),
                Vec3::new(552.8, 548.8, 559.2),
            ],
            white.clone(),
        ),
        // left wall (-x)
        (
            [
                Vec3::new(552.8, 0.0, 0.0),
                Vec3::new(552.8, 0.0, 559.2),
                Vec3::new(552.8, 548.8, 559.2),
                Vec3::new(552.8, 548.8, 0.0),
            ],
            red,
        ),
        // right wall (+x)
        (
            [
                Vec3::new(0.0, 0.0, 559.2),
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 548.8, 0.0),
                Vec3::new(0.0, 548.8, 559.2),
            ],
            green,
        ),
        // area light just under the ceiling (-y)
        (
            [
                Vec3::new(343.0, 548.7, 227.0),
                Vec3::new(343.0, 548.7, 332.0),
                Vec3::new(213.0, 548.7, 332.0),
                Vec3::new(213.0, 548.7, 227.0),
            ],
            light,
        ),
    ];

    for (corners, material) in quads {
        for tri in Triangle::quad(corners, material) {
            scene.add_object(Primitive::Triangle(tri));
        }
    }

    scene.add_object(Primitive::Sphere(Sphere::new(
        Vec3::new(185.0, 90.0, 169.0),
        90.0,
        white.clone(),
    )));
    scene.add_object(Primitive::Sphere(Sphere::new(
        Vec3::new(370.0, 120.0, 351.0),
        120.0,
        white,
    )));

    // The list is unused by the path tracer; recorded for completeness.
    scene.add_light(Light::Area {
        position: Vec3::new(278.0, 548.7, 279.5),
        intensity: Vec3::new(47.84, 38.57, 31.08),
    });

    scene.build_bvh();
    scene
}
