//! Simple ray tracer example.
//!
//! Renders spheres on a reflective floor with a glass cylinder, a pair of
//! triangles and soft-shadowed lights, then saves the result as PNG.
//!
//! Usage: `simple_render [settings.json] [output.png]`

use anyhow::{Context, Result};
use glint_core::{
    AmbientLight, Cylinder, DirectionalLight, Geometries, Material, Plane, PointLight, Polygon,
    Scene, SpotLight, Sphere, Triangle,
};
use glint_math::{Color, DVec3, Ray};
use glint_renderer::{render, Camera, RenderSettings, SimpleRayTracer};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => RenderSettings::from_file(&path)
            .with_context(|| format!("Failed to load render settings from {path}"))?,
        None => RenderSettings::default(),
    };
    let output = args.next().unwrap_or_else(|| "output.png".to_string());

    let start = std::time::Instant::now();
    let scene = build_scene()?.with_bvh();
    log::info!("Scene '{}' built in {:?}", scene.name, start.elapsed());

    let camera = settings
        .apply(
            Camera::builder()
                .with_location(DVec3::new(0.0, 40.0, 260.0))
                .with_target(DVec3::new(0.0, -10.0, -60.0), DVec3::Y)
                .with_vp_distance(300.0)
                .with_vp_size(200.0, 150.0),
        )
        .build()?;

    let tracer = SimpleRayTracer::new(&scene).with_settings(settings.trace);
    let mut image = render(&camera, &tracer);

    if std::env::var_os("GLINT_GRID").is_some() {
        image.print_grid(50, Color::new(1.0, 1.0, 0.0));
    }
    image.save_png(&output)?;
    Ok(())
}

fn build_scene() -> Result<Scene> {
    let shiny = Material::new()
        .with_kd(0.5)
        .with_ks(0.5)
        .with_shininess(60)
        .with_ka(0.2);
    let glass = Material::new()
        .with_kd(0.2)
        .with_ks(0.8)
        .with_shininess(100)
        .with_kt(0.6)
        .with_ka(0.1);
    let mirror = Material::new()
        .with_kd(0.1)
        .with_ks(0.3)
        .with_shininess(200)
        .with_kr(0.5)
        .with_ka(0.1);

    let mut geometries = Geometries::new();

    // Ring of spheres around the center
    for i in 0..8 {
        let angle = i as f64 * std::f64::consts::TAU / 8.0;
        let center = DVec3::new(70.0 * angle.cos(), -30.0, -60.0 + 70.0 * angle.sin());
        let emission = Color::new(
            0.3 + 0.3 * angle.cos(),
            0.2,
            0.3 + 0.3 * angle.sin(),
        );
        geometries.add(Box::new(
            Sphere::new(center, 18.0)?
                .with_emission(emission)
                .with_material(shiny),
        ));
    }

    geometries.add(Box::new(
        Sphere::new(DVec3::new(0.0, 0.0, -60.0), 35.0)?
            .with_emission(Color::new(0.0, 0.1, 0.3))
            .with_material(glass),
    ));
    geometries.add(Box::new(
        Cylinder::new(Ray::new(DVec3::new(-110.0, -50.0, -140.0), DVec3::Y)?, 15.0, 90.0)?
            .with_emission(Color::new(0.2, 0.05, 0.05))
            .with_material(glass),
    ));

    // Mirrored back wall made of two triangles
    let (a, b) = (DVec3::new(-150.0, -50.0, -200.0), DVec3::new(150.0, -50.0, -200.0));
    let (c, d) = (DVec3::new(150.0, 120.0, -220.0), DVec3::new(-150.0, 120.0, -220.0));
    geometries.add(Box::new(
        Triangle::new(a, b, c)?.with_emission(Color::splat(0.02)).with_material(mirror),
    ));
    geometries.add(Box::new(
        Triangle::new(a, c, d)?.with_emission(Color::splat(0.02)).with_material(mirror),
    ));

    // Pentagonal pedestal under the central sphere
    let pedestal = (0..5)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / 5.0;
            DVec3::new(40.0 * angle.cos(), -49.0, -60.0 + 40.0 * angle.sin())
        })
        .collect();
    geometries.add(Box::new(
        Polygon::new(pedestal)?
            .with_emission(Color::new(0.1, 0.1, 0.05))
            .with_material(shiny),
    ));

    geometries.add(Box::new(
        Plane::new(DVec3::new(0.0, -50.0, 0.0), DVec3::Y)?
            .with_emission(Color::splat(0.05))
            .with_material(mirror.with_kr(0.3)),
    ));

    Ok(Scene::new("simple_render")
        .with_background(Color::new(0.05, 0.05, 0.1))
        .with_ambient_light(AmbientLight::new(Color::ONE, 0.1))
        .with_geometries(geometries)
        .with_light(
            PointLight::new(Color::new(0.6, 0.5, 0.4), DVec3::new(-100.0, 150.0, 50.0))
                .with_kl(0.0005)
                .with_kq(0.00001)
                .with_radius(10.0)
                .with_samples(16),
        )
        .with_light(
            SpotLight::new(
                Color::new(0.8, 0.6, 0.6),
                DVec3::new(80.0, 100.0, 0.0),
                DVec3::new(-1.0, -1.5, -0.8),
            )?
            .with_narrow_beam(3.0)
            .with_kl(0.0004)
            .with_kq(0.000005),
        )
        .with_light(DirectionalLight::new(
            Color::new(0.15, 0.15, 0.2),
            DVec3::new(0.5, -1.0, -0.5),
        )?))
}
