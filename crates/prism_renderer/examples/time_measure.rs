//! Serial vs. parallel render timings.
//!
//! Renders random sphere scenes of 2, 4, 8 and 16 objects at several image
//! sizes, once on a single rayon thread and once on the global pool, and
//! logs both times. Pass a number to skip sizes above it, e.g.
//! `cargo run --release --example time_measure -- 500`.

use std::error::Error;
use std::time::Duration;

use prism_core::{Background, GeometryObject, MaterialSpec, RenderSettings, Scene, Shape, TextureSpec};
use prism_math::{Color, Point3};
use prism_renderer::render_image;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const IMAGE_SIZES: [u32; 5] = [100, 200, 500, 1000, 2000];
const SPHERE_COUNTS: [usize; 4] = [2, 4, 8, 16];
const SAMPLES_PER_PIXEL: u32 = 10;
const APERTURE: f64 = 2.0;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .filter_module("prism_renderer", log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let max_size = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u32>()?,
        None => u32::MAX,
    };
    let serial = rayon::ThreadPoolBuilder::new().num_threads(1).build()?;
    let mut rng = StdRng::seed_from_u64(2020);

    log::info!("Parallel runs use {} threads", rayon::current_num_threads());

    for count in SPHERE_COUNTS {
        log::info!("spheres: {}", count);
        let scene = random_spheres(&mut rng, count)?;

        for size in IMAGE_SIZES.into_iter().filter(|&size| size <= max_size) {
            let settings = RenderSettings::new(size, size, SAMPLES_PER_PIXEL, APERTURE)?.with_seed(1);

            let one_thread = serial.install(|| render_image(&settings, &scene, |_| {}, || false))?;
            let all_threads = render_image(&settings, &scene, |_| {}, || false)?;

            log::info!(
                "  {}x{}: serial {} ms, parallel {} ms ({:.1}x)",
                size,
                size,
                one_thread.elapsed.as_millis(),
                all_threads.elapsed.as_millis(),
                speedup(one_thread.elapsed, all_threads.elapsed)
            );
        }
    }

    Ok(())
}

fn speedup(serial: Duration, parallel: Duration) -> f64 {
    serial.as_secs_f64() / parallel.as_secs_f64().max(f64::EPSILON)
}

/// Spheres with integer centers in front of a camera at `(0, 0, 5)`, on a
/// white background.
fn random_spheres(rng: &mut StdRng, count: usize) -> Result<Scene, Box<dyn Error>> {
    let materials = [
        MaterialSpec::Lambertian {
            texture: TextureSpec::checker(Color::ZERO, Color::ONE),
        },
        MaterialSpec::Metal {
            color: Color::new(0.8, 0.6, 0.2),
            fuzz: 0.0,
        },
        MaterialSpec::bk7_glass(),
        MaterialSpec::matte(Color::new(0.8, 0.6, 0.2)),
        MaterialSpec::Metal {
            color: Color::new(0.1, 0.2, 0.5),
            fuzz: 0.1,
        },
    ];

    let mut scene = Scene::new(Background::Solid(Color::ONE), Point3::new(0.0, 0.0, 5.0), Point3::ZERO)?;
    for _ in 0..count {
        let center = Point3::new(
            rng.gen_range(-5..5) as f64,
            rng.gen_range(-5..5) as f64,
            rng.gen_range(-15..-5) as f64,
        );
        let radius = rng.gen_range(1..=3) as f64;
        let material = materials[rng.gen_range(0..materials.len())].clone();
        scene.add_object(GeometryObject::new(Shape::sphere(center, radius), material)?);
    }
    Ok(scene)
}
