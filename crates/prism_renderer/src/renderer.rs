//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Per-channel tracing for dispersive glass
//! - Gamma correction
//! - Parallel, cancellable pixel loop with ordered progress

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use image::{Rgba, RgbaImage};
use prism_core::{RenderSettings, Scene};
use prism_math::{Channel, Color, Interval, Ray};
use rand::RngCore;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::error::RenderError;
use crate::sampling::{gen_f64, pixel_rng};
use crate::world::World;

/// Smallest ray parameter accepted as a hit; avoids self-intersection.
pub const T_MIN: f64 = 0.001;

/// Compute the color seen by a ray.
///
/// Follows the path through at most `depth` bounces. A path that runs out
/// of bounces contributes no light.
pub fn ray_color(ray: &Ray, world: &World, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f64::INFINITY)) else {
        return world.background().color_for(ray.direction());
    };

    let material = world.material(rec.material);
    let emission = material.emitted(rec.u, rec.v, rec.p);

    match material.scatter(ray, &rec, rng) {
        Some(s) => emission + s.attenuation * ray_color(&s.scattered, world, depth - 1, rng),
        None => emission,
    }
}

/// Average linear radiance of pixel `(x, y)`, with `y` counted from the
/// bottom of the image.
pub fn render_pixel(
    camera: &Camera,
    world: &World,
    settings: &RenderSettings,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let (s_den, t_den) = grid_denominators(settings);
    let mut pixel_color = Color::ZERO;

    for _ in 0..settings.samples_per_pixel {
        let s = (x as f64 + gen_f64(rng)) / s_den;
        let t = (y as f64 + gen_f64(rng)) / t_den;

        if settings.dispersion {
            // One lens sample, traced once per band
            let ray = camera.get_ray(s, t, Channel::Green, rng);
            for channel in Channel::ALL {
                let i = channel.index();
                pixel_color[i] += ray_color(&ray.with_channel(channel), world, settings.max_depth, rng)[i];
            }
        } else {
            let ray = camera.get_ray(s, t, Channel::Green, rng);
            pixel_color += ray_color(&ray, world, settings.max_depth, rng);
        }
    }

    pixel_color / settings.samples_per_pixel as f64
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Gamma-corrected intensities that map onto the 256 byte levels.
const INTENSITY: Interval = Interval { min: 0.0, max: 0.999 };

/// Convert a linear color to an opaque 8-bit pixel.
pub fn quantize(color: Color) -> Rgba<u8> {
    let to_byte = |c: f64| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    Rgba([to_byte(color.x), to_byte(color.y), to_byte(color.z), 255])
}

/// A finished or cancelled render.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// Row 0 is the top of the image
    pub image: RgbaImage,
    pub pixels_rendered: usize,
    /// True when the render stopped before every pixel was sampled
    pub cancelled: bool,
    pub elapsed: Duration,
}

/// Render synchronously on the rayon thread pool.
///
/// `on_progress` receives the completed percentage after every pixel, in
/// increasing order. `is_cancelled` is polled before each pixel; once it
/// returns true no further pixels start and the partial image is returned.
/// A callback that panics stops the render the same way.
pub fn render_image<P, C>(
    settings: &RenderSettings,
    scene: &Scene,
    on_progress: P,
    is_cancelled: C,
) -> Result<RenderOutput, RenderError>
where
    P: Fn(f64) + Sync,
    C: Fn() -> bool + Sync,
{
    settings.validate()?;
    Ok(render_validated(settings, scene, &on_progress, &is_cancelled))
}

/// Why the parallel loop stopped early.
enum Stop {
    Cancelled,
    CallbackPanicked,
}

/// Run a user callback, turning a panic into a [`Stop`].
fn guarded<T>(callback: impl FnOnce() -> T) -> Result<T, Stop> {
    panic::catch_unwind(AssertUnwindSafe(callback)).map_err(|_| Stop::CallbackPanicked)
}

pub(crate) fn render_validated(
    settings: &RenderSettings,
    scene: &Scene,
    on_progress: &(dyn Fn(f64) + Sync),
    is_cancelled: &(dyn Fn() -> bool + Sync),
) -> RenderOutput {
    let start = Instant::now();
    let seed = settings.seed.unwrap_or_else(rand::random);
    let (width, height) = (settings.width, settings.height);
    let total = settings.pixel_count();

    log::info!(
        "Rendering {}x{} at {} spp, {} objects (seed {})",
        width,
        height,
        settings.samples_per_pixel,
        scene.len(),
        seed
    );

    let world = World::from_scene(scene);
    let camera = Camera::from_settings(settings, scene);
    let mut image = fill_background(settings, &camera, &world);

    let done = Mutex::new(0usize);
    let result = image
        .par_chunks_exact_mut(4)
        .enumerate()
        .try_for_each(|(index, pixel)| {
            if guarded(is_cancelled)? {
                return Err(Stop::Cancelled);
            }

            let x = (index % width as usize) as u32;
            let y = (index / width as usize) as u32;
            let mut rng = pixel_rng(seed, index);
            let color = render_pixel(&camera, &world, settings, x, y, &mut rng);
            pixel.copy_from_slice(&quantize(color).0);

            let mut done = done.lock().unwrap_or_else(PoisonError::into_inner);
            *done += 1;
            let percent = 100.0 * *done as f64 / total as f64;
            guarded(|| on_progress(percent))
        });

    // Rows were sampled bottom-up
    image::imageops::flip_vertical_in_place(&mut image);

    let pixels_rendered = done.into_inner().unwrap_or_else(PoisonError::into_inner);
    let cancelled = result.is_err();
    let elapsed = start.elapsed();

    if matches!(result, Err(Stop::CallbackPanicked)) {
        log::error!(
            "Render callback panicked; stopped after {} of {} pixels",
            pixels_rendered,
            total
        );
    } else if cancelled {
        log::warn!(
            "Render cancelled after {} of {} pixels ({:.2?})",
            pixels_rendered,
            total,
            elapsed
        );
    } else {
        log::info!("Render complete in {:.2?}", elapsed);
    }

    RenderOutput {
        image,
        pixels_rendered,
        cancelled,
        elapsed,
    }
}

/// Image showing the background through every pixel center.
///
/// Pixels a cancelled render never reaches keep this color. The buffer is
/// still in bottom-up row order.
fn fill_background(settings: &RenderSettings, camera: &Camera, world: &World) -> RgbaImage {
    let (s_den, t_den) = grid_denominators(settings);
    let background = world.background();

    RgbaImage::from_fn(settings.width, settings.height, |x, y| {
        let s = (x as f64 + 0.5) / s_den;
        let t = (y as f64 + 0.5) / t_den;
        quantize(background.color_for(camera.direction_through(s, t)))
    })
}

fn grid_denominators(settings: &RenderSettings) -> (f64, f64) {
    (
        settings.width.saturating_sub(1).max(1) as f64,
        settings.height.saturating_sub(1).max(1) as f64,
    )
}
