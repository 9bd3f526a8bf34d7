//! Built-in scenes.

use prism_core::{Background, GeometryObject, MaterialSpec, Scene, SceneResult, Shape, TextureSpec};
use prism_math::{Color, Point3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::args::SceneChoice;

/// Layout used by the `spheres` scene when no seed is given.
const DEFAULT_LAYOUT_SEED: u64 = 2020;

/// Sphere count of the `spheres` scene.
const RANDOM_SPHERE_COUNT: usize = 16;

pub fn build(choice: SceneChoice, seed: Option<u64>) -> SceneResult<Scene> {
    match choice {
        SceneChoice::Demo => demo(),
        SceneChoice::Spheres => random_spheres(seed.unwrap_or(DEFAULT_LAYOUT_SEED), RANDOM_SPHERE_COUNT),
        SceneChoice::Glass => glass(),
    }
}

fn sphere(center: Point3, radius: f64, material: MaterialSpec) -> SceneResult<GeometryObject> {
    GeometryObject::new(Shape::sphere(center, radius), material)
}

fn ground(albedo: Color) -> SceneResult<GeometryObject> {
    sphere(Point3::new(0.0, -100.5, -1.0), 100.0, MaterialSpec::matte(albedo))
}

fn demo() -> SceneResult<Scene> {
    let objects = [
        ground(Color::new(0.8, 0.8, 0.0))?,
        sphere(Point3::new(0.0, 0.0, -1.0), 0.5, MaterialSpec::matte(Color::new(0.1, 0.2, 0.5)))?,
        sphere(Point3::new(-1.0, 0.0, -1.0), 0.5, MaterialSpec::bk7_glass())?,
        sphere(
            Point3::new(1.0, 0.0, -1.0),
            0.5,
            MaterialSpec::Metal {
                color: Color::new(0.8, 0.6, 0.2),
                fuzz: 0.0,
            },
        )?,
    ];

    Ok(Scene::new(Background::sky(), Point3::new(0.0, 0.5, 3.0), Point3::new(0.0, 0.0, -1.0))?
        .with_objects(objects))
}

/// Materials the `spheres` scene picks from.
fn palette() -> [MaterialSpec; 5] {
    [
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
    ]
}

/// `count` spheres with integer centers in a 10-unit cube in front of the
/// camera and radii between 1 and 3, on a white background.
fn random_spheres(seed: u64, count: usize) -> SceneResult<Scene> {
    let mut rng = StdRng::seed_from_u64(seed);
    let palette = palette();

    let mut scene = Scene::new(Background::Solid(Color::ONE), Point3::new(0.0, 0.0, 5.0), Point3::ZERO)?;
    for _ in 0..count {
        let center = Point3::new(
            rng.gen_range(-5..5) as f64,
            rng.gen_range(-5..5) as f64,
            rng.gen_range(-15..-5) as f64,
        );
        let radius = rng.gen_range(1..=3) as f64;
        let material = palette[rng.gen_range(0..palette.len())].clone();
        scene.add_object(sphere(center, radius, material)?);
    }
    Ok(scene)
}

fn glass() -> SceneResult<Scene> {
    let mut objects = vec![
        ground(Color::splat(0.6))?,
        sphere(
            Point3::new(0.0, 6.0, -3.0),
            2.0,
            MaterialSpec::DiffuseLight {
                color: Color::splat(6.0),
            },
        )?,
        sphere(
            Point3::new(2.2, 0.3, -2.5),
            0.8,
            MaterialSpec::Metal {
                color: Color::splat(0.9),
                fuzz: 0.05,
            },
        )?,
    ];
    for (x, radius) in [(-1.6, 0.5), (0.0, 0.7), (1.0, 0.35)] {
        objects.push(sphere(Point3::new(x, radius - 0.5, -1.0), radius, MaterialSpec::bk7_glass())?);
    }

    Ok(Scene::new(
        Background::Solid(Color::splat(0.02)),
        Point3::new(0.0, 1.0, 4.0),
        Point3::new(0.0, 0.0, -1.0),
    )?
    .with_objects(objects))
}
