//! Materials describe how light interacts with surfaces.
//!
//! Every variant answers two questions for the shading loop: does an
//! incoming ray scatter (and with what attenuation), and how much light
//! does the surface emit on its own.

use prism_core::MaterialSpec;
use prism_math::{near_zero, reflect, refract, Channel, Color, Point3, Ray};
use rand::RngCore;

use crate::hittable::HitRecord;
use crate::sampling::{gen_f64, gen_range, random_in_unit_sphere, random_unit_vector};
use crate::texture::Texture;

/// Result of a successful scatter.
#[derive(Debug, Clone, Copy)]
pub struct ScatterRecord {
    /// Fraction of the scattered ray's radiance that reaches the viewer
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Scattering material.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
    DiffuseLight(DiffuseLight),
}

impl Material {
    pub fn from_spec(spec: &MaterialSpec) -> Self {
        match spec {
            MaterialSpec::Lambertian { texture } => {
                Material::Lambertian(Lambertian::new(Texture::from_spec(texture)))
            }
            MaterialSpec::Metal { color, fuzz } => Material::Metal(Metal::new(*color, *fuzz)),
            MaterialSpec::DispersiveDielectric { b, c } => {
                Material::Dielectric(Dielectric::new(*b, *c))
            }
            MaterialSpec::DiffuseLight { color } => {
                Material::DiffuseLight(DiffuseLight::new(Texture::Solid(*color)))
            }
        }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed. The scattered ray keeps the
    /// incoming ray's channel.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterRecord> {
        match self {
            Material::Lambertian(m) => m.scatter(ray_in, rec, rng),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => m.scatter(ray_in, rec, rng),
            Material::DiffuseLight(_) => None,
        }
    }

    /// Light emitted at the given surface coordinates and point.
    pub fn emitted(&self, u: f64, v: f64, p: Point3) -> Color {
        match self {
            Material::DiffuseLight(m) => m.emit.value(u, v, p),
            _ => Color::ZERO,
        }
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambertian {
    albedo: Texture,
}

impl Lambertian {
    pub fn new(albedo: Texture) -> Self {
        Self { albedo }
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterRecord> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        Some(ScatterRecord {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, scatter_direction, ray_in.channel()),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterRecord> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let direction = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Fuzz can push the reflection below the surface
        if direction.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(ScatterRecord {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, direction, ray_in.channel()),
        })
    }
}

/// Glass with a wavelength-dependent index of refraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Dielectric {
    b: [f64; 3],
    c: [f64; 3],
}

impl Dielectric {
    pub fn new(b: [f64; 3], c: [f64; 3]) -> Self {
        let material = Self { b, c };
        for channel in Channel::ALL {
            let (low, high) = channel.band_nm();
            for nm in [low, high] {
                let n = material.refractive_index(nm / 1e3);
                if !(n.is_finite() && n > 0.0) {
                    log::warn!(
                        "Dielectric index degenerates at {} nm (n = {}), treating it as 1",
                        nm,
                        n
                    );
                }
            }
        }
        material
    }

    /// Index of refraction at a wavelength given in micrometers.
    pub fn refractive_index(&self, wavelength_um: f64) -> f64 {
        let l2 = wavelength_um * wavelength_um;
        let n_sq = 1.0
            + self
                .b
                .iter()
                .zip(&self.c)
                .map(|(b, c)| b * l2 / (l2 - c))
                .sum::<f64>();
        n_sq.sqrt()
    }

    /// Index for a wavelength drawn uniformly from the channel's band.
    fn sample_index(&self, channel: Channel, rng: &mut dyn RngCore) -> f64 {
        let (low, high) = channel.band_nm();
        let n = self.refractive_index(gen_range(rng, low, high) / 1e3);
        if n.is_finite() && n > 0.0 {
            n
        } else {
            1.0
        }
    }

    /// Schlick's approximation for reflectance.
    fn reflectance(cosine: f64, refraction_ratio: f64) -> f64 {
        let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
        // Matched indices form no interface
        if r0 == 0.0 {
            return 0.0;
        }
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterRecord> {
        let n = self.sample_index(ray_in.channel(), rng);
        let refraction_ratio = if rec.front_face { 1.0 / n } else { n };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || Self::reflectance(cos_theta, refraction_ratio) > gen_f64(rng)
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        Some(ScatterRecord {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction, ray_in.channel()),
        })
    }
}

/// Diffuse light emitter.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffuseLight {
    emit: Texture,
}

impl DiffuseLight {
    pub fn new(emit: Texture) -> Self {
        Self { emit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MaterialId;
    use prism_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Hit on the plane y = 0 seen from above.
    fn hit_from_above(ray: &Ray) -> HitRecord {
        HitRecord::new(ray, 1.0, Vec3::Y, (0.25, 0.5), MaterialId::default())
    }

    #[test]
    fn test_lambertian_stays_above_surface() {
        let material = Material::from_spec(&MaterialSpec::matte(Color::splat(0.5)));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), -Vec3::Y, Channel::Blue);
        let rec = hit_from_above(&ray);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..200 {
            let s = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert!(s.scattered.direction().dot(rec.normal) >= 0.0);
            assert_eq!(s.attenuation, Color::splat(0.5));
            assert_eq!(s.scattered.channel(), Channel::Blue);
            assert_eq!(s.scattered.origin(), rec.p);
        }
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let material = Material::Metal(Metal::new(Color::ONE, 0.0));
        let ray = Ray::new_simple(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = hit_from_above(&ray);
        let mut rng = StdRng::seed_from_u64(6);

        let s = material.scatter(&ray, &rec, &mut rng).unwrap();
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((s.scattered.direction() - expected).length() < 1e-12);
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        assert_eq!(Metal::new(Color::ONE, 4.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).fuzz(), 0.0);
    }

    #[test]
    fn test_metal_absorbs_rays_pushed_below_surface() {
        // Grazing incidence with full fuzz sends some reflections into the surface
        let material = Material::Metal(Metal::new(Color::ONE, 1.0));
        let ray = Ray::new_simple(Vec3::new(-1.0, 0.01, 0.0), Vec3::new(1.0, -0.01, 0.0));
        let rec = hit_from_above(&ray);
        let mut rng = StdRng::seed_from_u64(7);

        let absorbed = (0..500)
            .filter(|_| material.scatter(&ray, &rec, &mut rng).is_none())
            .count();
        assert!(absorbed > 0);
    }

    #[test]
    fn test_light_emits_and_never_scatters() {
        let material = Material::from_spec(&MaterialSpec::DiffuseLight {
            color: Color::new(4.0, 4.0, 4.0),
        });
        let ray = Ray::new_simple(Vec3::Y, -Vec3::Y);
        let rec = hit_from_above(&ray);
        let mut rng = StdRng::seed_from_u64(8);

        assert!(material.scatter(&ray, &rec, &mut rng).is_none());
        assert_eq!(material.emitted(0.0, 0.0, Vec3::ZERO), Color::splat(4.0));
    }

    #[test]
    fn test_non_emitters_emit_black() {
        let material = Material::from_spec(&MaterialSpec::bk7_glass());
        assert_eq!(material.emitted(0.5, 0.5, Vec3::ONE), Color::ZERO);
    }

    #[test]
    fn test_bk7_disperses() {
        let glass = Dielectric::new(
            [1.039_612_12, 0.231_792_344, 1.010_469_45],
            [0.006_000_698_67, 0.020_017_914_4, 103.560_653],
        );
        let red = glass.refractive_index(0.7);
        let blue = glass.refractive_index(0.46);

        // Normal dispersion: shorter wavelengths bend more
        assert!(blue > red);
        assert!((red - 1.513).abs() < 0.005);
        assert!((blue - 1.525).abs() < 0.005);
    }

    #[test]
    fn test_bk7_preset_matches_catalog_index() {
        let Material::Dielectric(glass) = Material::from_spec(&MaterialSpec::bk7_glass()) else {
            panic!("BK7 preset should build a dielectric");
        };
        // Sodium d-line, catalog n_d = 1.5168
        assert!((glass.refractive_index(0.587_56) - 1.5168).abs() < 1e-4);
    }

    #[test]
    fn test_index_matched_glass_passes_straight_through() {
        let material = Material::from_spec(&MaterialSpec::index_matched_glass());
        let mut rng = StdRng::seed_from_u64(9);

        for channel in Channel::ALL {
            for dir in [
                Vec3::new(0.0, -1.0, 0.0),
                Vec3::new(0.6, -0.8, 0.0),
                Vec3::new(0.99, -0.05, 0.1),
            ] {
                let ray = Ray::new(Vec3::Y, dir, channel);
                let rec = hit_from_above(&ray);
                let s = material.scatter(&ray, &rec, &mut rng).unwrap();

                let bend = (s.scattered.direction().normalize() - dir.normalize()).length();
                assert!(bend < 1e-9, "ray bent by {bend} for {dir}");
                assert_eq!(s.attenuation, Color::ONE);
            }
        }
    }

    #[test]
    fn test_total_internal_reflection_from_inside() {
        let material = Material::from_spec(&MaterialSpec::bk7_glass());
        let mut rng = StdRng::seed_from_u64(10);

        // Leaving the glass at a shallow angle (inside, so the normal was flipped)
        let dir = Vec3::new(0.95, 0.1, 0.0).normalize();
        let ray = Ray::new(Vec3::ZERO, dir, Channel::Red);
        let rec = HitRecord::new(&ray, 1.0, Vec3::Y, (0.0, 0.0), MaterialId::default());
        assert!(!rec.front_face);

        for _ in 0..50 {
            let s = material.scatter(&ray, &rec, &mut rng).unwrap();
            // Reflected back inside the glass
            assert!(s.scattered.direction().y < 0.0);
        }
    }
}
