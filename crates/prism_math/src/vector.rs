//! Free-standing vector helpers used by the scattering code.

use crate::Vec3;

/// Threshold below which every component counts as zero.
const NEAR_ZERO_EPS: f64 = 1e-8;

/// Returns true if the vector is close to zero in all dimensions.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.x.abs() < NEAR_ZERO_EPS && v.y.abs() < NEAR_ZERO_EPS && v.z.abs() < NEAR_ZERO_EPS
}

/// Reflect `v` about the surface normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with normal `n`.
///
/// `etai_over_etat` is the ratio of the refractive indices on the incoming
/// and outgoing sides. Callers must check for total internal reflection first.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::splat(1e-9)));
        assert!(!near_zero(Vec3::new(1e-9, 1e-3, 0.0)));
    }

    #[test]
    fn test_reflect_flips_normal_component() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        let r = reflect(v, Vec3::Y);
        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_unit_ratio_is_identity() {
        let uv = Vec3::new(0.3, -0.8, 0.1).normalize();
        let out = refract(uv, Vec3::Y, 1.0);
        assert!((out - uv).length() < 1e-12);
    }

    #[test]
    fn test_refract_bends_towards_normal() {
        // Entering a denser medium the tangential component shrinks
        let uv = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = refract(uv, Vec3::Y, 1.0 / 1.5);
        assert!(out.x.abs() < uv.x.abs());
        assert!((out.length() - 1.0).abs() < 1e-9);
    }
}
