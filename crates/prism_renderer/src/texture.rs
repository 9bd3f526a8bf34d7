//! Surface color lookup.

use prism_core::TextureSpec;
use prism_math::{Color, Point3};

/// Texture evaluated at a hit point.
#[derive(Debug, Clone, PartialEq)]
pub enum Texture {
    Solid(Color),
    /// 2D checker over `(u, v)`.
    Checker {
        even: Color,
        odd: Color,
        inv_scale: f64,
    },
}

impl Texture {
    pub fn from_spec(spec: &TextureSpec) -> Self {
        match *spec {
            TextureSpec::Solid(color) => Texture::Solid(color),
            TextureSpec::Checker { even, odd, scale } => Texture::Checker {
                even,
                odd,
                inv_scale: 1.0 / scale,
            },
        }
    }

    /// Color at surface coordinates `(u, v)` and world point `p`.
    pub fn value(&self, u: f64, v: f64, _p: Point3) -> Color {
        match *self {
            Texture::Solid(color) => color,
            Texture::Checker {
                even,
                odd,
                inv_scale,
            } => {
                let iu = (u * inv_scale).floor() as i64;
                let iv = (v * inv_scale).floor() as i64;
                if (iu + iv).rem_euclid(2) == 0 {
                    even
                } else {
                    odd
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_is_constant() {
        let t = Texture::from_spec(&TextureSpec::Solid(Color::new(0.1, 0.2, 0.3)));
        assert_eq!(t.value(0.0, 0.0, Point3::ZERO), Color::new(0.1, 0.2, 0.3));
        assert_eq!(t.value(0.7, 0.9, Point3::ONE), Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_checker_alternates() {
        let t = Texture::from_spec(&TextureSpec::checker(Color::ZERO, Color::ONE));
        let p = Point3::ZERO;

        assert_eq!(t.value(0.05, 0.05, p), Color::ZERO);
        assert_eq!(t.value(0.15, 0.05, p), Color::ONE);
        assert_eq!(t.value(0.15, 0.15, p), Color::ZERO);
        assert_eq!(t.value(0.05, 0.95, p), Color::ONE);
    }
}
