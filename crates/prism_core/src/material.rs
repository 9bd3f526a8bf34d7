//! Material and texture descriptions.
//!
//! These are plain data: the renderer turns each distinct `MaterialSpec` into
//! a scattering material once per render and shares it between objects.

use std::fmt;

use prism_math::Color;

use crate::error::{SceneError, SceneResult};

/// Surface color lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum TextureSpec {
    /// The same color everywhere.
    Solid(Color),

    /// 2D checker over the surface coordinates `(u, v)`.
    ///
    /// `scale` is the size of one cell in texture space, where `u` and `v`
    /// both run over [0, 1].
    Checker { even: Color, odd: Color, scale: f64 },
}

impl TextureSpec {
    /// Checker with ten cells along each texture axis.
    pub fn checker(even: Color, odd: Color) -> Self {
        TextureSpec::Checker {
            even,
            odd,
            scale: 0.1,
        }
    }

    pub fn validate(&self) -> SceneResult<()> {
        match self {
            TextureSpec::Solid(_) => Ok(()),
            TextureSpec::Checker { scale, .. } => {
                if scale.is_finite() && *scale > 0.0 {
                    Ok(())
                } else {
                    Err(SceneError::invalid(format!(
                        "checker scale must be positive, got {scale}"
                    )))
                }
            }
        }
    }
}

impl fmt::Display for TextureSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureSpec::Solid(c) => write!(f, "solid {}", Rgb(*c)),
            TextureSpec::Checker { even, odd, .. } => {
                write!(f, "checker {}/{}", Rgb(*even), Rgb(*odd))
            }
        }
    }
}

/// How light interacts with a surface.
#[derive(Clone, Debug, PartialEq)]
pub enum MaterialSpec {
    /// Ideal diffuse reflector.
    Lambertian { texture: TextureSpec },

    /// Specular reflector; `fuzz` in [0, 1] roughens the reflection.
    Metal { color: Color, fuzz: f64 },

    /// Glass whose refractive index depends on wavelength.
    ///
    /// `b` and `c` are the three coefficient pairs of the dispersion law
    /// `n^2 = 1 + sum(b_i * l^2 / (l^2 - c_i))`, with `l` in micrometers.
    DispersiveDielectric { b: [f64; 3], c: [f64; 3] },

    /// Emits light and never scatters.
    DiffuseLight { color: Color },
}

impl MaterialSpec {
    /// Diffuse material with a solid albedo.
    pub fn matte(albedo: Color) -> Self {
        MaterialSpec::Lambertian {
            texture: TextureSpec::Solid(albedo),
        }
    }

    /// Schott BK7 crown glass.
    pub fn bk7_glass() -> Self {
        MaterialSpec::DispersiveDielectric {
            b: [1.039_612_12, 0.231_792_344, 1.010_469_45],
            c: [0.006_000_698_67, 0.020_017_914_4, 103.560_653],
        }
    }

    /// Dielectric with no dispersion and an index of exactly 1.
    pub fn index_matched_glass() -> Self {
        MaterialSpec::DispersiveDielectric {
            b: [0.0; 3],
            c: [0.0; 3],
        }
    }

    pub fn validate(&self) -> SceneResult<()> {
        match self {
            MaterialSpec::Lambertian { texture } => texture.validate(),
            MaterialSpec::Metal { fuzz, .. } if fuzz.is_nan() => {
                Err(SceneError::invalid("metal fuzz is NaN"))
            }
            MaterialSpec::DispersiveDielectric { b, c }
                if b.iter().chain(c.iter()).any(|k| !k.is_finite()) =>
            {
                Err(SceneError::invalid(
                    "dispersion coefficients must be finite",
                ))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for MaterialSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialSpec::Lambertian { texture } => write!(f, "matte ({texture})"),
            MaterialSpec::Metal { color, fuzz } => {
                write!(f, "metal {} fuzz {:.2}", Rgb(*color), fuzz)
            }
            MaterialSpec::DispersiveDielectric { .. } => write!(f, "glass"),
            MaterialSpec::DiffuseLight { color } => write!(f, "light source {}", Rgb(*color)),
        }
    }
}

/// Formats a color as `rgb(r, g, b)` with two decimals.
struct Rgb(Color);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({:.2}, {:.2}, {:.2})", self.0.x, self.0.y, self.0.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptions() {
        let checker = MaterialSpec::Lambertian {
            texture: TextureSpec::checker(Color::ZERO, Color::ONE),
        };
        assert_eq!(
            checker.to_string(),
            "matte (checker rgb(0.00, 0.00, 0.00)/rgb(1.00, 1.00, 1.00))"
        );
        assert_eq!(MaterialSpec::bk7_glass().to_string(), "glass");
        assert!(MaterialSpec::DiffuseLight { color: Color::ONE }
            .to_string()
            .starts_with("light source"));
    }

    #[test]
    fn test_checker_scale_must_be_positive() {
        let texture = TextureSpec::Checker {
            even: Color::ZERO,
            odd: Color::ONE,
            scale: 0.0,
        };
        assert!(matches!(
            texture.validate(),
            Err(SceneError::InvalidConfiguration(_))
        ));
        assert!(TextureSpec::checker(Color::ZERO, Color::ONE).validate().is_ok());
    }

    #[test]
    fn test_dielectric_coefficients_must_be_finite() {
        let glass = MaterialSpec::DispersiveDielectric {
            b: [1.0, f64::NAN, 0.0],
            c: [0.0; 3],
        };
        assert!(glass.validate().is_err());
        assert!(MaterialSpec::bk7_glass().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_fuzz_is_accepted() {
        // Fuzz is clamped by the renderer, not rejected
        let metal = MaterialSpec::Metal {
            color: Color::ONE,
            fuzz: 3.0,
        };
        assert!(metal.validate().is_ok());
    }
}
