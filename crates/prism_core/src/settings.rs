//! Render settings.

use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

/// Render configuration supplied alongside a scene.
///
/// Can be loaded from JSON; missing fields take their default value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Camera rays averaged per pixel
    pub samples_per_pixel: u32,
    /// Lens diameter; 0 gives a pinhole camera with everything in focus
    pub aperture: f64,
    /// Vertical field of view in degrees
    pub vfov_degrees: f64,
    /// Maximum number of bounces per path
    pub max_depth: u32,
    /// Trace each sample once per color channel so glass can disperse light
    pub dispersion: bool,
    /// Fixed random seed; `None` draws a fresh seed per render
    pub seed: Option<u64>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 400,
            height: 225,
            samples_per_pixel: 10,
            aperture: 0.0,
            vfov_degrees: 45.0,
            max_depth: 50,
            dispersion: true,
            seed: None,
        }
    }
}

impl RenderSettings {
    /// Create validated settings with default camera and quality knobs.
    pub fn new(width: u32, height: u32, samples_per_pixel: u32, aperture: f64) -> SceneResult<Self> {
        let settings = Self {
            width,
            height,
            samples_per_pixel,
            aperture,
            ..Self::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Set the vertical field of view.
    pub fn with_fov(mut self, vfov_degrees: f64) -> Self {
        self.vfov_degrees = vfov_degrees;
        self
    }

    /// Set a fixed random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable per-channel tracing.
    pub fn with_dispersion(mut self, dispersion: bool) -> Self {
        self.dispersion = dispersion;
        self
    }

    /// Check every field, reporting the first problem found.
    pub fn validate(&self) -> SceneResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::invalid(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(SceneError::invalid("samples per pixel must be at least 1"));
        }
        if !(self.aperture.is_finite() && self.aperture >= 0.0) {
            return Err(SceneError::invalid(format!(
                "aperture must be non-negative, got {}",
                self.aperture
            )));
        }
        if !(self.vfov_degrees > 0.0 && self.vfov_degrees < 180.0) {
            return Err(SceneError::invalid(format!(
                "field of view must be between 0 and 180 degrees, got {}",
                self.vfov_degrees
            )));
        }
        if self.max_depth == 0 {
            return Err(SceneError::invalid("max depth must be at least 1"));
        }
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(RenderSettings::default().validate().is_ok());
    }

    #[test]
    fn test_zero_samples_rejected() {
        let result = RenderSettings::new(16, 16, 0, 0.0);
        assert!(matches!(result, Err(SceneError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(RenderSettings::new(0, 16, 1, 0.0).is_err());
        assert!(RenderSettings::new(16, 0, 1, 0.0).is_err());
    }

    #[test]
    fn test_negative_aperture_rejected() {
        assert!(RenderSettings::new(16, 16, 1, -0.5).is_err());
        assert!(RenderSettings::new(16, 16, 1, 2.0).is_ok());
    }

    #[test]
    fn test_fov_bounds() {
        let settings = RenderSettings::new(16, 16, 1, 0.0).unwrap();
        assert!(settings.with_fov(180.0).validate().is_err());
        assert!(settings.with_fov(0.0).validate().is_err());
        assert!(settings.with_fov(90.0).validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: RenderSettings =
            serde_json::from_str(r#"{ "width": 64, "height": 32, "seed": 7 }"#).unwrap();
        assert_eq!(settings.width, 64);
        assert_eq!(settings.height, 32);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.samples_per_pixel, RenderSettings::default().samples_per_pixel);
        assert_eq!(settings.aspect_ratio(), 2.0);
        assert_eq!(settings.pixel_count(), 2048);
    }
}
