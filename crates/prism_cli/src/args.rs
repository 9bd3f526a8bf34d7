//! Command line arguments.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use prism_core::RenderSettings;

/// Log levels selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneChoice {
    /// Matte, glass and metal spheres on a ground sphere under a sky
    Demo,
    /// Randomly placed spheres drawn from a fixed material palette
    Spheres,
    /// Glass spheres lit by a single light to show dispersion
    Glass,
}

/// Render one of the built-in scenes to a PNG file.
#[derive(Debug, Parser)]
#[command(name = "prism")]
#[command(about = "A dispersive Monte Carlo path tracer", version)]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "demo")]
    pub scene: SceneChoice,

    /// Output image path
    #[arg(short, long, default_value = "prism.png")]
    pub output: PathBuf,

    /// JSON file with render settings; flags below override its values
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Lens diameter, 0 for a pinhole camera
    #[arg(long)]
    pub aperture: Option<f64>,

    /// Vertical field of view in degrees
    #[arg(long)]
    pub fov: Option<f64>,

    /// Random seed for reproducible renders and scenes
    #[arg(long)]
    pub seed: Option<u64>,

    /// Trace one ray per sample instead of one per color channel
    #[arg(long)]
    pub no_dispersion: bool,

    /// Cancel the render once this percentage of pixels is done
    #[arg(long, value_parser = parse_percent)]
    pub cancel_after: Option<f64>,

    /// Set the logging level; RUST_LOG takes precedence
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Defaults, then the settings file, then explicit flags.
    pub fn render_settings(&self) -> Result<RenderSettings> {
        let mut settings = match &self.settings {
            Some(path) => load_settings(path)?,
            None => RenderSettings::default(),
        };

        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(samples) = self.samples {
            settings.samples_per_pixel = samples;
        }
        if let Some(aperture) = self.aperture {
            settings.aperture = aperture;
        }
        if let Some(fov) = self.fov {
            settings.vfov_degrees = fov;
        }
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if self.no_dispersion {
            settings.dispersion = false;
        }

        settings.validate().context("invalid render settings")?;
        Ok(settings)
    }
}

fn load_settings(path: &Path) -> Result<RenderSettings> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse settings file {}", path.display()))
}

fn parse_percent(value: &str) -> Result<f64, String> {
    let percent: f64 = value.parse().map_err(|_| format!("`{value}` is not a number"))?;
    if (0.0..=100.0).contains(&percent) {
        Ok(percent)
    } else {
        Err(format!("`{value}` is not between 0 and 100"))
    }
}
