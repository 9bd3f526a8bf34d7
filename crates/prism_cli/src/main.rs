use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, error, info, warn};
use prism_renderer::{RenderEvent, RenderManager, RenderOutput};

mod args;
mod logger;
mod scenes;

use args::Args;
use logger::init_logger;

/// Progress is logged every this many percent.
const PROGRESS_LOG_STEP: f64 = 10.0;

fn main() -> ExitCode {
    let args = Args::parse();

    init_logger(args.log_level.into());
    info!("Prism {}", env!("CARGO_PKG_VERSION"));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let settings = args.render_settings()?;
    let scene = scenes::build(args.scene, settings.seed).context("failed to build scene")?;

    info!("Scene {:?} with {} objects", args.scene, scene.len());
    for description in scene.descriptions() {
        debug!("  {}", description);
    }

    let manager = RenderManager::new();
    let handle = manager.launch(settings, scene)?;

    let mut next_report = PROGRESS_LOG_STEP;
    let output: RenderOutput = loop {
        match handle.recv() {
            Some(RenderEvent::Progress(percent)) => {
                while percent >= next_report {
                    info!("{:.0}% done", next_report);
                    next_report += PROGRESS_LOG_STEP;
                }
                if let Some(limit) = args.cancel_after {
                    if percent >= limit && !handle.is_cancel_requested() {
                        warn!("Cancelling render at {:.1}%", percent);
                        handle.cancel();
                    }
                }
            }
            Some(RenderEvent::Finished(output)) => break output,
            None => bail!("render thread exited without delivering an image"),
        }
    };

    if output.cancelled {
        warn!(
            "Saving partial image: {} of {} pixels rendered",
            output.pixels_rendered,
            settings.pixel_count()
        );
    }

    output
        .image
        .save(&args.output)
        .with_context(|| format!("failed to save image to {}", args.output.display()))?;
    info!(
        "Saved {} ({:.2?})",
        args.output.display(),
        output.elapsed
    );

    Ok(())
}
