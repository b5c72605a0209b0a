use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use imaginarium::FilterMode;
use startrail::{Config, MaskSizePolicy, Pipeline, PixelPoint};

/// Synthesizes a star-trail image from a single night-sky photo.
///
/// Values given on the command line override the configuration file.
#[derive(Parser, Debug)]
#[command(version, allow_negative_numbers = true)]
struct Args {
    /// Configuration file (.toml, .yaml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input photo (PNG, JPEG or TIFF)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output image; the directory is created if needed
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Observer latitude in degrees, north positive
    #[arg(long)]
    latitude: Option<f64>,

    /// Observer longitude in degrees, east positive
    #[arg(long)]
    longitude: Option<f64>,

    /// Observer elevation in meters
    #[arg(long)]
    elevation: Option<f64>,

    /// Observation time, ISO 8601 (naive times are UTC)
    #[arg(short, long)]
    time: Option<String>,

    /// Rotation between consecutive layers, in degrees
    #[arg(long)]
    step: Option<f64>,

    /// Total rotation, in degrees
    #[arg(long)]
    total: Option<f64>,

    /// Star to rotate around
    #[arg(long)]
    target: Option<String>,

    /// Foreground mask from a segmentation run
    #[arg(long)]
    mask: Option<PathBuf>,

    /// What to do when the mask size differs from the photo: fail or resize
    #[arg(long)]
    mask_size_policy: Option<MaskSizePolicy>,

    /// Pivot x in pixels; skips the ephemeris together with --pivot-y
    #[arg(long, requires = "pivot_y")]
    pivot_x: Option<i32>,

    /// Pivot y in pixels
    #[arg(long, requires = "pivot_x")]
    pivot_y: Option<i32>,

    /// Interpolation filter: nearest, bilinear, bicubic or lanczos3
    #[arg(long)]
    filter: Option<FilterMode>,

    /// Number of partial buffers accumulated in parallel
    #[arg(long)]
    workers: Option<usize>,

    /// Log progress every this many layers
    #[arg(long)]
    progress_interval: Option<usize>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Directory for rolling log files
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Write the effective configuration to this file
    #[arg(long)]
    save_config: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(latitude) = self.latitude {
            config.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            config.longitude = longitude;
        }
        if let Some(elevation) = self.elevation {
            config.elevation = elevation;
        }
        if let Some(time) = &self.time {
            config.observation_time = time.clone();
        }
        if let Some(step) = self.step {
            config.step_rotation_degrees = step;
        }
        if let Some(total) = self.total {
            config.total_rotation_degrees = total;
        }
        if let Some(target) = &self.target {
            config.target = target.clone();
        }
        if let Some(mask) = &self.mask {
            config.mask_path = Some(mask.clone());
        }
        if let Some(policy) = self.mask_size_policy {
            config.mask_size_policy = policy;
        }
        if let (Some(x), Some(y)) = (self.pivot_x, self.pivot_y) {
            config.pivot_override = Some(PixelPoint::new(x, y));
        }
        if let Some(filter) = self.filter {
            config.filter = filter;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(interval) = self.progress_interval {
            config.progress_interval = interval;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    common::log_setup::setup_logging(&args.log_level, &args.log_dir)
        .context("failed to initialize logging")?;

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => Config::default(),
    };
    args.apply(&mut config);

    if let Some(path) = &args.save_config {
        config
            .save(path)
            .with_context(|| format!("failed to save configuration {}", path.display()))?;
        tracing::info!("effective configuration written to {}", path.display());
    }

    let summary = Pipeline::from_config(&config)
        .run(&config)
        .context("star trail generation failed")?;

    if summary.cancelled {
        tracing::warn!(
            "stopped early: {}/{} layers in {}",
            summary.layers_merged,
            summary.total_layers,
            summary.output_path.display()
        );
    } else {
        tracing::info!(
            "{} layers around {} written to {}",
            summary.total_layers,
            summary.pivot,
            summary.output_path.display()
        );
    }

    Ok(())
}
