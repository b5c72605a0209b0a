//! Star-trail synthesis: rotate one frame around a pivot again and again and
//! keep the per-channel maximum of every rotated copy.

mod progress;


use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use imaginarium::{Blend, BlendMode, ColorFormat, FilterMode, Image, Transform, Vec2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub use progress::{ProgressCallback, TrailProgress};

use crate::error::{Error, Result};
use crate::geo::PixelPoint;

pub const DEFAULT_PROGRESS_INTERVAL: usize = 10;

/// Rotation schedule: layer `i` is rotated by `(i + 1) * step` degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailParameters {
    step_rotation_degrees: f64,
    total_rotation_degrees: f64,
}

impl TrailParameters {
    pub fn new(step_rotation_degrees: f64, total_rotation_degrees: f64) -> Result<Self> {
        if !step_rotation_degrees.is_finite() || step_rotation_degrees <= 0.0 {
            return Err(Error::InvalidParameters(format!(
                "step rotation must be a positive number of degrees, got {}",
                step_rotation_degrees
            )));
        }
        if !total_rotation_degrees.is_finite() || total_rotation_degrees <= 0.0 {
            return Err(Error::InvalidParameters(format!(
                "total rotation must be a positive number of degrees, got {}",
                total_rotation_degrees
            )));
        }

        let params = Self {
            step_rotation_degrees,
            total_rotation_degrees,
        };
        if params.num_layers() < 1 {
            return Err(Error::InvalidParameters(format!(
                "total rotation {} is smaller than one step of {} degrees",
                total_rotation_degrees, step_rotation_degrees
            )));
        }

        Ok(params)
    }

    pub fn step_rotation_degrees(&self) -> f64 {
        self.step_rotation_degrees
    }

    pub fn total_rotation_degrees(&self) -> f64 {
        self.total_rotation_degrees
    }

    /// floor(total / step), computed in floating point.
    pub fn num_layers(&self) -> usize {
        (self.total_rotation_degrees / self.step_rotation_degrees).floor() as usize
    }

    /// Cumulative rotation of layer `index`, in degrees.
    pub fn angle_for_layer(&self, index: usize) -> f64 {
        (index + 1) as f64 * self.step_rotation_degrees
    }
}

/// Tuning knobs that do not change the result (except `filter`).
#[derive(Debug, Clone)]
pub struct TrailOptions {
    pub filter: FilterMode,
    /// Partial buffers built concurrently; 1 means strictly sequential.
    pub workers: usize,
    /// Log every this many merged layers; 0 disables the log line.
    pub progress_interval: usize,
    pub progress: ProgressCallback,
    /// When set, accumulation stops before the next layer and returns the partial buffer.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for TrailOptions {
    fn default() -> Self {
        Self {
            filter: FilterMode::Bicubic,
            workers: 1,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            progress: ProgressCallback::none(),
            cancel: None,
        }
    }
}

/// Result of an accumulation run.
#[derive(Debug, Clone)]
pub struct Accumulation {
    pub image: Image,
    pub layers_merged: usize,
    pub total_layers: usize,
    pub cancelled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TrailAccumulator {
    options: TrailOptions,
}

/// Shared, read-only state of one run.
struct Run<'a> {
    source: &'a Image,
    center: Vec2,
    params: &'a TrailParameters,
    options: &'a TrailOptions,
    total: usize,
    merged: AtomicUsize,
}

impl Run<'_> {
    fn is_cancelled(&self) -> bool {
        self.options
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Accumulates layers `first, first + step, ...` into a fresh opaque-black buffer.
    fn accumulate_partition(&self, first: usize, step: usize) -> Result<Image> {
        let width = self.source.width();
        let height = self.source.height();

        let mut buffer = Image::new_black(width, height);
        let mut rotated = Image::new_empty(*self.source.desc())?;
        let lighten = Blend::new(BlendMode::Lighten, 1.0);

        for index in (first..self.total).step_by(step) {
            if self.is_cancelled() {
                tracing::debug!("worker {} stopping before layer {}", first, index + 1);
                break;
            }

            let angle = self.params.angle_for_layer(index);
            self.rotate(angle, &mut rotated)?;
            lighten.apply_onto(&rotated, &mut buffer)?;

            let current = self.merged.fetch_add(1, Ordering::Relaxed) + 1;
            self.options.progress.report(current, self.total);

            let interval = self.options.progress_interval;
            if interval > 0 && current % interval == 0 {
                tracing::info!("Progress: {}/{} layers merged", current, self.total);
            }
        }

        Ok(buffer)
    }

    /// Rotates the source counter-clockwise as displayed by `angle` degrees about the pivot.
    fn rotate(&self, angle: f64, output: &mut Image) -> Result<()> {
        // Reduce before narrowing to f32 so late layers keep sub-pixel accuracy.
        let radians = angle.rem_euclid(360.0).to_radians();

        Transform::new()
            .rotate_around(-radians as f32, self.center)
            .filter(self.options.filter)
            .apply_cpu(self.source, output)?;

        Ok(())
    }
}

impl TrailAccumulator {
    pub fn new(options: TrailOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TrailOptions {
        &self.options
    }

    /// Accumulated trails as opaque 8-bit RGBA.
    pub fn accumulate(
        &self,
        source: &Image,
        pivot: PixelPoint,
        params: &TrailParameters,
    ) -> Result<Image> {
        Ok(self.run(source, pivot, params)?.image)
    }

    pub fn run(
        &self,
        source: &Image,
        pivot: PixelPoint,
        params: &TrailParameters,
    ) -> Result<Accumulation> {
        let source = source.clone().convert(ColorFormat::RGBA_U8)?;
        let total = params.num_layers();
        let workers = self.options.workers.clamp(1, total.max(1));

        tracing::info!(
            "Generating {} layers with a step rotation of {} degrees around {} ({} worker(s), {} filter)",
            total,
            params.step_rotation_degrees(),
            pivot,
            workers,
            self.options.filter
        );

        let run = Run {
            source: &source,
            center: Vec2::new(pivot.x as f32, pivot.y as f32),
            params,
            options: &self.options,
            total,
            merged: AtomicUsize::new(0),
        };

        let image = if workers == 1 {
            run.accumulate_partition(0, 1)?
        } else {
            let partials = (0..workers)
                .into_par_iter()
                .map(|worker| run.accumulate_partition(worker, workers))
                .collect::<Result<Vec<_>>>()?;

            merge_partials(partials)?
        };

        let layers_merged = run.merged.load(Ordering::Relaxed);
        let cancelled = layers_merged < total;
        if cancelled {
            tracing::warn!(
                "accumulation cancelled after {}/{} layers; returning partial trails",
                layers_merged,
                total
            );
        } else {
            tracing::info!("Merged all {} layers", total);
        }

        Ok(Accumulation {
            image,
            layers_merged,
            total_layers: total,
            cancelled,
        })
    }
}

fn merge_partials(partials: Vec<Image>) -> Result<Image> {
    let lighten = Blend::new(BlendMode::Lighten, 1.0);
    let mut partials = partials.into_iter();

    let Some(mut merged) = partials.next() else {
        return Err(Error::InvalidParameters("no partial buffers to merge".to_string()));
    };
    for partial in partials {
        lighten.apply_onto(&partial, &mut merged)?;
    }

    Ok(merged)
}
