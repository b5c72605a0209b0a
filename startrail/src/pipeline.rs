//! End-to-end run: load, locate pivot, optionally mask, accumulate, composite, save.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use imaginarium::Image;

use crate::astro::{CelestialCatalog, StarCatalog};
use crate::composite::{isolate_sky, overlay_foreground};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::{HorizontalCoordinate, PixelPoint};
use crate::pivot::PivotLocator;
use crate::segment::{MaskFileSegmenter, Segmenter};
use crate::trail::{ProgressCallback, TrailAccumulator};

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub pivot: PixelPoint,
    /// `None` when the pivot came from the configuration.
    pub horizontal: Option<HorizontalCoordinate>,
    pub layers_merged: usize,
    pub total_layers: usize,
    pub output_path: PathBuf,
    pub masked: bool,
    pub cancelled: bool,
}

pub struct Pipeline {
    catalog: Box<dyn CelestialCatalog>,
    segmenter: Option<Box<dyn Segmenter>>,
    progress: ProgressCallback,
    cancel: Option<Arc<AtomicBool>>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Box::new(StarCatalog::default()))
    }
}

impl Pipeline {
    pub fn new(catalog: Box<dyn CelestialCatalog>) -> Self {
        Self {
            catalog,
            segmenter: None,
            progress: ProgressCallback::none(),
            cancel: None,
        }
    }

    /// Built-in star catalog plus a mask file segmenter when `mask_path` is set.
    pub fn from_config(config: &Config) -> Self {
        let pipeline = Self::default();
        match config.mask_path.as_ref() {
            Some(path) => pipeline.with_segmenter(Box::new(
                MaskFileSegmenter::new(path).with_policy(config.mask_size_policy),
            )),
            None => pipeline,
        }
    }

    pub fn with_segmenter(mut self, segmenter: Box<dyn Segmenter>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn run(&self, config: &Config) -> Result<RunSummary> {
        config.validate()?;

        let original = Image::read_file(&config.input_path)
            .map_err(|e| Error::image_file(&config.input_path, e))?;
        let (width, height) = (original.width(), original.height());
        tracing::info!(
            "loaded {} ({}x{})",
            config.input_path.display(),
            width,
            height
        );

        let (pivot, horizontal) = match config.pivot_override {
            Some(pivot) => {
                tracing::info!("using configured pivot {}", pivot);
                (pivot, None)
            }
            None => {
                let fix = PivotLocator::with_target(self.catalog.as_ref(), config.target.as_str())
                    .locate_with_details(width, height, &config.location()?, &config.instant()?)?;
                (fix.point, Some(fix.horizontal))
            }
        };

        let mask = match self.segmenter.as_ref() {
            Some(segmenter) => Some(segmenter.predict(&original)?),
            None => None,
        };
        let sky = match mask.as_ref() {
            Some(mask) => isolate_sky(&original, mask)?,
            None => original.clone(),
        };

        let mut options = config.trail_options();
        options.progress = self.progress.clone();
        options.cancel = self.cancel.clone();
        let accumulation =
            TrailAccumulator::new(options).run(&sky, pivot, &config.trail_parameters()?)?;

        let result = match mask.as_ref() {
            Some(mask) => overlay_foreground(&accumulation.image, &original, mask)?,
            None => accumulation.image,
        };

        let output_path = config.output_path.clone();
        if let Some(dir) = output_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }
        result
            .save_file(&output_path)
            .map_err(|e| Error::image_file(&output_path, e))?;
        tracing::info!("Star trails image saved to {}", output_path.display());

        Ok(RunSummary {
            pivot,
            horizontal,
            layers_merged: accumulation.layers_merged,
            total_layers: accumulation.total_layers,
            output_path,
            masked: mask.is_some(),
            cancelled: accumulation.cancelled,
        })
    }
}
