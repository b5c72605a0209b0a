pub mod astro;
pub mod composite;
pub mod config;
pub mod error;
pub mod geo;
pub mod pipeline;
pub mod pivot;
pub mod segment;
pub mod trail;

pub use astro::{CelestialCatalog, StarCatalog};
pub use config::Config;
pub use error::{Error, Result};
pub use geo::{EquatorialCoordinate, GeoLocation, HorizontalCoordinate, ObservationInstant, PixelPoint};
pub use pipeline::{Pipeline, RunSummary};
pub use pivot::{PivotFix, PivotLocator};
pub use segment::{MaskFileSegmenter, MaskSizePolicy, Segmenter};
pub use trail::{Accumulation, ProgressCallback, TrailAccumulator, TrailOptions, TrailParameters, TrailProgress};
