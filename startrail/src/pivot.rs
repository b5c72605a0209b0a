//! Pole-star pixel position from observer location and time.
//!
//! The sky is mapped linearly onto the frame: the image center is the zenith
//! and `min(width, height) / 180` pixels correspond to one degree. Azimuth is
//! used as an unwrapped horizontal offset, so a pole star just west of north
//! (azimuth ~359°) lands far right of the center.

use crate::astro::CelestialCatalog;
use crate::error::Result;
use crate::geo::{GeoLocation, HorizontalCoordinate, ObservationInstant, PixelPoint};

pub const DEFAULT_TARGET: &str = "Polaris";

/// Altitudes this close to 90° are treated as the zenith.
const ZENITH_TOLERANCE_DEG: f64 = 1e-9;

/// Pivot together with the sky position it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotFix {
    pub point: PixelPoint,
    pub horizontal: HorizontalCoordinate,
}

/// Maps a horizontal coordinate to a pixel with the linear zenith-centered projection.
pub fn pixel_from_horizontal(width: u32, height: u32, coordinate: HorizontalCoordinate) -> PixelPoint {
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;
    let scale = width.min(height) as f64 / 180.0;

    let azimuth = if (90.0 - coordinate.altitude).abs() < ZENITH_TOLERANCE_DEG {
        0.0
    } else {
        coordinate.azimuth
    };

    let x_offset = scale * azimuth;
    let y_offset = scale * (90.0 - coordinate.altitude);

    PixelPoint::new(
        (center_x + x_offset).trunc() as i32,
        (center_y - y_offset).trunc() as i32,
    )
}

pub struct PivotLocator<'a> {
    catalog: &'a dyn CelestialCatalog,
    target: String,
}

impl<'a> PivotLocator<'a> {
    /// Locator for the north celestial pole star.
    pub fn new(catalog: &'a dyn CelestialCatalog) -> Self {
        Self::with_target(catalog, DEFAULT_TARGET)
    }

    pub fn with_target(catalog: &'a dyn CelestialCatalog, target: impl Into<String>) -> Self {
        Self {
            catalog,
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn locate(
        &self,
        width: u32,
        height: u32,
        location: &GeoLocation,
        instant: &ObservationInstant,
    ) -> Result<PixelPoint> {
        Ok(self.locate_with_details(width, height, location, instant)?.point)
    }

    pub fn locate_with_details(
        &self,
        width: u32,
        height: u32,
        location: &GeoLocation,
        instant: &ObservationInstant,
    ) -> Result<PivotFix> {
        let horizontal = self.catalog.horizontal(&self.target, location, instant)?;
        let point = pixel_from_horizontal(width, height, horizontal);

        tracing::info!(
            "{} at alt {:.4} deg, az {:.4} deg -> pivot {}",
            self.target,
            horizontal.altitude,
            horizontal.azimuth,
            point
        );
        if !point.is_inside(width, height) {
            tracing::warn!(
                "pivot {} lies outside the {}x{} frame; trails will be arcs around an off-frame center",
                point,
                width,
                height
            );
        }

        Ok(PivotFix { point, horizontal })
    }
}
