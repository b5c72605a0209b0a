pub mod catalog;
pub mod ephemeris;

pub use catalog::{BRIGHT_STARS, CatalogStar, StarCatalog};

use crate::error::Result;
use crate::geo::{EquatorialCoordinate, GeoLocation, HorizontalCoordinate, ObservationInstant};

/// Resolves named objects and places them in the observer's sky.
pub trait CelestialCatalog: Send + Sync {
    /// J2000.0 position of `name`, or [`crate::Error::Resolution`] if unknown.
    fn resolve(&self, name: &str) -> Result<EquatorialCoordinate>;

    fn horizontal(
        &self,
        name: &str,
        location: &GeoLocation,
        instant: &ObservationInstant,
    ) -> Result<HorizontalCoordinate> {
        let position = self.resolve(name)?;
        Ok(ephemeris::equatorial_to_horizontal(position, location, instant))
    }
}
