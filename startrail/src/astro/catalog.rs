//! Built-in table of bright reference stars.

use super::CelestialCatalog;
use crate::error::{Error, Result};
use crate::geo::EquatorialCoordinate;

/// A catalog star with J2000.0 mean coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogStar {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub position: EquatorialCoordinate,
}

const fn star(
    name: &'static str,
    aliases: &'static [&'static str],
    right_ascension: f64,
    declination: f64,
) -> CatalogStar {
    CatalogStar {
        name,
        aliases,
        position: EquatorialCoordinate {
            right_ascension,
            declination,
        },
    }
}

/// J2000.0 positions (Hipparcos, degrees).
pub const BRIGHT_STARS: &[CatalogStar] = &[
    star(
        "Polaris",
        &["Alpha Ursae Minoris", "Alpha UMi", "North Star", "Pole Star"],
        37.954561,
        89.264109,
    ),
    star(
        "Sigma Octantis",
        &["Polaris Australis", "Sigma Oct", "South Star"],
        317.195250,
        -88.956500,
    ),
    star("Kochab", &["Beta Ursae Minoris", "Beta UMi"], 222.676375, 74.155504),
    star("Vega", &["Alpha Lyrae", "Alpha Lyr"], 279.234735, 38.783689),
    star("Sirius", &["Alpha Canis Majoris", "Alpha CMa"], 101.287155, -16.716116),
    star("Betelgeuse", &["Alpha Orionis", "Alpha Ori"], 88.792939, 7.407064),
    star("Rigel", &["Beta Orionis", "Beta Ori"], 78.634467, -8.201638),
    star("Capella", &["Alpha Aurigae", "Alpha Aur"], 79.172328, 45.997991),
    star("Deneb", &["Alpha Cygni", "Alpha Cyg"], 310.357980, 45.280339),
    star("Altair", &["Alpha Aquilae", "Alpha Aql"], 297.695827, 8.868321),
    star("Arcturus", &["Alpha Bootis", "Alpha Boo"], 213.915300, 19.182410),
];

/// Lowercase and collapse whitespace, underscores and hyphens into single spaces.
fn normalize_name(name: &str) -> String {
    name.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Catalog backed by a fixed star table.
#[derive(Debug, Clone)]
pub struct StarCatalog {
    stars: Vec<CatalogStar>,
}

impl Default for StarCatalog {
    fn default() -> Self {
        Self::new(BRIGHT_STARS.to_vec())
    }
}

impl StarCatalog {
    pub fn new(stars: Vec<CatalogStar>) -> Self {
        Self { stars }
    }

    pub fn stars(&self) -> &[CatalogStar] {
        &self.stars
    }

    pub fn find(&self, name: &str) -> Option<&CatalogStar> {
        let wanted = normalize_name(name);
        if wanted.is_empty() {
            return None;
        }

        self.stars.iter().find(|star| {
            normalize_name(star.name) == wanted
                || star.aliases.iter().any(|alias| normalize_name(alias) == wanted)
        })
    }
}

impl CelestialCatalog for StarCatalog {
    fn resolve(&self, name: &str) -> Result<EquatorialCoordinate> {
        self.find(name)
            .map(|star| star.position)
            .ok_or_else(|| Error::Resolution {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_names_and_aliases_loosely() {
        let catalog = StarCatalog::default();

        for name in ["Polaris", "polaris", "  POLARIS ", "north star", "Alpha_UMi", "pole-star"] {
            let position = catalog.resolve(name).unwrap();
            assert!((position.declination - 89.264109).abs() < 1e-9, "{}", name);
        }

        let south = catalog.resolve("sigma octantis").unwrap();
        assert!(south.declination < -88.0);
    }

    #[test]
    fn unknown_name_is_a_resolution_error() {
        let catalog = StarCatalog::default();
        assert!(matches!(
            catalog.resolve("Vulcan"),
            Err(Error::Resolution { name }) if name == "Vulcan"
        ));
        assert!(catalog.resolve("   ").is_err());
    }

    #[test]
    fn table_positions_are_in_range() {
        for star in BRIGHT_STARS {
            assert!((0.0..360.0).contains(&star.position.right_ascension), "{}", star.name);
            assert!((-90.0..=90.0).contains(&star.position.declination), "{}", star.name);
        }
    }

    #[test]
    fn custom_tables_are_supported() {
        let catalog = StarCatalog::new(vec![star("Test Star", &[], 10.0, 20.0)]);
        assert_eq!(catalog.stars().len(), 1);
        assert_eq!(catalog.resolve("test   star").unwrap().right_ascension, 10.0);
        assert!(catalog.resolve("Polaris").is_err());
    }
}
