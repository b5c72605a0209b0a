//! Run configuration, loaded from TOML, YAML or JSON by file extension.

use std::path::{Path, PathBuf};

use imaginarium::FilterMode;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::{GeoLocation, ObservationInstant, PixelPoint};
use crate::pivot::DEFAULT_TARGET;
use crate::segment::MaskSizePolicy;
use crate::trail::{DEFAULT_PROGRESS_INTERVAL, TrailOptions, TrailParameters};

pub const DEFAULT_STEP_ROTATION_DEGREES: f64 = 0.1;
pub const DEFAULT_TOTAL_ROTATION_DEGREES: f64 = 360.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: PathBuf,

    pub latitude: f64,
    pub longitude: f64,
    /// Meters above sea level.
    pub elevation: f64,
    /// ISO 8601; naive times are UTC.
    pub observation_time: String,

    pub step_rotation_degrees: f64,
    pub total_rotation_degrees: f64,

    /// Catalog name of the rotation center.
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_path: Option<PathBuf>,
    pub mask_size_policy: MaskSizePolicy,
    pub filter: FilterMode,
    pub workers: usize,
    pub progress_interval: usize,
    /// Skips the ephemeris and rotates around this pixel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pivot_override: Option<PixelPoint>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::new(),
            output_path: PathBuf::new(),
            latitude: 0.0,
            longitude: 0.0,
            elevation: 0.0,
            observation_time: String::new(),
            step_rotation_degrees: DEFAULT_STEP_ROTATION_DEGREES,
            total_rotation_degrees: DEFAULT_TOTAL_ROTATION_DEGREES,
            target: DEFAULT_TARGET.to_string(),
            mask_path: None,
            mask_size_policy: MaskSizePolicy::default(),
            filter: FilterMode::default(),
            workers: 1,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            pivot_override: None,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config: Config = common::serde::load_file(path)
            .map_err(|e| Error::Config(format!("{}: {:#}", path.display(), e)))?;

        tracing::debug!("loaded configuration from {}", path.display());

        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        common::serde::save_file(self, path)
            .map_err(|e| Error::Config(format!("{}: {:#}", path.display(), e)))
    }

    /// Checks every value without touching the filesystem.
    pub fn validate(&self) -> Result<()> {
        if self.input_path.as_os_str().is_empty() {
            return Err(Error::Config("input_path is required".to_string()));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(Error::Config("output_path is required".to_string()));
        }
        if self.pivot_override.is_none() {
            if self.target.trim().is_empty() {
                return Err(Error::Config("target must not be empty".to_string()));
            }
            self.location()?;
            self.instant()?;
        }
        if self.workers == 0 {
            return Err(Error::InvalidParameters("workers must be at least 1".to_string()));
        }
        self.trail_parameters()?;

        Ok(())
    }

    pub fn location(&self) -> Result<GeoLocation> {
        GeoLocation::new(self.latitude, self.longitude, self.elevation)
    }

    pub fn instant(&self) -> Result<ObservationInstant> {
        ObservationInstant::parse(&self.observation_time)
    }

    pub fn trail_parameters(&self) -> Result<TrailParameters> {
        TrailParameters::new(self.step_rotation_degrees, self.total_rotation_degrees)
    }

    pub fn trail_options(&self) -> TrailOptions {
        TrailOptions {
            filter: self.filter,
            workers: self.workers,
            progress_interval: self.progress_interval,
            ..TrailOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use common::test_utils::test_output_path;

    use super::*;

    fn maine() -> Config {
        Config {
            input_path: "input/night_sky.jpg".into(),
            output_path: "output/star_trails_with_pole_star.png".into(),
            latitude: 44.5,
            longitude: -69.0,
            elevation: 30.0,
            observation_time: "2024-12-01T22:00:00".to_string(),
            step_rotation_degrees: 0.004178,
            total_rotation_degrees: 2.0,
            ..Config::default()
        }
    }

    #[test]
    fn toml_round_trip() {
        let mut config = maine();
        config.mask_path = Some("output/mask.png".into());
        config.pivot_override = Some(PixelPoint::new(120, -40));
        config.filter = FilterMode::Lanczos3;
        config.mask_size_policy = MaskSizePolicy::Resize;

        let text = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn optional_values_fall_back_to_defaults() {
        let text = r#"
            input_path = "in.png"
            output_path = "out.png"
            latitude = 44.5
            longitude = -69.0
            observation_time = "2024-12-01T22:00:00"
        "#;

        let config: Config = toml::from_str(text).unwrap();

        assert_eq!(config.target, "Polaris");
        assert_eq!(config.step_rotation_degrees, 0.1);
        assert_eq!(config.total_rotation_degrees, 360.0);
        assert_eq!(config.elevation, 0.0);
        assert_eq!(config.filter, FilterMode::Bicubic);
        assert_eq!(config.workers, 1);
        assert_eq!(config.progress_interval, 10);
        assert!(config.mask_path.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn enum_values_use_lowercase_names() {
        let json = r#"{"filter": "bilinear", "mask_size_policy": "resize"}"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.filter, FilterMode::Bilinear);
        assert_eq!(config.mask_size_policy, MaskSizePolicy::Resize);
    }

    #[test]
    fn save_and_load_by_extension() {
        let config = maine();

        for name in ["config_roundtrip.toml", "config_roundtrip.yaml", "config_roundtrip.json"] {
            let path = test_output_path(name);
            config.save(&path).unwrap();
            assert_eq!(Config::load(&path).unwrap(), config, "{}", name);
        }
    }

    #[test]
    fn unreadable_files_are_config_errors() {
        assert!(matches!(
            Config::load(test_output_path("config_missing.toml")),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::load(test_output_path("config.ini")),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn validation_reports_the_offending_value() {
        maine().validate().unwrap();

        let missing_input = Config {
            input_path: PathBuf::new(),
            ..maine()
        };
        assert!(matches!(missing_input.validate(), Err(Error::Config(_))));

        let bad_time = Config {
            observation_time: "tomorrow night".to_string(),
            ..maine()
        };
        assert!(matches!(bad_time.validate(), Err(Error::InvalidTime { .. })));

        let bad_latitude = Config {
            latitude: 91.0,
            ..maine()
        };
        assert!(matches!(bad_latitude.validate(), Err(Error::InvalidParameters(_))));

        let bad_step = Config {
            step_rotation_degrees: 0.0,
            ..maine()
        };
        assert!(matches!(bad_step.validate(), Err(Error::InvalidParameters(_))));

        let no_workers = Config {
            workers: 0,
            ..maine()
        };
        assert!(matches!(no_workers.validate(), Err(Error::InvalidParameters(_))));
    }

    #[test]
    fn pivot_override_skips_location_checks() {
        let config = Config {
            observation_time: String::new(),
            pivot_override: Some(PixelPoint::new(10, 10)),
            ..maine()
        };
        config.validate().unwrap();
    }

    #[test]
    fn trail_options_follow_config() {
        let config = Config {
            filter: FilterMode::Nearest,
            workers: 3,
            progress_interval: 25,
            ..maine()
        };

        let options = config.trail_options();
        assert_eq!(options.filter, FilterMode::Nearest);
        assert_eq!(options.workers, 3);
        assert_eq!(options.progress_interval, 25);
        assert!(options.cancel.is_none());
    }
}
