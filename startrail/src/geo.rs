//! Observer, time and coordinate value types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Observer position on Earth. Degrees are signed, elevation in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
    elevation: f64,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64, elevation: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::InvalidParameters(format!(
                "latitude must be within [-90, 90], got {}",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidParameters(format!(
                "longitude must be within [-180, 180], got {}",
                longitude
            )));
        }
        if !elevation.is_finite() {
            return Err(Error::InvalidParameters(format!(
                "elevation must be finite, got {}",
                elevation
            )));
        }

        Ok(Self {
            latitude,
            longitude,
            elevation,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// East-positive longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn elevation(&self) -> f64 {
        self.elevation
    }
}

/// A UTC instant.
///
/// Parsed from an ISO 8601 date-time with an offset (`+05:00`, `+0500` or
/// `Z`), a naive date-time (taken as UTC), or a bare date (midnight UTC).
/// Both the extended (`2024-12-01T22:00:00`) and basic (`20241201T220000`)
/// layouts are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObservationInstant(DateTime<Utc>);

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y%m%dT%H%M%S%.f%z",
];

impl ObservationInstant {
    pub fn from_utc(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();

        if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(instant.with_timezone(&Utc)));
        }

        for format in OFFSET_FORMATS {
            if let Ok(instant) = DateTime::parse_from_str(trimmed, format) {
                return Ok(Self(instant.with_timezone(&Utc)));
            }
        }

        let naive = trimmed.strip_suffix(['Z', 'z']).unwrap_or(trimmed);
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(naive, format) {
                return Ok(Self(naive.and_utc()));
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Ok(Self(midnight.and_utc()));
            }
        }

        Err(Error::InvalidTime {
            value: value.to_string(),
            reason: "expected an ISO 8601 date or date-time".to_string(),
        })
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

impl FromStr for ObservationInstant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ObservationInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// Altitude above the horizon and azimuth clockwise from north, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalCoordinate {
    pub altitude: f64,
    pub azimuth: f64,
}

/// Right ascension and declination in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquatorialCoordinate {
    pub right_ascension: f64,
    pub declination: f64,
}

/// Integer pixel position, origin top-left. May lie outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_inside(&self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as i64) < width as i64 && (self.y as i64) < height as i64
    }
}

impl fmt::Display for PixelPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
