//! Low-precision stellar ephemeris: Julian dates, sidereal time, precession
//! and the equatorial → horizontal transform.
//!
//! Accuracy is a few arc-minutes over a century around J2000, well below the
//! resolution of the linear degrees-to-pixels pivot mapping. Nutation,
//! aberration and refraction are not modelled.

use crate::geo::{EquatorialCoordinate, GeoLocation, HorizontalCoordinate, ObservationInstant};

/// Julian date of the J2000.0 epoch (2000-01-01T12:00:00 TT, treated as UTC).
pub const J2000_JD: f64 = 2_451_545.0;
/// Julian date of 1970-01-01T00:00:00 UTC.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;
const ARCSEC_PER_DEGREE: f64 = 3_600.0;

/// Wraps an angle into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

pub fn julian_date(instant: &ObservationInstant) -> f64 {
    let utc = instant.utc();
    let seconds = utc.timestamp() as f64 + utc.timestamp_subsec_nanos() as f64 * 1e-9;

    UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
}

/// Julian centuries since J2000.0.
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Greenwich mean sidereal time in degrees (IAU 1982 expression).
pub fn greenwich_mean_sidereal_degrees(jd: f64) -> f64 {
    let d = jd - J2000_JD;
    let t = julian_centuries(jd);

    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t - t * t * t / 38_710_000.0,
    )
}

/// Local mean sidereal time in degrees for an east-positive longitude.
pub fn local_sidereal_degrees(jd: f64, longitude: f64) -> f64 {
    normalize_degrees(greenwich_mean_sidereal_degrees(jd) + longitude)
}

/// Precesses J2000.0 mean coordinates to the mean equator of date (IAU 1976).
pub fn precess_from_j2000(coordinate: EquatorialCoordinate, jd: f64) -> EquatorialCoordinate {
    let t = julian_centuries(jd);
    let t2 = t * t;
    let t3 = t2 * t;

    let zeta = ((2306.2181 * t + 0.30188 * t2 + 0.017998 * t3) / ARCSEC_PER_DEGREE).to_radians();
    let z = ((2306.2181 * t + 1.09468 * t2 + 0.018203 * t3) / ARCSEC_PER_DEGREE).to_radians();
    let theta = ((2004.3109 * t - 0.42665 * t2 - 0.041833 * t3) / ARCSEC_PER_DEGREE).to_radians();

    let ra0 = coordinate.right_ascension.to_radians();
    let dec0 = coordinate.declination.to_radians();

    let a = dec0.cos() * (ra0 + zeta).sin();
    let b = theta.cos() * dec0.cos() * (ra0 + zeta).cos() - theta.sin() * dec0.sin();
    let c = theta.sin() * dec0.cos() * (ra0 + zeta).cos() + theta.cos() * dec0.sin();

    // atan2 keeps precision for stars next to the pole, where asin(c) degrades.
    let declination = c.atan2(a.hypot(b));
    let right_ascension = a.atan2(b) + z;

    EquatorialCoordinate {
        right_ascension: normalize_degrees(right_ascension.to_degrees()),
        declination: declination.to_degrees(),
    }
}

/// Altitude/azimuth of a direction given its local hour angle and declination.
pub fn hour_angle_to_horizontal(
    hour_angle: f64,
    declination: f64,
    latitude: f64,
) -> HorizontalCoordinate {
    let h = hour_angle.to_radians();
    let dec = declination.to_radians();
    let lat = latitude.to_radians();

    let sin_alt = (lat.sin() * dec.sin() + lat.cos() * dec.cos() * h.cos()).clamp(-1.0, 1.0);
    let altitude = sin_alt.asin();

    let y = -dec.cos() * h.sin();
    let x = dec.sin() * lat.cos() - dec.cos() * lat.sin() * h.cos();
    let azimuth = if x.abs() < 1e-15 && y.abs() < 1e-15 {
        // Zenith or nadir: azimuth is undefined.
        0.0
    } else {
        y.atan2(x)
    };

    HorizontalCoordinate {
        altitude: altitude.to_degrees(),
        azimuth: normalize_degrees(azimuth.to_degrees()),
    }
}

/// Apparent (unrefracted) horizontal position of a J2000.0 catalog star.
///
/// Elevation does not enter: stellar parallax from the observer's height is negligible.
pub fn equatorial_to_horizontal(
    coordinate: EquatorialCoordinate,
    location: &GeoLocation,
    instant: &ObservationInstant,
) -> HorizontalCoordinate {
    let jd = julian_date(instant);
    let of_date = precess_from_j2000(coordinate, jd);
    let lst = local_sidereal_degrees(jd, location.longitude());
    let hour_angle = normalize_degrees(lst - of_date.right_ascension);

    tracing::debug!(
        "jd {:.5}, lst {:.4} deg, ra/dec of date {:.4}/{:.4}, hour angle {:.4} deg",
        jd,
        lst,
        of_date.right_ascension,
        of_date.declination,
        hour_angle
    );

    hour_angle_to_horizontal(hour_angle, of_date.declination, location.latitude())
}
