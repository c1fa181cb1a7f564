//! Arc-length conversions on a spherical Earth of radius [`EARTH_RADIUS`].
//!
//! The longitude conversions divide by `cos(latitude)`, so `latitude_rad` must lie
//! strictly inside (-π/2, π/2). At the poles the result is infinite or meaningless;
//! this is a precondition, not something these functions check.

use crate::error::EagridError;
use crate::index::constants::EARTH_RADIUS;

/// Converts a meridian arc in radians to meters.
pub fn latitude_radians_to_meters(radians: f64) -> f64 {
    EARTH_RADIUS * radians
}

/// Converts a meridian arc in meters to radians.
pub fn latitude_meters_to_radians(meters: f64) -> f64 {
    meters / EARTH_RADIUS
}

/// Converts meters along the parallel at `latitude_rad` to radians of longitude.
pub fn longitude_meters_to_radians(meters: f64, latitude_rad: f64) -> f64 {
    meters / (EARTH_RADIUS * latitude_rad.cos())
}

/// Converts radians of longitude along the parallel at `latitude_rad` to meters.
pub fn longitude_radians_to_meters(radians: f64, latitude_rad: f64) -> f64 {
    EARTH_RADIUS * latitude_rad.cos() * radians
}

/// Area of the spherical patch between the equator and `latitude_rad`, over a
/// longitude span of `longitude_span_rad`.
///
/// This is the cumulative (antiderivative) quantity both directions of the
/// index mapping are built on, not the area of a single cell.
pub fn area_from_integral(latitude_rad: f64, longitude_span_rad: f64) -> f64 {
    EARTH_RADIUS.powi(2) * longitude_span_rad * latitude_rad.sin()
}

/// Inverse of [`area_from_integral`]: the latitude at which the cumulative area
/// over `longitude_span_rad` equals `area`.
///
/// # Errors
///
/// [`EagridError::Domain`] when `area` is larger than the whole hemisphere
/// band allows, i.e. the sine argument leaves [-1, 1].
pub fn latitude_from_area(area: f64, longitude_span_rad: f64) -> Result<f64, EagridError> {
    checked_asin(
        area / (EARTH_RADIUS.powi(2) * longitude_span_rad),
        "latitude_from_area",
    )
}

pub(crate) fn checked_asin(value: f64, operation: &'static str) -> Result<f64, EagridError> {
    if !(-1.0..=1.0).contains(&value) {
        tracing::debug!(operation, value, "asin argument out of domain");
        return Err(EagridError::Domain { operation, value });
    }
    Ok(value.asin())
}
