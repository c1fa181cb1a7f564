use crate::error::EagridError;
use crate::index::constants::{
    EARTH_RADIUS, EXPECTED_AREA, EXPECTED_EDGE_LENGTH_METERS, REFERENCE_LATITUDE_RAD,
};
use crate::index::projection::{
    area_from_integral, checked_asin, latitude_from_area, longitude_meters_to_radians,
};
use geo_types::Point;

/// Angular width of every grid column, in radians.
///
/// Calibrated once at [`REFERENCE_LATITUDE_RAD`] and shared by all rows.
pub fn longitude_rad_increment() -> f64 {
    longitude_meters_to_radians(EXPECTED_EDGE_LENGTH_METERS, REFERENCE_LATITUDE_RAD)
}

/// Angular height of the row starting at `latitude_rad`, in radians.
///
/// Approximation: linearized with `sin(lat_i) ~ lat_i` and `cos(lat_i) ~ 1`, so the
/// row is only close to [`EXPECTED_AREA`], and closest near the reference latitude.
/// Stored indices depend on this exact formula.
pub fn compute_latitude_rad_increment(latitude_rad: f64) -> Result<f64, EagridError> {
    let value =
        EXPECTED_AREA / (EARTH_RADIUS.powi(2) * longitude_rad_increment()) + latitude_rad.sin();
    Ok(checked_asin(value, "compute_latitude_rad_increment")? - latitude_rad)
}

/// Latitude (radians) of the middle of row `lat_index`.
pub(crate) fn row_latitude_rad(lat_index: i64) -> Result<f64, EagridError> {
    latitude_from_area(
        (lat_index as f64 + 0.5) * EXPECTED_AREA,
        longitude_rad_increment(),
    )
}

/// Classifies a WGS84 position (degrees) into `(lat_index, lon_index)`.
///
/// Columns are uniform buckets of longitude; rows are buckets of cumulative area
/// from the equator, which keeps rows roughly equal-area as they thin out poleward.
pub fn lat_lng_to_index(latitude_deg: f64, longitude_deg: f64) -> (i64, i64) {
    let latitude_rad = latitude_deg.to_radians();
    let longitude_rad = longitude_deg.to_radians();
    let span = longitude_rad_increment();

    let lon_index = (longitude_rad / span).floor() as i64;
    let lat_index = (area_from_integral(latitude_rad, span) / EXPECTED_AREA).floor() as i64;

    (lat_index, lon_index)
}

/// Converts grid indices to the south-west corner of that cell.
///
/// Returns a `Point` with `x` = longitude and `y` = latitude, in degrees. Row
/// boundaries come from the exact area integral, so they are area-consistent
/// independently of [`compute_latitude_rad_increment`].
///
/// # Errors
///
/// [`EagridError::Domain`] when `lat_index` lies beyond the poles.
pub fn index_to_point(lat_index: i64, lon_index: i64) -> Result<Point<f64>, EagridError> {
    let span = longitude_rad_increment();
    let latitude_rad = latitude_from_area(lat_index as f64 * EXPECTED_AREA, span)?;
    let longitude_rad = lon_index as f64 * span;

    Ok(Point::new(longitude_rad.to_degrees(), latitude_rad.to_degrees()))
}
