use std::f64::consts::PI;

/// Identifier version for encoding/decoding
pub const IDENTIFIER_VERSION: u8 = 1;

/// Mean Earth radius in meters (IUGG), the radius `geo::Haversine` measures with.
pub const EARTH_RADIUS: f64 = 6_371_008.8;

/// Circumference of the sphere of radius [`EARTH_RADIUS`], in meters.
pub const EARTH_PERIMETER: f64 = 2.0 * PI * EARTH_RADIUS;

/// Target edge length of a cell, in meters.
pub const EXPECTED_EDGE_LENGTH_METERS: f64 = 30.0;

/// Target area of a cell, in square meters.
pub const EXPECTED_AREA: f64 = EXPECTED_EDGE_LENGTH_METERS * EXPECTED_EDGE_LENGTH_METERS;

/// Latitude at which the column width is calibrated (46.85227151642656°).
///
/// Columns are exactly [`EXPECTED_EDGE_LENGTH_METERS`] wide here and get narrower
/// in ground distance the further a row is from it.
pub const REFERENCE_LATITUDE_RAD: f64 = 0.8177264;

/// Upper bound on the number of cells a single `CellGrid` will generate.
pub const MAX_GRID_CELLS: u64 = 5_000_000;

/// Base of the geojson.io link produced by `Cell::to_geojson_url`.
pub const GEOJSON_IO_URL: &str = "http://geojson.io/#data=data:application/json,";
