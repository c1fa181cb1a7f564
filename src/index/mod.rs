pub mod constants;
mod identifier;
mod indexing;
mod projection;

pub use constants::{
    EARTH_PERIMETER, EARTH_RADIUS, EXPECTED_AREA, EXPECTED_EDGE_LENGTH_METERS,
    IDENTIFIER_VERSION, MAX_GRID_CELLS, REFERENCE_LATITUDE_RAD,
};
pub use identifier::{decode_cell_identifier, generate_cell_identifier};
pub use indexing::{
    compute_latitude_rad_increment, index_to_point, lat_lng_to_index, longitude_rad_increment,
};
pub(crate) use indexing::row_latitude_rad;
pub use projection::{
    area_from_integral, latitude_from_area, latitude_meters_to_radians,
    latitude_radians_to_meters, longitude_meters_to_radians, longitude_radians_to_meters,
};
