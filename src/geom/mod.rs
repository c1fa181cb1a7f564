mod parse;
mod polygon;

pub use parse::{parse_geojson, parse_geometry, parse_wkt};
pub use polygon::{create_cell_polygon, polygon_area, polygon_to_geojson_url, polygon_to_wkt};
