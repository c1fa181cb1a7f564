//! # eagrid-rs
//!
//! An approximately equal-area grid over the sphere. Columns share one angular
//! width, calibrated so cells are 30m wide at the reference latitude (~46.85°);
//! rows are bucketed by cumulative area from the equator so every cell covers
//! close to 900 m². The grid is only approximately equal-area and is most
//! accurate near the reference latitude.
//!
//! ### 1. `Cell` - Single Cell Operations
//!
//! ```
//! use eagrid_rs::Cell;
//!
//! # fn main() -> Result<(), eagrid_rs::EagridError> {
//! let cell = Cell::from_lat_lng(46.852275, 6.0)?;
//! println!("({}, {})", cell.lat_index(), cell.lon_index());
//!
//! let same = Cell::new(cell.lat_index(), cell.lon_index())?;
//! assert_eq!(cell, same);
//!
//! println!("{}", cell.to_geojson_string());
//! println!("{}", cell.to_geojson_url());
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `CellGrid` - Cells Covering an Extent
//!
//! ```
//! use eagrid_rs::CellGrid;
//!
//! # fn main() -> Result<(), eagrid_rs::EagridError> {
//! let grid = CellGrid::builder()
//!     .bounds(6.0, 46.85, 6.001, 46.8505)
//!     .build()?;
//!
//! if let Some(cell) = grid.get_cell_at(&(6.0005, 46.8502)) {
//!     println!("{}", cell.id());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `csv_to_cell_csv` - CSV Tagging
//!
//! ```no_run
//! use eagrid_rs::{CsvCellConfig, CsvToCells, GeometryFormat};
//!
//! let config = CsvCellConfig::new("geometry")
//!     .exclude(vec!["Geo Point".into()])
//!     .with_cell_geometry(GeometryFormat::Wkt);
//!
//! "input.csv".to_cell_csv("output.csv", &config).unwrap();
//! ```
//!
//! ### Index primitives
//!
//! The underlying conversions are plain functions:
//!
//! ```
//! use eagrid_rs::{index_to_point, lat_lng_to_index};
//!
//! # fn main() -> Result<(), eagrid_rs::EagridError> {
//! let (lat_index, lon_index) = lat_lng_to_index(46.852275, 6.0);
//! let corner = index_to_point(lat_index, lon_index)?;
//! assert!(corner.y() <= 46.852275);
//! # Ok(())
//! # }
//! ```

pub mod cell;
pub mod coord;
pub mod error;
pub mod geom;
pub mod grid;
pub mod index;
pub mod io;

pub use cell::Cell;
pub use coord::Coordinate;
pub use error::EagridError;
pub use geom::{
    create_cell_polygon, parse_geojson, parse_geometry, parse_wkt, polygon_area,
    polygon_to_geojson_url, polygon_to_wkt,
};
pub use grid::{CellGrid, CellGridBuilder};
pub use index::{
    EARTH_PERIMETER, EARTH_RADIUS, EXPECTED_AREA, EXPECTED_EDGE_LENGTH_METERS,
    IDENTIFIER_VERSION, MAX_GRID_CELLS, REFERENCE_LATITUDE_RAD, area_from_integral,
    compute_latitude_rad_increment, decode_cell_identifier, generate_cell_identifier,
    index_to_point, lat_lng_to_index, latitude_from_area, latitude_meters_to_radians,
    latitude_radians_to_meters, longitude_meters_to_radians, longitude_rad_increment,
    longitude_radians_to_meters,
};
pub use io::{
    CellsToArrow, CellsToGeoParquet, CoordinateSource, CsvCellConfig, CsvToCells,
    GeometryFormat, csv_to_cell_csv, write_geoparquet,
};

pub use geo_types;
pub use geoarrow_array;
pub use geoarrow_schema;
pub use geoparquet;
