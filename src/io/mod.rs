pub mod arrow;
pub mod csv;
pub mod parquet;

pub use arrow::CellsToArrow;
pub use csv::{CoordinateSource, CsvCellConfig, CsvToCells, GeometryFormat, csv_to_cell_csv};
pub use parquet::{CellsToGeoParquet, write_geoparquet};
