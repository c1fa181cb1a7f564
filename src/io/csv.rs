use crate::cell::Cell;
use crate::error::EagridError;
use crate::geom::{parse_geometry, polygon_to_wkt};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

enum SourceIndices {
    Geometry(usize),
    Coordinates { lon_idx: usize, lat_idx: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry
    GeometryColumn(String),
    /// Separate longitude and latitude columns, in degrees
    CoordinateColumns {
        lon_column: String,
        lat_column: String,
    },
}

/// Configuration for tagging CSV rows with grid cells.
#[derive(Debug, Clone)]
pub struct CsvCellConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub include_cell_geometry: Option<GeometryFormat>,
}

impl CsvCellConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use eagrid_rs::CsvCellConfig;
    ///
    /// let config = CsvCellConfig::new("geometry");
    /// ```
    pub fn new(geometry_column: impl Into<String>) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            include_cell_geometry: None,
        }
    }

    /// Create config for a CSV with separate longitude/latitude columns.
    ///
    /// # Example
    /// ```
    /// use eagrid_rs::{CsvCellConfig, GeometryFormat};
    ///
    /// let config = CsvCellConfig::from_coords("Longitude", "Latitude")
    ///     .with_cell_geometry(GeometryFormat::Wkt);
    /// ```
    pub fn from_coords(lon_column: impl Into<String>, lat_column: impl Into<String>) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                lon_column: lon_column.into(),
                lat_column: lat_column.into(),
            },
            exclude_columns: Vec::new(),
            include_cell_geometry: None,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    /// Include the cell polygon in the output.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_cell_geometry = Some(format);
        self
    }
}

pub trait CsvToCells {
    fn to_cell_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvCellConfig,
    ) -> Result<(), EagridError>;
}

impl<P: AsRef<Path>> CsvToCells for P {
    fn to_cell_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvCellConfig,
    ) -> Result<(), EagridError> {
        csv_to_cell_csv(self, output_path, config)
    }
}

fn find_column(headers: &csv::StringRecord, name: &str, role: &str) -> Result<usize, EagridError> {
    if name.is_empty() {
        return Err(EagridError::CsvError(format!(
            "{role} column name cannot be empty"
        )));
    }
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| EagridError::CsvError(format!("{role} column '{name}' not found")))
}

fn parse_degrees(record: &csv::StringRecord, idx: usize, role: &str) -> Result<f64, EagridError> {
    let raw = record
        .get(idx)
        .ok_or_else(|| EagridError::CsvError(format!("Missing {role} column at index {idx}")))?
        .trim();
    raw.parse()
        .map_err(|_| EagridError::CsvError(format!("Invalid {role}: '{raw}'")))
}

/// Tags every row of a CSV file with the grid cell(s) of its location.
///
/// Output columns are `cell_id, lat_index, lon_index`, then `cell_geometry` if
/// requested, then the input columns minus the source and excluded ones. Rows
/// whose geometry spans several cells (lines) are repeated once per cell.
/// Output is streamed row by row.
///
/// # Example
///
/// ```no_run
/// use eagrid_rs::{csv_to_cell_csv, CsvCellConfig};
///
/// let config = CsvCellConfig::from_coords("lon", "lat");
/// csv_to_cell_csv("sites.csv", "sites_cells.csv", &config).unwrap();
/// ```
pub fn csv_to_cell_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvCellConfig,
) -> Result<(), EagridError> {
    let file = File::open(csv_path).map_err(|e| EagridError::CsvError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| EagridError::CsvError(e.to_string()))?
        .clone();

    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = find_column(&headers, col, "Geometry")?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns {
            lon_column,
            lat_column,
        } => {
            let lon_idx = find_column(&headers, lon_column, "Longitude")?;
            let lat_idx = find_column(&headers, lat_column, "Latitude")?;
            (
                SourceIndices::Coordinates { lon_idx, lat_idx },
                HashSet::from([lon_idx, lat_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file = File::create(output_path).map_err(|e| EagridError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec!["cell_id", "lat_index", "lon_index"];
    if config.include_cell_geometry.is_some() {
        header_row.push("cell_geometry");
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer
        .write_record(&header_row)
        .map_err(|e| EagridError::CsvError(e.to_string()))?;

    let mut rows_written = 0usize;
    for result in reader.records() {
        let record = result.map_err(|e| EagridError::CsvError(e.to_string()))?;

        let cells = match &source_indices {
            SourceIndices::Geometry(idx) => {
                let geom_str = record.get(*idx).ok_or_else(|| {
                    EagridError::CsvError(format!("Missing geometry column at index {idx}"))
                })?;
                Cell::from_geometry(parse_geometry(geom_str)?)?
            }
            SourceIndices::Coordinates { lon_idx, lat_idx } => {
                let lon = parse_degrees(&record, *lon_idx, "longitude")?;
                let lat = parse_degrees(&record, *lat_idx, "latitude")?;
                vec![Cell::from_lat_lng(lat, lon)?]
            }
        };

        for cell in cells {
            let mut row: Vec<String> = vec![
                cell.id(),
                cell.lat_index().to_string(),
                cell.lon_index().to_string(),
            ];

            if let Some(format) = config.include_cell_geometry {
                row.push(match format {
                    GeometryFormat::Wkt => polygon_to_wkt(&cell.to_polygon()),
                    GeometryFormat::GeoJson => cell.to_geojson_string(),
                });
            }

            for (i, field) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    row.push(field.to_string());
                }
            }
            writer
                .write_record(&row)
                .map_err(|e| EagridError::CsvError(e.to_string()))?;
            rows_written += 1;
        }
    }

    writer
        .flush()
        .map_err(|e| EagridError::CsvError(e.to_string()))?;

    tracing::debug!(rows_written, "tagged csv rows with grid cells");
    Ok(())
}
