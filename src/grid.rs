use crate::cell::Cell;
use crate::coord::Coordinate;
use crate::error::EagridError;
use crate::index::{MAX_GRID_CELLS, lat_lng_to_index};
use geo_types::{Polygon, Rect};
use geojson::{Feature, FeatureCollection};
use serde::Serialize;

/// All cells covering a WGS84 bounding box.
///
/// Cells are stored row by row, south to north and west to east within a row,
/// so lookups are plain index arithmetic.
#[derive(Debug, Clone)]
pub struct CellGrid {
    cells: Vec<Cell>,
    min_lat_index: i64,
    min_lon_index: i64,
    rows: usize,
    cols: usize,
}

#[derive(Serialize)]
struct CellProperties {
    id: String,
    lat_index: i64,
    lon_index: i64,
    area: f64,
}

impl CellGrid {
    pub fn builder() -> CellGridBuilder {
        CellGridBuilder::new()
    }

    /// Generates the cells covering `[min_lon, max_lon] x [min_lat, max_lat]`.
    ///
    /// # Errors
    ///
    /// [`EagridError::TooManyCells`] when the extent exceeds [`MAX_GRID_CELLS`],
    /// [`EagridError::InvalidCoordinate`] for non-finite bounds, or a domain error
    /// when a row falls beyond a pole.
    pub fn from_bounds(
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    ) -> Result<Self, EagridError> {
        for (lat, lon) in [(min_lat, min_lon), (max_lat, max_lon)] {
            if !lat.is_finite() || !lon.is_finite() {
                return Err(EagridError::InvalidCoordinate { lat, lon });
            }
        }

        let (south, west) = lat_lng_to_index(min_lat.min(max_lat), min_lon.min(max_lon));
        let (north, east) = lat_lng_to_index(min_lat.max(max_lat), min_lon.max(max_lon));

        let rows = (north - south + 1) as u64;
        let cols = (east - west + 1) as u64;
        let requested = rows.saturating_mul(cols);
        if requested > MAX_GRID_CELLS {
            return Err(EagridError::TooManyCells {
                requested,
                limit: MAX_GRID_CELLS,
            });
        }

        let mut cells = Vec::with_capacity(requested as usize);
        for lat_index in south..=north {
            for lon_index in west..=east {
                cells.push(Cell::new(lat_index, lon_index)?);
            }
        }
        tracing::debug!(rows, cols, "generated cell grid");

        Ok(Self {
            cells,
            min_lat_index: south,
            min_lon_index: west,
            rows: rows as usize,
            cols: cols as usize,
        })
    }

    pub fn from_rect(rect: &Rect<f64>) -> Result<Self, EagridError> {
        Self::from_bounds(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of `(rows, columns)` in the grid.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Returns the grid cell containing a `(lon, lat)` coordinate, if any.
    pub fn get_cell_at(&self, coord: &impl Coordinate) -> Option<&Cell> {
        let (lat_index, lon_index) = lat_lng_to_index(coord.latitude(), coord.longitude());
        let row = usize::try_from(lat_index - self.min_lat_index).ok()?;
        let col = usize::try_from(lon_index - self.min_lon_index).ok()?;
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    pub fn to_polygons(&self) -> Vec<Polygon<f64>> {
        self.cells.iter().map(|cell| cell.to_polygon()).collect()
    }

    pub fn filter<F>(&self, predicate: F) -> Vec<&Cell>
    where
        F: Fn(&Cell) -> bool,
    {
        self.cells.iter().filter(|cell| predicate(cell)).collect()
    }

    /// GeoJSON FeatureCollection with one polygon feature per cell.
    ///
    /// Each feature carries `id`, `lat_index`, `lon_index` and `area` properties.
    pub fn to_feature_collection(&self) -> Result<FeatureCollection, EagridError> {
        let features = self
            .cells
            .iter()
            .map(|cell| -> Result<Feature, EagridError> {
                let properties = CellProperties {
                    id: cell.id(),
                    lat_index: cell.lat_index(),
                    lon_index: cell.lon_index(),
                    area: cell.area(),
                };
                let properties = match serde_json::to_value(properties)
                    .map_err(|e| EagridError::IoError(e.to_string()))?
                {
                    serde_json::Value::Object(map) => Some(map),
                    _ => None,
                };
                Ok(Feature {
                    bbox: None,
                    geometry: Some(cell.to_geojson()),
                    id: None,
                    properties,
                    foreign_members: None,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        })
    }
}

#[derive(Debug, Default)]
pub struct CellGridBuilder {
    min_lon: Option<f64>,
    min_lat: Option<f64>,
    max_lon: Option<f64>,
    max_lat: Option<f64>,
}

impl CellGridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(mut self, min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        self.min_lon = Some(min_lon);
        self.min_lat = Some(min_lat);
        self.max_lon = Some(max_lon);
        self.max_lat = Some(max_lat);
        self
    }

    /// Sets the extent from two `(lon, lat)` corners.
    pub fn wgs84_extent(self, min: &impl Coordinate, max: &impl Coordinate) -> Self {
        self.bounds(min.longitude(), min.latitude(), max.longitude(), max.latitude())
    }

    pub fn rect(self, rect: &Rect<f64>) -> Self {
        self.bounds(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }

    pub fn build(self) -> Result<CellGrid, EagridError> {
        match (self.min_lon, self.min_lat, self.max_lon, self.max_lat) {
            (Some(min_lon), Some(min_lat), Some(max_lon), Some(max_lat)) => {
                CellGrid::from_bounds(min_lon, min_lat, max_lon, max_lat)
            }
            _ => Err(EagridError::MissingExtent),
        }
    }
}
