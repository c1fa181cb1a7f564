use crate::coord::Coordinate;
use crate::error::EagridError;
use crate::geom::{create_cell_polygon, polygon_area, polygon_to_geojson_url};
use crate::index::{
    EXPECTED_EDGE_LENGTH_METERS, compute_latitude_rad_increment, decode_cell_identifier,
    generate_cell_identifier, index_to_point, lat_lng_to_index, latitude_meters_to_radians,
    latitude_radians_to_meters, longitude_rad_increment, longitude_radians_to_meters,
    row_latitude_rad,
};
use crate::io::arrow::CellsToArrow;
use crate::io::parquet::CellsToGeoParquet;
use arrow_array::RecordBatch;
use geo::Centroid;
use geo_types::{Geometry, LineString, Point, Polygon};
use geoarrow_array::array::{PointArray, PolygonArray};
use std::collections::HashSet;
use std::path::Path;

/// A single cell of the approximately equal-area grid.
///
/// A cell is identified by its row (`lat_index`, negative south of the equator)
/// and column (`lon_index`). Every column has the same angular width; each row
/// gets its own angular height so that cells stay close to 30m x 30m.
///
/// `Cell` is an immutable value: everything derived from the indices is computed
/// once in [`Cell::new`].
///
/// # Example
///
/// ```
/// use eagrid_rs::Cell;
///
/// # fn main() -> Result<(), eagrid_rs::EagridError> {
/// let cell = Cell::from_lat_lng(46.852275, 6.0)?;
/// println!("Cell ({}, {}) id {}", cell.lat_index(), cell.lon_index(), cell.id());
///
/// // Roughly 30m x 30m
/// assert!((cell.area().sqrt() - 30.0).abs() < 0.5);
/// let url = cell.to_geojson_url();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    lat_index: i64,
    lon_index: i64,
    latitude_rad_increment: f64,
    min_point: Point<f64>,
    max_point: Point<f64>,
}

impl Cell {
    /// Creates the cell at row `lat_index`, column `lon_index`.
    ///
    /// # Errors
    ///
    /// [`EagridError::Domain`] when the row (or its upper edge) lies beyond a pole.
    pub fn new(lat_index: i64, lon_index: i64) -> Result<Self, EagridError> {
        // Row midpoint rather than lower edge, so the increment is centered.
        let latitude_rad = row_latitude_rad(lat_index)?;
        let latitude_rad_increment = compute_latitude_rad_increment(latitude_rad)?;

        let min_point = index_to_point(lat_index, lon_index)?;
        let max_point = index_to_point(lat_index + 1, lon_index + 1)?;

        Ok(Self {
            lat_index,
            lon_index,
            latitude_rad_increment,
            min_point,
            max_point,
        })
    }

    /// Creates the cell containing a WGS84 position given in degrees.
    ///
    /// Latitudes are expected strictly between the poles; no range check is made.
    ///
    /// # Errors
    ///
    /// [`EagridError::InvalidCoordinate`] for NaN or infinite input, otherwise
    /// the errors of [`Cell::new`].
    pub fn from_lat_lng(latitude_deg: f64, longitude_deg: f64) -> Result<Self, EagridError> {
        if !latitude_deg.is_finite() || !longitude_deg.is_finite() {
            return Err(EagridError::InvalidCoordinate {
                lat: latitude_deg,
                lon: longitude_deg,
            });
        }
        let (lat_index, lon_index) = lat_lng_to_index(latitude_deg, longitude_deg);
        Self::new(lat_index, lon_index)
    }

    /// Creates the cell containing a `(lon, lat)` coordinate.
    ///
    /// # Example
    /// ```
    /// use eagrid_rs::Cell;
    /// use geo_types::Point;
    ///
    /// # fn main() -> Result<(), eagrid_rs::EagridError> {
    /// let from_tuple = Cell::from_wgs84(&(6.0, 46.852275))?;
    /// let from_point = Cell::from_wgs84(&Point::new(6.0, 46.852275))?;
    /// assert_eq!(from_tuple, from_point);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_wgs84(coord: &impl Coordinate) -> Result<Self, EagridError> {
        Self::from_lat_lng(coord.latitude(), coord.longitude())
    }

    /// Restores a cell from an identifier produced by [`Cell::id`].
    pub fn from_id(id: &str) -> Result<Self, EagridError> {
        let (_, lat_index, lon_index) = decode_cell_identifier(id)?;
        Self::new(lat_index, lon_index)
    }

    /// Creates the distinct cells crossed by a WGS84 line string.
    ///
    /// Samples each segment at half a cell edge and keeps the first occurrence
    /// of every cell, in line order.
    pub fn from_line_string(line: &LineString<f64>) -> Result<Vec<Self>, EagridError> {
        let step_deg = 0.5
            * longitude_rad_increment()
                .min(latitude_meters_to_radians(EXPECTED_EDGE_LENGTH_METERS))
                .to_degrees();

        if line.0.len() == 1 {
            return Ok(vec![Self::from_wgs84(&line.0[0])?]);
        }

        let mut seen: HashSet<(i64, i64)> = HashSet::new();
        let mut cells = Vec::new();

        for window in line.0.windows(2) {
            let start = &window[0];
            let end = &window[1];

            let dx = end.x - start.x;
            let dy = end.y - start.y;
            let steps = ((dx * dx + dy * dy).sqrt() / step_deg).ceil() as usize;

            for i in 0..=steps {
                let t = if steps == 0 {
                    0.0
                } else {
                    i as f64 / steps as f64
                };
                let cell = Self::from_lat_lng(start.y + t * dy, start.x + t * dx)?;
                if seen.insert((cell.lat_index, cell.lon_index)) {
                    cells.push(cell);
                }
            }
        }

        Ok(cells)
    }

    /// Creates cells from an arbitrary WGS84 `geo_types::Geometry`.
    ///
    /// Points produce their cell, polygons their centroid's cell, and lines every
    /// cell they cross. Collections are flattened.
    pub fn from_geometry(geom: Geometry<f64>) -> Result<Vec<Self>, EagridError> {
        match geom {
            Geometry::Point(pt) => Ok(vec![Self::from_wgs84(&pt)?]),
            Geometry::MultiPoint(mp) => mp.0.iter().map(|pt| Self::from_wgs84(pt)).collect(),
            Geometry::LineString(line) => Self::from_line_string(&line),
            Geometry::MultiLineString(mls) => {
                let mut all_cells = Vec::new();
                for line in &mls.0 {
                    all_cells.extend(Self::from_line_string(line)?);
                }
                Ok(all_cells)
            }
            Geometry::Polygon(poly) => poly
                .centroid()
                .map(|c| Self::from_wgs84(&c))
                .into_iter()
                .collect(),
            Geometry::MultiPolygon(mp) => mp
                .0
                .iter()
                .filter_map(|poly| poly.centroid())
                .map(|c| Self::from_wgs84(&c))
                .collect(),
            Geometry::GeometryCollection(gc) => {
                let mut all_cells = Vec::new();
                for g in gc.0 {
                    all_cells.extend(Self::from_geometry(g)?);
                }
                Ok(all_cells)
            }
            _ => Err(EagridError::GeometryParseError(
                "Unsupported geometry type".to_string(),
            )),
        }
    }

    pub fn lat_index(&self) -> i64 {
        self.lat_index
    }

    pub fn lon_index(&self) -> i64 {
        self.lon_index
    }

    /// Angular height of this cell's row, in radians.
    pub fn latitude_rad_increment(&self) -> f64 {
        self.latitude_rad_increment
    }

    /// Angular width of the cell, in radians. Identical for every cell.
    pub fn longitude_rad_increment(&self) -> f64 {
        longitude_rad_increment()
    }

    /// South-west corner (`x` = longitude, `y` = latitude, degrees).
    pub fn min_point(&self) -> Point<f64> {
        self.min_point
    }

    /// North-east corner (`x` = longitude, `y` = latitude, degrees).
    pub fn max_point(&self) -> Point<f64> {
        self.max_point
    }

    pub fn center(&self) -> Point<f64> {
        Point::new(
            (self.min_point.x() + self.max_point.x()) / 2.0,
            (self.min_point.y() + self.max_point.y()) / 2.0,
        )
    }

    /// Whether the coordinate falls in this cell (south/west edges inclusive).
    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        (self.min_point.x()..self.max_point.x()).contains(&coord.longitude())
            && (self.min_point.y()..self.max_point.y()).contains(&coord.latitude())
    }

    /// Nominal `(width, height)` of the cell in meters.
    ///
    /// The width is measured along the parallel through the cell center, the
    /// height from this row's latitude increment.
    pub fn dimensions(&self) -> (f64, f64) {
        let width = longitude_radians_to_meters(
            longitude_rad_increment(),
            self.center().y().to_radians(),
        );
        let height = latitude_radians_to_meters(self.latitude_rad_increment);
        (width, height)
    }

    /// Compact URL-safe identifier of this cell.
    pub fn id(&self) -> String {
        generate_cell_identifier(self.lat_index, self.lon_index)
    }

    /// Converts this cell to a closed rectangular polygon in `(lon, lat)` order.
    pub fn to_polygon(&self) -> Polygon<f64> {
        create_cell_polygon(&self.min_point, &self.max_point)
    }

    pub fn to_geojson(&self) -> geojson::Geometry {
        geojson::Geometry::from(&self.to_polygon())
    }

    /// GeoJSON Polygon text of this cell.
    pub fn to_geojson_string(&self) -> String {
        self.to_geojson().to_string()
    }

    /// geojson.io link that displays this cell.
    pub fn to_geojson_url(&self) -> String {
        polygon_to_geojson_url(&self.to_polygon())
    }

    /// Actual area of the cell polygon in square meters.
    ///
    /// Differs slightly from the 900 m² target; that is expected.
    pub fn area(&self) -> f64 {
        polygon_area(&self.to_polygon())
    }

    /// Converts this cell's center to an Arrow PointArray.
    pub fn to_arrow_points(&self) -> PointArray {
        std::slice::from_ref(self).to_arrow_points()
    }

    /// Converts this cell to an Arrow PolygonArray.
    pub fn to_arrow_polygons(&self) -> PolygonArray {
        std::slice::from_ref(self).to_arrow_polygons()
    }

    /// Converts this cell to an Arrow RecordBatch with all attributes.
    pub fn to_record_batch(&self) -> Result<RecordBatch, EagridError> {
        std::slice::from_ref(self).to_record_batch()
    }

    /// Writes this cell to a GeoParquet file.
    pub fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), EagridError> {
        std::slice::from_ref(self).to_geoparquet(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{EXPECTED_AREA, REFERENCE_LATITUDE_RAD};

    #[test]
    fn test_reference_scenario() -> Result<(), EagridError> {
        let cell = Cell::from_lat_lng(46.852275, 6.0)?;

        assert_eq!(cell.lat_index(), 226_561);
        assert_eq!(cell.lon_index(), 15_208);
        assert!(cell.contains(&(6.0, 46.852275)));
        assert!(cell.min_point().y() <= 46.852275 && 46.852275 < cell.max_point().y());
        assert!(cell.min_point().x() <= 6.0 && 6.0 < cell.max_point().x());

        let edge = cell.area().sqrt();
        assert!((edge - 30.0).abs() < 0.1, "edge was {edge}");
        Ok(())
    }

    #[test]
    fn test_increment_depends_only_on_row() -> Result<(), EagridError> {
        let a = Cell::new(1_000, -5)?;
        let b = Cell::new(1_000, 90_000)?;
        let c = Cell::new(1_001, -5)?;

        assert_eq!(a.latitude_rad_increment(), b.latitude_rad_increment());
        assert_ne!(a.latitude_rad_increment(), c.latitude_rad_increment());
        assert_eq!(a.longitude_rad_increment(), c.longitude_rad_increment());
        Ok(())
    }

    #[test]
    fn test_center_roundtrip() -> Result<(), EagridError> {
        for lat_index in [-300_000, -226_561, -1, 0, 1, 12_345, 226_561, 300_000] {
            for lon_index in [-26_000, -1, 0, 1, 15_208, 26_000] {
                let cell = Cell::new(lat_index, lon_index)?;
                let back = Cell::from_wgs84(&cell.center())?;

                assert_eq!(back.lat_index(), lat_index);
                assert_eq!(back.lon_index(), lon_index);
            }
        }
        Ok(())
    }

    #[test]
    fn test_min_point_roundtrip_within_floor_tolerance() -> Result<(), EagridError> {
        for lat_index in [-50_000, 0, 3, 226_561] {
            let cell = Cell::new(lat_index, 42)?;
            let min = cell.min_point();
            let back = Cell::from_lat_lng(min.y(), min.x())?;

            assert!(back.lat_index() == lat_index || back.lat_index() == lat_index - 1);
            assert!(back.lon_index() == 42 || back.lon_index() == 41);
        }
        Ok(())
    }

    #[test]
    fn test_neighbouring_cells_share_edges() -> Result<(), EagridError> {
        let cell = Cell::new(100_000, 7)?;
        let north = Cell::new(100_001, 7)?;
        let east = Cell::new(100_000, 8)?;

        assert_eq!(cell.max_point().y(), north.min_point().y());
        assert_eq!(cell.max_point().x(), east.min_point().x());
        Ok(())
    }

    #[test]
    fn test_area_near_reference_latitude() -> Result<(), EagridError> {
        let cell = Cell::from_lat_lng(REFERENCE_LATITUDE_RAD.to_degrees(), 6.0)?;
        let deviation = (cell.area() - EXPECTED_AREA).abs() / EXPECTED_AREA;
        assert!(deviation < 0.05);

        let (width, height) = cell.dimensions();
        assert!((width - 30.0).abs() < 0.01);
        assert!((height - 30.0).abs() < 0.01);
        Ok(())
    }

    #[test]
    fn test_distortion_grows_away_from_reference() -> Result<(), EagridError> {
        let reference = REFERENCE_LATITUDE_RAD.to_degrees();
        let distortion = |lat: f64| -> Result<f64, EagridError> {
            let cell = Cell::from_lat_lng(lat, 6.0)?;
            let area_deviation = (cell.area() - EXPECTED_AREA).abs() / EXPECTED_AREA;
            assert!(area_deviation < 0.01, "area deviation {area_deviation} at {lat}");
            let (width, height) = cell.dimensions();
            Ok((width / height - 1.0).abs())
        };

        for side in [1.0, -1.0] {
            let mut previous = distortion(reference)?;
            for offset in [5.0, 15.0, 30.0, 40.0] {
                let current = distortion(reference + side * offset)?;
                assert!(current > previous, "no growth at offset {}", side * offset);
                previous = current;
            }
        }
        Ok(())
    }

    #[test]
    fn test_southern_hemisphere() -> Result<(), EagridError> {
        let cell = Cell::from_lat_lng(-33.86, 151.2)?;

        assert!(cell.lat_index() < 0);
        assert!(cell.contains(&(151.2, -33.86)));
        assert!((cell.area().sqrt() - 30.0).abs() < 0.5);
        Ok(())
    }

    #[test]
    fn test_beyond_pole_is_domain_error() {
        let result = Cell::new(400_000, 0);
        assert!(matches!(result, Err(EagridError::Domain { .. })));

        let result = Cell::new(-400_000, 0);
        assert!(matches!(result, Err(EagridError::Domain { .. })));
    }

    #[test]
    fn test_non_finite_input() {
        let result = Cell::from_lat_lng(f64::NAN, 6.0);
        assert!(matches!(result, Err(EagridError::InvalidCoordinate { .. })));

        let result = Cell::from_lat_lng(46.0, f64::INFINITY);
        assert!(matches!(result, Err(EagridError::InvalidCoordinate { .. })));
    }

    #[test]
    fn test_polygon_ring_order() -> Result<(), EagridError> {
        let cell = Cell::new(10, 20)?;
        let polygon = cell.to_polygon();
        let ring = &polygon.exterior().0;
        let (min, max) = (cell.min_point(), cell.max_point());

        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], ring[4]);
        assert_eq!((ring[0].x, ring[0].y), (min.x(), min.y()));
        assert_eq!((ring[1].x, ring[1].y), (min.x(), max.y()));
        assert_eq!((ring[2].x, ring[2].y), (max.x(), max.y()));
        assert_eq!((ring[3].x, ring[3].y), (max.x(), min.y()));
        Ok(())
    }

    #[test]
    fn test_geojson_output() -> Result<(), EagridError> {
        let cell = Cell::from_lat_lng(46.852275, 6.0)?;
        let json: serde_json::Value = serde_json::from_str(&cell.to_geojson_string())
            .map_err(|e| EagridError::IoError(e.to_string()))?;

        assert_eq!(json["type"], "Polygon");
        let ring = json["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], ring[4]);
        // Longitude first
        assert!((ring[0][0].as_f64().unwrap() - cell.min_point().x()).abs() < 1e-12);
        assert!((ring[0][1].as_f64().unwrap() - cell.min_point().y()).abs() < 1e-12);

        assert!(cell.to_geojson_url().starts_with("http://geojson.io/#data="));
        Ok(())
    }

    #[test]
    fn test_id_roundtrip() -> Result<(), EagridError> {
        let cell = Cell::from_lat_lng(-12.5, -77.0)?;
        let restored = Cell::from_id(&cell.id())?;
        assert_eq!(cell, restored);
        Ok(())
    }

    #[test]
    fn test_from_geometry_point() -> Result<(), EagridError> {
        let cells = Cell::from_geometry(Geometry::Point(Point::new(6.0, 46.852275)))?;
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0], Cell::from_lat_lng(46.852275, 6.0)?);
        Ok(())
    }

    #[test]
    fn test_from_geometry_linestring() -> Result<(), EagridError> {
        let line = LineString::from(vec![(6.0, 46.85), (6.003, 46.8515)]);
        let cells = Cell::from_geometry(Geometry::LineString(line))?;

        assert!(cells.len() > 5);
        let unique: HashSet<_> = cells.iter().map(|c| (c.lat_index(), c.lon_index())).collect();
        assert_eq!(unique.len(), cells.len());
        assert!(cells[0].contains(&(6.0, 46.85)));
        assert!(cells.last().unwrap().contains(&(6.003, 46.8515)));
        Ok(())
    }

    #[test]
    fn test_from_geometry_polygon_uses_centroid() -> Result<(), EagridError> {
        use geo_types::polygon;

        let poly = polygon![
            (x: 6.0, y: 46.0),
            (x: 6.002, y: 46.0),
            (x: 6.002, y: 46.002),
            (x: 6.0, y: 46.002),
            (x: 6.0, y: 46.0),
        ];
        let cells = Cell::from_geometry(Geometry::Polygon(poly))?;

        assert_eq!(cells.len(), 1);
        assert!(cells[0].contains(&(6.001, 46.001)));
        Ok(())
    }

    #[test]
    fn test_from_geometry_collection() -> Result<(), EagridError> {
        use geo_types::{GeometryCollection, MultiPoint};

        let gc = GeometryCollection::new_from(vec![
            Geometry::Point(Point::new(6.0, 46.8)),
            Geometry::MultiPoint(MultiPoint::new(vec![
                Point::new(7.0, 47.0),
                Point::new(8.0, 47.5),
            ])),
        ]);
        let cells = Cell::from_geometry(Geometry::GeometryCollection(gc))?;

        assert_eq!(cells.len(), 3);
        Ok(())
    }
}
