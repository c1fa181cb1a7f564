use crate::cell::Cell;
use crate::error::EagridError;
use arrow_array::{Float64Array, Int64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use geoarrow_array::IntoArrow;
use geoarrow_array::array::{PointArray, PolygonArray};
use geoarrow_array::builder::{PointBuilder, PolygonBuilder};
use geoarrow_schema::{Crs, Dimension, Metadata, PointType, PolygonType};
use rayon::prelude::*;
use std::sync::Arc;

fn wgs84_metadata() -> Arc<Metadata> {
    let crs = Crs::from_authority_code("EPSG:4326".to_string());
    Arc::new(Metadata::new(crs, None))
}

/// Trait for converting collections of [`Cell`]s to Arrow arrays.
///
/// Implemented for `[Cell]` and `Vec<Cell>`.
pub trait CellsToArrow {
    /// Converts cell centers to an Arrow PointArray.
    fn to_arrow_points(&self) -> PointArray;
    /// Converts cells to an Arrow PolygonArray of their rectangles.
    fn to_arrow_polygons(&self) -> PolygonArray;
    /// Converts cells to a RecordBatch with id, lat_index, lon_index, longitude,
    /// latitude, area, and geometry.
    fn to_record_batch(&self) -> Result<RecordBatch, EagridError>;
}

impl CellsToArrow for [Cell] {
    fn to_arrow_points(&self) -> PointArray {
        let point = PointType::new(Dimension::XY, wgs84_metadata());
        let mut builder = PointBuilder::with_capacity(point, self.len());

        for cell in self {
            builder.push_point(Some(&cell.center()));
        }
        builder.finish()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        let poly = PolygonType::new(Dimension::XY, wgs84_metadata());
        let polygons: Vec<_> = self.par_iter().map(|c: &Cell| c.to_polygon()).collect();
        PolygonBuilder::from_polygons(&polygons, poly).finish()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, EagridError> {
        let polygon_array = self.to_arrow_polygons();
        let ids: StringArray = self.iter().map(|c| Some(c.id())).collect();
        let lat_indices: Int64Array = self.iter().map(|c| Some(c.lat_index())).collect();
        let lon_indices: Int64Array = self.iter().map(|c| Some(c.lon_index())).collect();
        let longitudes: Float64Array = self.iter().map(|c| Some(c.center().x())).collect();
        let latitudes: Float64Array = self.iter().map(|c| Some(c.center().y())).collect();
        let areas: Float64Array = self.iter().map(|c| Some(c.area())).collect();

        let geometry_field = polygon_array.extension_type().to_field("geometry", false);
        let schema = Schema::new(vec![
            Field::new("id", DataType::Utf8, false),
            Field::new("lat_index", DataType::Int64, false),
            Field::new("lon_index", DataType::Int64, false),
            Field::new("longitude", DataType::Float64, false),
            Field::new("latitude", DataType::Float64, false),
            Field::new("area", DataType::Float64, false),
            geometry_field,
        ]);

        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(ids),
                Arc::new(lat_indices),
                Arc::new(lon_indices),
                Arc::new(longitudes),
                Arc::new(latitudes),
                Arc::new(areas),
                Arc::new(polygon_array.into_arrow()),
            ],
        )
        .map_err(|e| EagridError::IoError(e.to_string()))
    }
}

impl CellsToArrow for Vec<Cell> {
    fn to_arrow_points(&self) -> PointArray {
        self.as_slice().to_arrow_points()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        self.as_slice().to_arrow_polygons()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, EagridError> {
        self.as_slice().to_record_batch()
    }
}
