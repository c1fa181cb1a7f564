use crate::index::constants::GEOJSON_IO_URL;
use geo::ChamberlainDuquetteArea;
use geo_types::{Coord, LineString, Point, Polygon};

/// Builds the closed ring of a cell from its south-west and north-east corners.
///
/// Vertices run `(min_lon, min_lat) -> (min_lon, max_lat) -> (max_lon, max_lat)
/// -> (max_lon, min_lat)` and back to the start, in `(longitude, latitude)` order.
pub fn create_cell_polygon(min: &Point<f64>, max: &Point<f64>) -> Polygon<f64> {
    let ring = vec![
        Coord { x: min.x(), y: min.y() },
        Coord { x: min.x(), y: max.y() },
        Coord { x: max.x(), y: max.y() },
        Coord { x: max.x(), y: min.y() },
        Coord { x: min.x(), y: min.y() },
    ];

    Polygon::new(LineString::from(ring), vec![])
}

/// Area of a WGS84 polygon in square meters.
///
/// Uses the Chamberlain-Duquette spherical approximation on the WGS84 equatorial
/// radius, the same routine GeoJSON area tools use. For rings made of meridians
/// and parallels it is exact on that sphere.
pub fn polygon_area(polygon: &Polygon<f64>) -> f64 {
    polygon.chamberlain_duquette_unsigned_area()
}

/// Serializes a polygon as WKT.
pub fn polygon_to_wkt(polygon: &Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

/// Builds a geojson.io link that renders the polygon.
pub fn polygon_to_geojson_url(polygon: &Polygon<f64>) -> String {
    let geometry = geojson::Geometry::from(polygon);
    format!(
        "{GEOJSON_IO_URL}{}",
        urlencoding::encode(&geometry.to_string())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::point;

    #[test]
    fn test_create_cell_polygon() {
        let min = point! { x: 6.0, y: 46.8 };
        let max = point! { x: 6.001, y: 46.801 };
        let poly = create_cell_polygon(&min, &max);
        let exterior = poly.exterior();

        assert_eq!(exterior.coords().count(), 5);
        assert_eq!(exterior.0[0], exterior.0[4]);
        assert_eq!(exterior.0[1], Coord { x: 6.0, y: 46.801 });
        assert_eq!(exterior.0[3], Coord { x: 6.001, y: 46.8 });
    }

    #[test]
    fn test_polygon_area_one_degree_at_equator() {
        let poly = create_cell_polygon(&point! { x: 0.0, y: 0.0 }, &point! { x: 1.0, y: 1.0 });
        let area = polygon_area(&poly);
        // About 111.3 km on each side.
        assert!((area / 1e6 - 12_391.4).abs() < 1.0);
    }

    #[test]
    fn test_polygon_to_wkt() {
        let poly = create_cell_polygon(&point! { x: 1.0, y: 2.0 }, &point! { x: 3.0, y: 4.0 });
        let wkt = polygon_to_wkt(&poly);
        assert!(wkt.starts_with("POLYGON"));
    }

    #[test]
    fn test_geojson_url_is_encoded() {
        let poly = create_cell_polygon(&point! { x: 1.0, y: 2.0 }, &point! { x: 3.0, y: 4.0 });
        let url = polygon_to_geojson_url(&poly);

        assert!(url.starts_with(GEOJSON_IO_URL));
        let data = &url[GEOJSON_IO_URL.len()..];
        assert!(!data.contains('"'));
        assert!(!data.contains('{'));
        assert!(data.contains("Polygon"));

        let decoded = urlencoding::decode(data).unwrap();
        let geojson: geojson::GeoJson = decoded.parse().unwrap();
        assert!(matches!(geojson, geojson::GeoJson::Geometry(_)));
    }
}
