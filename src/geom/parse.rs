use crate::error::EagridError;
use geo_types::{Geometry, GeometryCollection};
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

/// Parses a geometry string, auto-detecting WKT or GeoJSON format.
///
/// GeoJSON is detected by a leading `{`, everything else is tried as WKT.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, EagridError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(EagridError::GeometryParseError("Empty geometry".to_string()));
    }
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

/// Parses a GeoJSON string into a `geo_types::Geometry`.
///
/// Features yield their geometry; a FeatureCollection becomes a
/// `GeometryCollection` of its features' geometries.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, EagridError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| EagridError::GeometryParseError(e.to_string()))?;

    match geojson {
        GeoJson::Geometry(geom) => convert_geojson(geom),
        GeoJson::Feature(feat) => feat
            .geometry
            .ok_or_else(|| EagridError::GeometryParseError("Feature has no geometry".to_string()))
            .and_then(convert_geojson),
        GeoJson::FeatureCollection(fc) => {
            let geometries = fc
                .features
                .into_iter()
                .filter_map(|f| f.geometry)
                .map(convert_geojson)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Geometry::GeometryCollection(GeometryCollection::new_from(
                geometries,
            )))
        }
    }
}

fn convert_geojson(geom: geojson::Geometry) -> Result<Geometry<f64>, EagridError> {
    Geometry::try_from(geom).map_err(|e| EagridError::GeometryParseError(e.to_string()))
}

/// Parses a WKT string into a `geo_types::Geometry`.
pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, EagridError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| EagridError::GeometryParseError(e.to_string()))?;

    wkt.try_into().map_err(|_| {
        EagridError::GeometryParseError("Failed to convert WKT to geometry".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_geojson_point() -> Result<(), EagridError> {
        let json = r#"{"type":"Point","coordinates":[6.0,46.852275]}"#;
        match parse_geometry(json)? {
            Geometry::Point(pt) => {
                assert!((pt.x() - 6.0).abs() < 1e-12);
                assert!((pt.y() - 46.852275).abs() < 1e-12);
            }
            other => panic!("Expected Point, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_geojson_feature() -> Result<(), EagridError> {
        let json = r#"{"type":"Feature","properties":{},"geometry":{"type":"LineString","coordinates":[[6.0,46.8],[6.1,46.9]]}}"#;
        match parse_geometry(json)? {
            Geometry::LineString(line) => assert_eq!(line.0.len(), 2),
            other => panic!("Expected LineString, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_geojson_feature_collection() -> Result<(), EagridError> {
        let json = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[6.0,46.8]}},
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[7.0,47.0]}}
        ]}"#;
        match parse_geometry(json)? {
            Geometry::GeometryCollection(gc) => assert_eq!(gc.0.len(), 2),
            other => panic!("Expected GeometryCollection, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_feature_without_geometry() {
        let json = r#"{"type":"Feature","properties":{},"geometry":null}"#;
        assert!(matches!(
            parse_geometry(json),
            Err(EagridError::GeometryParseError(_))
        ));
    }

    #[test]
    fn test_parse_wkt_polygon() -> Result<(), EagridError> {
        let wkt = "POLYGON((6 46, 7 46, 7 47, 6 47, 6 46))";
        match parse_geometry(wkt)? {
            Geometry::Polygon(poly) => assert_eq!(poly.exterior().0.len(), 5),
            other => panic!("Expected Polygon, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_geometry("not a geometry").is_err());
        assert!(parse_geometry("   ").is_err());
    }
}
