use geo_types::Point;

/// Trait for types that can provide WGS84 coordinates in degrees.
///
/// Implemented for `(lon, lat)` tuples and `geo_types::Point<f64>`, so functions
/// accept either type. Longitude comes first, as in GeoJSON.
pub trait Coordinate {
    /// Returns the x-coordinate (longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude).
    fn y(&self) -> f64;

    fn longitude(&self) -> f64 {
        self.x()
    }

    fn latitude(&self) -> f64 {
        self.y()
    }
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

impl Coordinate for geo_types::Coord<f64> {
    fn x(&self) -> f64 {
        self.x
    }
    fn y(&self) -> f64 {
        self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    #[test]
    fn test_coordinate_trait_tuple() {
        let tuple = (6.0, 46.85);
        assert_eq!(tuple.longitude(), 6.0);
        assert_eq!(tuple.latitude(), 46.85);
    }

    #[test]
    fn test_coordinate_trait_point() {
        let point = Point::new(6.0, 46.85);
        assert_eq!(point.x(), 6.0);
        assert_eq!(point.y(), 46.85);
    }

    #[test]
    fn test_coordinate_trait_coord() {
        let c = coord! { x: -70.6, y: -33.86 };
        assert_eq!(c.longitude(), -70.6);
        assert_eq!(c.latitude(), -33.86);
    }
}
