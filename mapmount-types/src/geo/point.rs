use serde::{Deserialize, Serialize};

/// A point on the surface of a celestial body, in degrees.
pub trait GeoPoint {
    /// Numeric type used to represent coordinates.
    type Num;

    /// Latitude in degrees.
    fn lat(&self) -> Self::Num;
    /// Longitude in degrees.
    fn lon(&self) -> Self::Num;
}

/// Geo point that can be constructed from latitude and longitude.
pub trait NewGeoPoint<N = f64>: GeoPoint<Num = N> + Sized {
    /// Creates a new point.
    fn latlon(lat: N, lon: N) -> Self;
}

/// 2d point on the surface of a celestial body.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint2d {
    lat: f64,
    lon: f64,
}

impl GeoPoint for GeoPoint2d {
    type Num = f64;

    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }
}

impl NewGeoPoint<f64> for GeoPoint2d {
    fn latlon(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl GeoPoint2d {
    /// Creates a new point from another.
    pub fn from(other: &impl GeoPoint<Num = f64>) -> Self {
        Self {
            lat: other.lat(),
            lon: other.lon(),
        }
    }

    /// Returns true if the latitude is within `[-90, 90]` and the longitude within `[-180, 180]`.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Creates a new GeoPoint2d from latitude and longitude values (in degrees).
///
/// ```
/// use mapmount_types::geo::GeoPoint;
/// use mapmount_types::latlon;
///
/// let point = latlon!(38.0, 52.0);
/// assert_eq!(point.lat(), 38.0);
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        <$crate::geo::GeoPoint2d as $crate::geo::NewGeoPoint<f64>>::latlon($lat, $lon)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity() {
        assert!(crate::latlon!(55.0, 37.0).is_valid());
        assert!(!crate::latlon!(91.0, 0.0).is_valid());
        assert!(!crate::latlon!(0.0, -180.5).is_valid());
    }

    #[test]
    fn deserializes_from_json() {
        let point: GeoPoint2d =
            serde_json::from_str(r#"{"lat": 37.566, "lon": 126.9784}"#).expect("invalid json");
        assert_eq!(point, crate::latlon!(37.566, 126.9784));
    }
}
