use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude
///
/// Serialized as `{latitude, longitude}`, the shape map widgets and search
/// results use for locations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    #[serde(rename = "latitude")]
    pub lat: f64,
    #[serde(rename = "longitude")]
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }
}

/// Anything a map widget reports as its visible extent.
///
/// Widgets expose the viewport through corner accessors rather than plain
/// fields; drawn rectangle overlays report their geometry the same way.
pub trait ViewportSource {
    fn south_west(&self) -> LatLng;
    fn north_east(&self) -> LatLng;
}

impl ViewportSource for LatLngBounds {
    fn south_west(&self) -> LatLng {
        self.south_west
    }

    fn north_east(&self) -> LatLng {
        self.north_east
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(52.0325133, 5.2289087);
        assert_eq!(coord.lat, 52.0325133);
        assert_eq!(coord.lng, 5.2289087);
        assert!(coord.is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
    }

    #[test]
    fn test_lat_lng_serde_field_names() {
        let coord: LatLng =
            serde_json::from_str(r#"{"latitude": 10.0, "longitude": 20.0}"#).unwrap();
        assert_eq!(coord, LatLng::new(10.0, 20.0));

        let value = serde_json::to_value(coord).unwrap();
        assert_eq!(value["latitude"], 10.0);
        assert_eq!(value["longitude"], 20.0);
    }

    #[test]
    fn test_viewport_source_corners() {
        let bounds = LatLngBounds::from_coords(1.0, 2.0, 3.0, 4.0);
        assert_eq!(bounds.south_west(), LatLng::new(1.0, 2.0));
        assert_eq!(bounds.north_east(), LatLng::new(3.0, 4.0));
    }
}
