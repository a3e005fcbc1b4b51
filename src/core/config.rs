//! Configuration for the map manager and the state it binds to the widget
//!
//! `ManagerSettings` is the user-facing configuration (loadable from JSON),
//! `MapDefaults` is what `restore_defaults` copies from, and `MapConfig` is
//! the live state the widget reads.

use crate::{
    core::{
        constants::{DEFAULT_BOUNDS_COOLDOWN, DEFAULT_CENTER, DEFAULT_COLORS, DEFAULT_ZOOM},
        geo::LatLng,
    },
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path, str::FromStr, time::Duration};

/// Options handed to the map widget as-is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    pub scrollwheel: bool,
    pub street_view_control: bool,
    pub disable_default_ui: bool,
    pub zoom_control: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            scrollwheel: true,
            street_view_control: false,
            disable_default_ui: true,
            zoom_control: true,
        }
    }
}

/// Where the widget places its drawing toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlPosition {
    TopLeft,
    TopCenter,
    TopRight,
    BottomCenter,
}

/// Shapes the widget lets users draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverlayType {
    Rectangle,
    Circle,
    Polygon,
    Polyline,
    Marker,
}

/// Drawing toolbar configuration, only set when the widget supports drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingOptions {
    pub drawing_control: bool,
    pub position: ControlPosition,
    pub drawing_modes: Vec<OverlayType>,
}

impl DrawingOptions {
    /// Single rectangle mode with the toolbar centered at the top
    pub fn rectangle() -> Self {
        Self {
            drawing_control: true,
            position: ControlPosition::TopCenter,
            drawing_modes: vec![OverlayType::Rectangle],
        }
    }
}

/// One corner of the viewport bounds; both fields are unset when there is
/// no active viewport filter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Corner {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Corner {
    pub fn new(position: LatLng) -> Self {
        Self {
            latitude: Some(position.lat),
            longitude: Some(position.lng),
        }
    }

    pub fn position(&self) -> Option<LatLng> {
        Some(LatLng::new(self.latitude?, self.longitude?))
    }
}

/// The viewport extent as last reported by the widget
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportBounds {
    #[serde(rename = "southwest")]
    pub south_west: Corner,
    #[serde(rename = "northeast")]
    pub north_east: Corner,
}

impl ViewportBounds {
    /// Bounds representing "no active viewport filter"
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn from_corners(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west: Corner::new(south_west),
            north_east: Corner::new(north_east),
        }
    }

    /// Returns the corners only when all four fields are populated
    pub fn corners(&self) -> Option<(LatLng, LatLng)> {
        Some((self.south_west.position()?, self.north_east.position()?))
    }

    pub fn is_set(&self) -> bool {
        self.corners().is_some()
    }
}

/// Selects which marker set the widget shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerMode {
    Results,
    #[default]
    Facets,
}

impl MarkerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerMode::Results => "results",
            MarkerMode::Facets => "facets",
        }
    }
}

impl fmt::Display for MarkerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkerMode {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "results" => Ok(MarkerMode::Results),
            "facets" => Ok(MarkerMode::Facets),
            other => Err(MapError::UnknownMarkerMode(other.to_string())),
        }
    }
}

/// User-facing manager configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerSettings {
    pub center: LatLng,
    pub zoom: u8,
    pub options: MapOptions,
    pub colors: Vec<String>,
    pub marker_mode: MarkerMode,
    /// Cool-down window of the bounds bridge, in milliseconds
    pub bounds_cooldown_ms: u64,
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self {
            center: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            zoom: DEFAULT_ZOOM,
            options: MapOptions::default(),
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            marker_mode: MarkerMode::default(),
            bounds_cooldown_ms: DEFAULT_BOUNDS_COOLDOWN.as_millis() as u64,
        }
    }
}

impl ManagerSettings {
    /// Parses and validates settings from a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading map settings from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "center ({}, {}) is out of range",
                self.center.lat, self.center.lng
            )));
        }
        if self.colors.is_empty() {
            return Err(MapError::Config("marker palette must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn bounds_cooldown(&self) -> Duration {
        Duration::from_millis(self.bounds_cooldown_ms)
    }
}

/// Baseline values `restore_defaults` and `reset_map` copy from
#[derive(Debug, Clone, PartialEq)]
pub struct MapDefaults {
    pub center: LatLng,
    pub zoom: u8,
    pub options: MapOptions,
    /// Only populated once the widget reports drawing support
    pub drawing_options: Option<DrawingOptions>,
    pub marker_mode: MarkerMode,
    pub colors: Vec<String>,
}

impl From<&ManagerSettings> for MapDefaults {
    fn from(settings: &ManagerSettings) -> Self {
        Self {
            center: settings.center,
            zoom: settings.zoom,
            options: settings.options.clone(),
            drawing_options: None,
            marker_mode: settings.marker_mode,
            colors: settings.colors.clone(),
        }
    }
}

/// Live map state bound to the widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapConfig {
    pub center: LatLng,
    pub zoom: u8,
    pub bounds: ViewportBounds,
    pub options: MapOptions,
    pub drawing_options: Option<DrawingOptions>,
    pub marker_mode: MarkerMode,
    pub colors: Vec<String>,
}

impl MapConfig {
    /// Builds a fresh config; every field is cloned so the defaults stay untouched
    pub fn from_defaults(defaults: &MapDefaults) -> Self {
        Self {
            center: defaults.center,
            zoom: defaults.zoom,
            bounds: ViewportBounds::unset(),
            options: defaults.options.clone(),
            drawing_options: defaults.drawing_options.clone(),
            marker_mode: defaults.marker_mode,
            colors: defaults.colors.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ManagerSettings::default();
        assert_eq!(settings.zoom, 2);
        assert_eq!(settings.colors, vec!["green", "blue", "red", "grey", "purple"]);
        assert_eq!(settings.marker_mode, MarkerMode::Facets);
        assert_eq!(settings.bounds_cooldown(), Duration::from_secs(2));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_from_partial_json() {
        let settings = ManagerSettings::from_json(
            r#"{"center": {"latitude": 48.85, "longitude": 2.35}, "bounds_cooldown_ms": 500}"#,
        )
        .unwrap();
        assert_eq!(settings.center, LatLng::new(48.85, 2.35));
        assert_eq!(settings.bounds_cooldown(), Duration::from_millis(500));
        assert_eq!(settings.zoom, 2);
        assert!(settings.options.zoom_control);
    }

    #[test]
    fn test_settings_rejects_invalid_values() {
        let err = ManagerSettings::from_json(r#"{"colors": []}"#).unwrap_err();
        assert!(matches!(err, MapError::Config(_)));

        let err = ManagerSettings::from_json(r#"{"center": {"latitude": 120.0, "longitude": 0.0}}"#)
            .unwrap_err();
        assert!(matches!(err, MapError::InvalidCoordinates(_)));

        let err = ManagerSettings::from_json("not json").unwrap_err();
        assert!(matches!(err, MapError::Serialization(_)));
    }

    #[test]
    fn test_marker_mode_parsing() {
        assert_eq!("results".parse::<MarkerMode>().unwrap(), MarkerMode::Results);
        assert_eq!("facets".parse::<MarkerMode>().unwrap(), MarkerMode::Facets);
        assert!(matches!(
            "heatmap".parse::<MarkerMode>(),
            Err(MapError::UnknownMarkerMode(mode)) if mode == "heatmap"
        ));
        assert_eq!(MarkerMode::Results.to_string(), "results");
    }

    #[test]
    fn test_viewport_bounds_population() {
        assert!(!ViewportBounds::unset().is_set());

        let half = ViewportBounds {
            south_west: Corner::new(LatLng::new(1.0, 2.0)),
            north_east: Corner::default(),
        };
        assert!(!half.is_set());

        let full = ViewportBounds::from_corners(LatLng::new(1.0, 2.0), LatLng::new(3.0, 4.0));
        assert_eq!(
            full.corners(),
            Some((LatLng::new(1.0, 2.0), LatLng::new(3.0, 4.0)))
        );
    }

    #[test]
    fn test_config_is_a_deep_copy_of_defaults() {
        let defaults = MapDefaults::from(&ManagerSettings::default());
        let mut config = MapConfig::from_defaults(&defaults);
        config.colors.push("orange".to_string());
        config.options.scrollwheel = false;

        assert_eq!(defaults.colors.len(), 5);
        assert!(defaults.options.scrollwheel);
    }

    #[test]
    fn test_viewport_bounds_serialization() {
        let value = serde_json::to_value(ViewportBounds::unset()).unwrap();
        assert!(value["southwest"]["latitude"].is_null());
        assert!(value["northeast"]["longitude"].is_null());
    }
}
