//! Defaults the map manager starts from: view, palette, icon paths and the
//! bounds cool-down window.

use std::time::Duration;

/// Default map center (latitude, longitude) until `initialize` overrides it.
pub const DEFAULT_CENTER: (f64, f64) = (52.0325133, 5.2289087);

/// Default zoom level, showing most of a continent.
pub const DEFAULT_ZOOM: u8 = 2;

/// Marker palette; facet groups pick colors in this order.
pub const DEFAULT_COLORS: [&str; 5] = ["green", "blue", "red", "grey", "purple"];

/// How long viewport-driven bounds updates are ignored after a programmatic change.
pub const DEFAULT_BOUNDS_COOLDOWN: Duration = Duration::from_millis(2000);

/// Horizontal label anchor for a single-digit cluster count, in pixels.
pub const LABEL_ANCHOR_BASE: u32 = 10;

/// Extra horizontal anchor shift per additional count digit.
pub const LABEL_ANCHOR_PER_DIGIT: u32 = 3;

/// CSS class for cluster count labels.
pub const CLUSTER_LABEL_CLASS: &str = "cluster-marker-label";

/// Directory the widget loads marker icons from.
pub const ICON_DIR: &str = "images";
