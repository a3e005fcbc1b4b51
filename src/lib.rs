//! # searchmap
//!
//! Binds search results and facet aggregates to an interactive map widget.
//!
//! The [`MapManager`] owns the map state the widget renders (center, zoom,
//! viewport bounds, marker sets, drawing options) and turns viewport changes
//! and drawn rectangles into a [`GeoFilter`] for search, with a cool-down
//! that keeps programmatic recenters from feeding back into search.

pub mod composition;
pub mod core;
pub mod data;
pub mod error;
pub mod input;
pub mod layers;
pub mod plugins;
pub mod prelude;
pub mod runtime;
pub use crate::core::constants;
pub use error::{Error, MapError, Result};

// Re-export public API
pub use crate::core::{
    bounds::GeoFilter,
    config::{ManagerSettings, MapConfig, MarkerMode},
    geo::{LatLng, LatLngBounds},
    manager::MapManager,
};

pub use data::search::{FacetBox, FacetGroup, Facets, SearchResult};

pub use input::{MapEvent, WidgetEvent};

pub use layers::marker::Marker;

pub use plugins::draw::{OverlayHandle, WidgetCapabilities};

/// Initializes `env_logger` from `RUST_LOG`; later calls are ignored
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::try_init();
}
