//! Prelude module for common searchmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use searchmap::prelude::*;`

pub use crate::core::{
    bounds::GeoFilter,
    config::{
        ControlPosition, DrawingOptions, ManagerSettings, MapConfig, MapOptions, MarkerMode,
        OverlayType, ViewportBounds,
    },
    geo::{LatLng, LatLngBounds, ViewportSource},
    manager::MapManager,
};

pub use crate::data::search::{parse_results, FacetBox, FacetGroup, Facets, SearchResult};

pub use crate::layers::marker::{LabelOptions, Marker, MarkerPayload};

pub use crate::plugins::draw::{OverlayHandle, RectangleOverlay, WidgetCapabilities};

pub use crate::input::{EventManager, ListenerId, MapEvent, WidgetEvent};

pub use crate::composition::{AppModule, ModuleRegistry};

pub use crate::{Error as MapError, Result};

pub use std::time::Duration;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
