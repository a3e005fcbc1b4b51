use crate::{
    core::{
        bounds::GeoFilter,
        config::{MarkerMode, ViewportBounds},
        geo::{LatLng, LatLngBounds},
    },
    plugins::draw::OverlayHandle,
};
use std::fmt;

/// Events reported by the map widget to the manager
pub enum WidgetEvent {
    /// Right click (or an equivalent dismiss gesture) on the map
    RightClick,
    /// The visible viewport changed after a pan or zoom
    ViewportChanged(LatLngBounds),
    /// The user finished drawing an overlay
    OverlayComplete(Box<dyn OverlayHandle>),
}

impl WidgetEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WidgetEvent::RightClick => "rightclick",
            WidgetEvent::ViewportChanged(_) => "bounds_changed",
            WidgetEvent::OverlayComplete(_) => "overlaycomplete",
        }
    }
}

impl fmt::Debug for WidgetEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetEvent::RightClick => f.write_str("RightClick"),
            WidgetEvent::ViewportChanged(bounds) => {
                f.debug_tuple("ViewportChanged").field(bounds).finish()
            }
            WidgetEvent::OverlayComplete(overlay) => f
                .debug_tuple("OverlayComplete")
                .field(&overlay.bounds())
                .finish(),
        }
    }
}

/// State change notifications emitted by the manager
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// The viewport bounds held in the map config changed
    BoundsChanged { bounds: ViewportBounds },
    /// The geo filter consumed by search changed
    GeoFilterChanged { filter: Option<GeoFilter> },
    /// A marker set was replaced
    MarkersChanged { mode: MarkerMode, count: usize },
    /// Center and zoom were restored to their defaults
    ViewReset { center: LatLng, zoom: u8 },
    /// All drawn overlays were removed
    DrawingsCleared { count: usize },
}

impl MapEvent {
    /// Name listeners subscribe under
    pub fn event_type(&self) -> &'static str {
        match self {
            MapEvent::BoundsChanged { .. } => "boundschanged",
            MapEvent::GeoFilterChanged { .. } => "geofilterchanged",
            MapEvent::MarkersChanged { .. } => "markerschanged",
            MapEvent::ViewReset { .. } => "viewreset",
            MapEvent::DrawingsCleared { .. } => "drawingscleared",
        }
    }
}
