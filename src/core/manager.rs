//! The map manager: the single owner of the map state bound to the widget
//!
//! All mutation happens on the thread that owns the manager. Work that must
//! not run inside the current handler (bounds writes reported by the widget,
//! drawing cleanup, cool-down releases) is queued on the manager's scheduler
//! and runs when the host calls [`MapManager::advance`].

use crate::{
    core::{
        bounds::{BoundsBridge, BoundsReaction, GeoFilter},
        config::{
            DrawingOptions, MapConfig, MapDefaults, ManagerSettings, MarkerMode, ViewportBounds,
        },
        geo::{LatLng, ViewportSource},
    },
    data::search::{Facets, SearchResult},
    input::{EventManager, ListenerId, MapEvent, WidgetEvent},
    layers::{
        marker::{Marker, MarkerSets},
        projector::{palette_color, project_facets, project_results},
    },
    plugins::draw::{DrawingOverlayHandler, WidgetCapabilities},
    runtime::Scheduler,
};
use std::time::Duration;

pub struct MapManager {
    defaults: MapDefaults,
    config: MapConfig,
    markers: MarkerSets,
    bridge: BoundsBridge,
    drawing: DrawingOverlayHandler,
    events: EventManager,
    scheduler: Scheduler<MapManager>,
}

impl MapManager {
    /// Creates a manager with defaults restored
    ///
    /// The bounds bridge starts cooling down, so the widget's first viewport
    /// report after loading does not become a geo filter.
    pub fn new(settings: ManagerSettings) -> Self {
        let defaults = MapDefaults::from(&settings);
        let mut manager = Self {
            config: MapConfig::from_defaults(&defaults),
            defaults,
            markers: MarkerSets::default(),
            bridge: BoundsBridge::new(settings.bounds_cooldown()),
            drawing: DrawingOverlayHandler::new(),
            events: EventManager::new(),
            scheduler: Scheduler::new(),
        };
        manager.start_cooldown();
        manager
    }

    /// Sets the center and zoom that later resets return to
    pub fn initialize(&mut self, center: LatLng, zoom: u8) {
        log::debug!("map defaults set to ({}, {}) @ {}", center.lat, center.lng, zoom);
        self.defaults.center = center;
        self.defaults.zoom = zoom;
    }

    /// Resets all mutable map state to copies of the defaults
    ///
    /// Marker sets are kept. Drawings are forgotten without being detached
    /// and the drawing-manager listener must be attached again.
    pub fn restore_defaults(&mut self) {
        let previous_bounds = self.config.bounds;
        self.config = MapConfig::from_defaults(&self.defaults);
        self.drawing.forget();
        self.drawing.reset_listener();

        if previous_bounds != self.config.bounds {
            self.bounds_changed();
        }
        self.flush_events();
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn defaults(&self) -> &MapDefaults {
        &self.defaults
    }

    /// Palette color for `index`, wrapping around the palette
    pub fn get_color(&self, index: usize) -> &str {
        palette_color(&self.config.colors, index)
    }

    /// The marker set selected by the current marker mode
    pub fn get_markers(&self) -> &[Marker] {
        self.markers.get(self.config.marker_mode)
    }

    pub fn markers(&self, mode: MarkerMode) -> &[Marker] {
        self.markers.get(mode)
    }

    /// Replaces a marker set outright
    pub fn set_markers(&mut self, mode: MarkerMode, markers: Vec<Marker>) {
        let count = markers.len();
        self.markers.replace(mode, markers);
        self.events.emit(MapEvent::MarkersChanged { mode, count });
        self.flush_events();
    }

    pub fn set_marker_mode(&mut self, mode: MarkerMode) {
        self.config.marker_mode = mode;
    }

    /// Replaces the result markers with one marker per located result
    pub fn set_result_markers(&mut self, results: &[SearchResult], color_index: Option<usize>) {
        let markers = project_results(results, self.get_color(color_index.unwrap_or(0)));
        log::debug!(
            "{} of {} results have a location",
            markers.len(),
            results.len()
        );
        self.set_markers(MarkerMode::Results, markers);
    }

    /// Replaces the facet markers with one cluster marker per facet box
    pub fn set_facet_markers(&mut self, facets: &Facets) {
        let markers = project_facets(facets, &self.config.colors);
        self.set_markers(MarkerMode::Facets, markers);
    }

    /// Accepts a viewport reported by the widget
    ///
    /// The write lands on the next tick; the geo filter follows it unless
    /// the bounds bridge is cooling down.
    pub fn set_bounds<V: ViewportSource + ?Sized>(&mut self, viewport: &V) {
        let bounds = ViewportBounds::from_corners(viewport.south_west(), viewport.north_east());
        self.scheduler
            .next_tick("write_bounds", move |manager| manager.write_bounds(bounds));
    }

    /// The geo filter search should apply, if any
    pub fn watch_bounds(&self) -> Option<GeoFilter> {
        self.bridge.filter()
    }

    pub fn is_cooling_down(&self) -> bool {
        self.bridge.is_cooling_down()
    }

    /// Recenters on the defaults and drops the geo filter
    ///
    /// Cools the bounds bridge down so the viewport change caused by the
    /// recenter is not taken for a user pan.
    pub fn reset_map(&mut self) {
        self.start_cooldown();
        self.config.center = self.defaults.center;
        self.config.zoom = self.defaults.zoom;

        if self.bridge.filter().is_some() {
            self.bridge.clear_filter();
            self.events.emit(MapEvent::GeoFilterChanged { filter: None });
        }
        self.events.emit(MapEvent::ViewReset {
            center: self.config.center,
            zoom: self.config.zoom,
        });
        self.flush_events();
    }

    /// Called once the widget API has loaded
    pub fn widget_ready(&mut self, capabilities: WidgetCapabilities) {
        self.drawing.set_drawing_supported(capabilities.drawing);
        if !capabilities.drawing {
            log::info!("map widget has no drawing support; drawing stays disabled");
            return;
        }

        let options = DrawingOptions::rectangle();
        if self.config.drawing_options.is_none() {
            self.config.drawing_options = Some(options.clone());
        }
        self.defaults.drawing_options = Some(options);
    }

    /// Registers the overlay-complete listener; false if unsupported or already registered
    pub fn attach_drawing_manager(&mut self) -> bool {
        let attached = self.drawing.attach_listener();
        if attached {
            log::debug!("listening for completed overlays");
        }
        attached
    }

    pub fn drawing_count(&self) -> usize {
        self.drawing.len()
    }

    /// Dispatches an event reported by the widget
    pub fn handle_widget_event(&mut self, event: WidgetEvent) {
        log::trace!("widget event '{}'", event.name());
        match event {
            WidgetEvent::RightClick => self
                .scheduler
                .next_tick("clear_drawings", |manager| manager.clear_drawings()),
            WidgetEvent::ViewportChanged(bounds) => self.set_bounds(&bounds),
            WidgetEvent::OverlayComplete(overlay) => {
                if !self.drawing.is_listening() {
                    log::debug!("overlay completed without a drawing listener, ignoring");
                    return;
                }
                let bounds = overlay.bounds();
                self.drawing.push(overlay);
                match bounds {
                    Some(bounds) => self.set_bounds(&bounds),
                    None => log::warn!("completed overlay has no bounds"),
                }
            }
        }
    }

    /// Subscribe to state changes by event type name
    pub fn on<F>(&mut self, event_type: &'static str, callback: F) -> ListenerId
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.events.on(event_type, callback)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    /// Runs every task due within `elapsed` of virtual time, in deadline order
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.scheduler.now() + elapsed;
        while let Some(task) = self.scheduler.pop_due(until) {
            task(self);
            self.flush_events();
        }
        self.scheduler.settle(until);
    }

    /// Runs next-tick work without moving the clock
    pub fn run_pending(&mut self) {
        self.advance(Duration::ZERO);
    }

    pub fn time_until_next_task(&self) -> Option<Duration> {
        self.scheduler.time_until_next()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    fn write_bounds(&mut self, bounds: ViewportBounds) {
        if self.config.bounds == bounds {
            return;
        }
        self.config.bounds = bounds;
        self.bounds_changed();
    }

    fn bounds_changed(&mut self) {
        self.events.emit(MapEvent::BoundsChanged {
            bounds: self.config.bounds,
        });

        let previous = self.bridge.filter();
        match self.bridge.observe(&self.config.bounds) {
            BoundsReaction::Ignored => {
                log::debug!("bounds changed while cooling down, geo filter unchanged");
            }
            BoundsReaction::FilterSet { filter, generation } => {
                log::debug!("geo filter set to {:?}", filter);
                self.schedule_release(generation);
                self.events.emit(MapEvent::GeoFilterChanged {
                    filter: Some(filter),
                });
            }
            BoundsReaction::FilterCleared => {
                if previous.is_some() {
                    self.events.emit(MapEvent::GeoFilterChanged { filter: None });
                }
            }
        }
    }

    fn start_cooldown(&mut self) {
        let generation = self.bridge.arm();
        self.schedule_release(generation);
    }

    fn schedule_release(&mut self, generation: u64) {
        let cooldown = self.bridge.cooldown();
        self.scheduler
            .schedule(cooldown, "release_bounds_cooldown", move |manager| {
                if manager.bridge.release(generation) {
                    log::debug!("bounds bridge accepting viewport changes again");
                }
            });
    }

    fn clear_drawings(&mut self) {
        let count = self.drawing.clear();
        log::debug!("cleared {} drawings", count);
        self.events.emit(MapEvent::DrawingsCleared { count });
        self.reset_map();
    }

    fn flush_events(&mut self) {
        self.events.process_events();
    }
}

impl Default for MapManager {
    fn default() -> Self {
        Self::new(ManagerSettings::default())
    }
}
