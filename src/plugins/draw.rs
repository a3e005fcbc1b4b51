use crate::core::geo::LatLngBounds;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// An overlay drawn on the map and owned by the widget
pub trait OverlayHandle: Send {
    /// Geometry of the overlay; rectangles always report one
    fn bounds(&self) -> Option<LatLngBounds>;

    /// Remove the overlay from the rendered map
    fn detach(&mut self);
}

/// What the host widget reports once its API has loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidgetCapabilities {
    pub drawing: bool,
}

/// A rectangle overlay whose attachment state is shared between clones
#[derive(Debug, Clone)]
pub struct RectangleOverlay {
    bounds: LatLngBounds,
    attached: Arc<AtomicBool>,
}

impl RectangleOverlay {
    pub fn new(bounds: LatLngBounds) -> Self {
        Self {
            bounds,
            attached: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }
}

impl OverlayHandle for RectangleOverlay {
    fn bounds(&self) -> Option<LatLngBounds> {
        Some(self.bounds)
    }

    fn detach(&mut self) {
        self.attached.store(false, Ordering::SeqCst);
    }
}

/// Tracks drawn overlays and the overlay-complete listener
#[derive(Default)]
pub struct DrawingOverlayHandler {
    drawings: Vec<Box<dyn OverlayHandle>>,
    drawing_supported: bool,
    listening: bool,
}

impl DrawingOverlayHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_drawing_supported(&mut self, supported: bool) {
        self.drawing_supported = supported;
    }

    /// Registers the overlay-complete listener once; false if unsupported or already registered
    pub fn attach_listener(&mut self) -> bool {
        if !self.drawing_supported || self.listening {
            return false;
        }
        self.listening = true;
        true
    }

    /// Forgets the listener, as when the widget rebuilds its drawing manager
    pub fn reset_listener(&mut self) {
        self.listening = false;
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn push(&mut self, overlay: Box<dyn OverlayHandle>) {
        self.drawings.push(overlay);
    }

    /// Forgets all drawings without touching the rendered map
    pub fn forget(&mut self) {
        self.drawings.clear();
    }

    /// Detaches every overlay from the map and empties the list; returns how many were removed
    pub fn clear(&mut self) -> usize {
        let count = self.drawings.len();
        for mut overlay in self.drawings.drain(..) {
            overlay.detach();
        }
        count
    }

    pub fn len(&self) -> usize {
        self.drawings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawings.is_empty()
    }
}
