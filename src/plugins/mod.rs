pub mod draw;

pub use draw::{DrawingOverlayHandler, OverlayHandle, RectangleOverlay, WidgetCapabilities};
