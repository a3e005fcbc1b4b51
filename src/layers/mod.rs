pub mod marker;
pub mod projector;

pub use marker::{LabelAnchor, LabelOptions, Marker, MarkerPayload, MarkerSets};
