use crate::{
    core::{
        config::MarkerMode,
        constants::{CLUSTER_LABEL_CLASS, LABEL_ANCHOR_BASE, LABEL_ANCHOR_PER_DIGIT},
        geo::LatLng,
    },
    data::search::FacetBox,
};
use serde::Serialize;
use std::fmt;

/// Offset of a marker label relative to the icon, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelAnchor {
    pub x: u32,
    pub y: u32,
}

impl LabelAnchor {
    /// Anchor that keeps a count label centered on the cluster icon
    pub fn for_count(count: u64) -> Self {
        let digits = count.to_string().len() as u32;
        Self {
            x: LABEL_ANCHOR_BASE + (digits - 1) * LABEL_ANCHOR_PER_DIGIT,
            y: 0,
        }
    }
}

impl fmt::Display for LabelAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// Label styling for cluster markers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelOptions {
    pub content: String,
    pub anchor: LabelAnchor,
    pub class: String,
}

impl LabelOptions {
    pub fn count(count: u64) -> Self {
        Self {
            content: count.to_string(),
            anchor: LabelAnchor::for_count(count),
            class: CLUSTER_LABEL_CLASS.to_string(),
        }
    }
}

/// What a marker stands for
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum MarkerPayload {
    /// The raw content entry of a located search result
    Result(serde_json::Value),
    /// An aggregated geo bucket
    Facet(FacetBox),
}

/// A marker as bound to the map widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: String,
    pub location: LatLng,
    pub title: Option<String>,
    pub icon: String,
    pub options: Option<LabelOptions>,
    pub payload: MarkerPayload,
}

impl Marker {
    pub fn new(id: String, location: LatLng, icon: String, payload: MarkerPayload) -> Self {
        Self {
            id,
            location,
            title: None,
            icon,
            options: None,
            payload,
        }
    }

    pub fn with_title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_label(mut self, label: LabelOptions) -> Self {
        self.options = Some(label);
        self
    }

    pub fn is_cluster(&self) -> bool {
        matches!(self.payload, MarkerPayload::Facet(_))
    }
}

/// The named marker sets the manager keeps; each is replaced wholesale
#[derive(Debug, Clone, Default)]
pub struct MarkerSets {
    results: Vec<Marker>,
    facets: Vec<Marker>,
}

impl MarkerSets {
    pub fn get(&self, mode: MarkerMode) -> &[Marker] {
        match mode {
            MarkerMode::Results => &self.results,
            MarkerMode::Facets => &self.facets,
        }
    }

    pub fn replace(&mut self, mode: MarkerMode, markers: Vec<Marker>) {
        match mode {
            MarkerMode::Results => self.results = markers,
            MarkerMode::Facets => self.facets = markers,
        }
    }
}
