//! Converts search results and facet aggregates into markers
//!
//! Malformed input is skipped rather than reported: a result without a
//! location simply has no marker.

use crate::{
    core::constants::{DEFAULT_COLORS, ICON_DIR},
    data::search::{FacetBox, Facets, SearchResult},
    layers::marker::{LabelOptions, Marker, MarkerPayload},
};

/// Palette lookup that wraps around; an empty palette falls back to the first default color
pub fn palette_color(palette: &[String], index: usize) -> &str {
    if palette.is_empty() {
        return DEFAULT_COLORS[0];
    }
    &palette[index % palette.len()]
}

pub fn result_icon(color: &str) -> String {
    format!("{}/{}-dot-marker.png", ICON_DIR, color)
}

pub fn cluster_icon(color: &str) -> String {
    format!("{}/{}-cluster-marker.png", ICON_DIR, color)
}

/// Id built from the box geometry and count
///
/// Two boxes with identical edges and count share an id; the widget then
/// shows one of them, which is harmless for identical clusters.
pub fn facet_marker_id(facet_box: &FacetBox) -> String {
    format!(
        "box-{}{}{}{}{}",
        facet_box.n, facet_box.s, facet_box.w, facet_box.e, facet_box.count
    )
}

/// One marker per located result, all in the same color
pub fn project_results(results: &[SearchResult], color: &str) -> Vec<Marker> {
    let icon = result_icon(color);
    results
        .iter()
        .filter_map(|result| {
            let location = result.location()?;
            let content = result.primary_content()?.clone();
            let mut marker = Marker::new(
                format!("result-{}", result.uri),
                location,
                icon.clone(),
                MarkerPayload::Result(content),
            );
            if let Some(name) = result.name() {
                marker = marker.with_title(name.to_string());
            }
            Some(marker)
        })
        .collect()
}

/// One cluster marker per facet box, colored per facet group
///
/// Groups take palette colors in order; groups without boxes do not use up a color.
pub fn project_facets(facets: &Facets, palette: &[String]) -> Vec<Marker> {
    let mut markers = Vec::new();
    let mut color_index = 0;

    for (name, group) in facets.iter() {
        let boxes = group.boxes();
        if boxes.is_empty() {
            log::debug!("facet '{}' has no boxes, skipping", name);
            continue;
        }

        let icon = cluster_icon(palette_color(palette, color_index));
        markers.extend(boxes.iter().map(|facet_box| {
            Marker::new(
                facet_marker_id(facet_box),
                facet_box.center(),
                icon.clone(),
                MarkerPayload::Facet(*facet_box),
            )
            .with_label(LabelOptions::count(facet_box.count))
        }));
        color_index += 1;
    }

    markers
}
