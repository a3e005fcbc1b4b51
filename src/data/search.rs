//! Shapes of the search results and facet aggregates fed into the map

use crate::core::geo::LatLng;
use serde::{
    de::{DeserializeOwned, MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::fmt;

/// A single search result as returned by the search source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub uri: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extracted: Extracted,
}

/// Content extracted from the matching document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Extracted {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<serde_json::Value>,
}

/// Treats an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parses each element on its own, skipping the ones that do not fit `T`
fn well_formed<T: DeserializeOwned>(values: Vec<serde_json::Value>, what: &str) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|value| match T::deserialize(value) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                log::debug!("skipping malformed {}: {}", what, err);
                None
            }
        })
        .collect()
}

/// Search results from a raw response array; malformed entries are dropped
pub fn parse_results(values: Vec<serde_json::Value>) -> Vec<SearchResult> {
    well_formed(values, "search result")
}

impl SearchResult {
    pub fn new(uri: impl Into<String>, content: Vec<serde_json::Value>) -> Self {
        Self {
            uri: uri.into(),
            extracted: Extracted { content },
        }
    }

    /// The first extracted content entry, which carries the displayable fields
    pub fn primary_content(&self) -> Option<&serde_json::Value> {
        self.extracted.content.first()
    }

    /// Location of the primary content entry, if it has a well-formed one
    pub fn location(&self) -> Option<LatLng> {
        let location = self.primary_content()?.get("location")?;
        LatLng::deserialize(location).ok()
    }

    pub fn name(&self) -> Option<&str> {
        self.primary_content()?.get("name")?.as_str()
    }
}

/// A rectangular geographic bucket with an aggregate count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacetBox {
    pub n: f64,
    pub s: f64,
    pub w: f64,
    pub e: f64,
    pub count: u64,
}

impl FacetBox {
    /// Midpoint of the box edges
    pub fn center(&self) -> LatLng {
        LatLng::new((self.n + self.s) / 2.0, (self.w + self.e) / 2.0)
    }
}

/// One facet's geo aggregate
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FacetGroup {
    #[serde(default, deserialize_with = "well_formed_boxes")]
    pub boxes: Option<Vec<FacetBox>>,
}

fn well_formed_boxes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<FacetBox>>, D::Error> {
    let boxes = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    Ok(boxes.map(|boxes| well_formed(boxes, "facet box")))
}

impl FacetGroup {
    pub fn new(boxes: Vec<FacetBox>) -> Self {
        Self { boxes: Some(boxes) }
    }

    pub fn boxes(&self) -> &[FacetBox] {
        self.boxes.as_deref().unwrap_or_default()
    }
}

/// Facet groups keyed by facet name, in the order the source listed them
///
/// Palette colors are handed out by position, so the JSON object order is
/// kept instead of collecting into a hash map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Facets(Vec<(String, FacetGroup)>);

impl Facets {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FacetGroup)> {
        self.0.iter().map(|(name, group)| (name.as_str(), group))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, FacetGroup)> for Facets {
    fn from_iter<I: IntoIterator<Item = (S, FacetGroup)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(name, group)| (name.into(), group)).collect())
    }
}

impl Serialize for Facets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, group) in &self.0 {
            map.serialize_entry(name, group)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Facets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FacetsVisitor;

        impl<'de> Visitor<'de> for FacetsVisitor {
            type Value = Facets;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of facet names to facet groups")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Facets, A::Error> {
                let mut groups = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) =
                    access.next_entry::<String, serde_json::Value>()?
                {
                    match FacetGroup::deserialize(value) {
                        Ok(group) => groups.push((name, group)),
                        Err(err) => log::debug!("skipping malformed facet '{}': {}", name, err),
                    }
                }
                Ok(Facets(groups))
            }
        }

        deserializer.deserialize_map(FacetsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_location_and_name() {
        let result: SearchResult = serde_json::from_value(json!({
            "uri": "/doc/1.json",
            "extracted": {"content": [
                {"location": {"latitude": 10.0, "longitude": 20.0}, "name": "A"}
            ]}
        }))
        .unwrap();

        assert_eq!(result.location(), Some(LatLng::new(10.0, 20.0)));
        assert_eq!(result.name(), Some("A"));
    }

    #[test]
    fn test_result_without_usable_location() {
        let missing = SearchResult::new("a", vec![json!({"name": "A"})]);
        assert_eq!(missing.location(), None);

        let malformed = SearchResult::new("b", vec![json!({"location": "Utrecht"})]);
        assert_eq!(malformed.location(), None);

        let empty: SearchResult = serde_json::from_value(json!({"uri": "c"})).unwrap();
        assert_eq!(empty.primary_content(), None);
        assert_eq!(empty.location(), None);
    }

    #[test]
    fn test_facets_keep_source_order() {
        let facets: Facets = serde_json::from_str(
            r#"{
                "zeta": {"boxes": [{"n": 2, "s": 0, "w": 0, "e": 2, "count": 4}]},
                "alpha": {"boxes": []},
                "mid": {}
            }"#,
        )
        .unwrap();

        let names: Vec<_> = facets.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(facets.iter().next().unwrap().1.boxes().len(), 1);
        assert!(facets.iter().nth(2).unwrap().1.boxes().is_empty());

        let value = serde_json::to_value(&facets).unwrap();
        assert_eq!(value["zeta"]["boxes"][0]["count"], 4);
    }

    #[test]
    fn test_malformed_results_are_dropped_individually() {
        let results = parse_results(vec![
            json!({"uri": "ok", "extracted": {"content": [
                {"location": {"latitude": 1.0, "longitude": 2.0}}
            ]}}),
            json!({"extracted": {"content": [
                {"location": {"latitude": 3.0, "longitude": 4.0}}
            ]}}),
            json!({"uri": "null-content", "extracted": {"content": null}}),
            json!({"uri": "null-extracted", "extracted": null}),
            json!({"uri": 7}),
            json!("not a result"),
        ]);

        let uris: Vec<_> = results.iter().map(|r| r.uri.as_str()).collect();
        assert_eq!(uris, vec!["ok", "", "null-content", "null-extracted"]);
        assert_eq!(results[1].location(), Some(LatLng::new(3.0, 4.0)));
        assert_eq!(results[2].primary_content(), None);
    }

    #[test]
    fn test_missing_uri_does_not_fail_response() {
        let results: Vec<SearchResult> = serde_json::from_value(json!([
            {"uri": "ok", "extracted": {"content": []}},
            {"extracted": {"content": null}}
        ]))
        .unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[1].extracted.content.is_empty());
    }

    #[test]
    fn test_malformed_facet_boxes_are_skipped() {
        let facets: Facets = serde_json::from_str(
            r#"{
                "Location": {"boxes": [
                    {"n": 2, "s": 0, "w": 0, "e": 2, "count": 4.0},
                    {"n": 4, "s": 2, "w": 0, "e": 2, "count": 9},
                    {"n": "north", "s": 2, "w": 0, "e": 2, "count": 1}
                ]},
                "Broken": {"boxes": "none"},
                "Event": {"boxes": null}
            }"#,
        )
        .unwrap();

        let names: Vec<_> = facets.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Location", "Event"]);
        let boxes = facets.iter().next().unwrap().1.boxes();
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].count, 9);
        assert!(facets.iter().nth(1).unwrap().1.boxes().is_empty());
    }

    #[test]
    fn test_box_center_is_edge_midpoint() {
        let facet_box = FacetBox {
            n: 53.5,
            s: 51.25,
            w: 3.75,
            e: 7.0,
            count: 12,
        };
        assert_eq!(facet_box.center(), LatLng::new((53.5 + 51.25) / 2.0, (3.75 + 7.0) / 2.0));
    }
}
