pub mod search;

pub use search::{parse_results, FacetBox, FacetGroup, Facets, SearchResult};
