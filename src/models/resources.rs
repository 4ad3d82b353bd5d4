//! Search results and curated learning resources.

use serde::{Deserialize, Serialize};

/// Number of resources a curated set must contain.
pub const CURATED_RESOURCE_COUNT: usize = 5;

/// One hit returned by the search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub snippet: String,
}

/// Search provider output, fed to curation as context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Provider-written summary, empty when none was produced
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

impl SearchResult {
    /// The degraded result returned when the search provider fails.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.answer.is_empty() && self.results.is_empty()
    }
}

/// A single curated learning resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratedResource {
    pub title: String,
    pub url: String,
    pub description: String,
    pub benefits: Vec<String>,
    pub format: String,
    pub difficulty_level: String,
}

/// Exactly [`CURATED_RESOURCE_COUNT`] curated resources.
///
/// Only constructed through validation, so a value of this type always
/// holds the required count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratedResourceSet {
    pub resources: Vec<CuratedResource>,
}
