//! Response bodies returned by the plant API

use serde::{Deserialize, Serialize};

/// Body of a successful token request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// One species in a search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesSummary {
    pub id: u64,
}

/// Paginated species search result
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpeciesSearch {
    pub count: u64,
    #[serde(default)]
    pub results: Vec<SpeciesSummary>,
}

impl SpeciesSearch {
    /// The species id when the search matched exactly one species
    pub fn unique_id(&self) -> Option<u64> {
        match (self.count, self.results.as_slice()) {
            (1, [species]) => Some(species.id),
            _ => None,
        }
    }
}
