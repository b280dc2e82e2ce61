// src/github/model.rs
// =============================================================================
// The records GitHub sends back for a user's stars.
//
// With the `application/vnd.github.star+json` media type every list entry is
//
//   { "starred_at": "2024-01-01T00:00:00Z", "repo": { ...repository... } }
//
// We type the handful of repository fields we read, and keep every other field
// in `extra` so the JSON output can print the whole record exactly as received.
//
// Rust concepts:
// - #[serde(default)]: Missing fields become "" / 0 / None instead of errors
// - #[serde(flatten)]: Collects all remaining keys into a map
// =============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// One entry of the starred list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StarredRepository {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starred_at: Option<String>,
    pub repo: Repository,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Repository {
    /// "owner/name"
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// The repository's page on github.com (not the API URL)
    #[serde(default)]
    pub html_url: String,
    /// Primary language as detected by GitHub; null for e.g. docs-only repos
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Repository {
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or("")
    }
}
