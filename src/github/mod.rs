// src/github/mod.rs
// =============================================================================
// This module talks to GitHub.
//
// Currently implements:
// - The starred-repository records (model.rs)
// - Paging through a user's stars (fetch.rs)
// - The HTTP client for the REST API (client.rs)
//
// Anonymous access only; GitHub allows 60 unauthenticated requests per hour.
// =============================================================================

mod client;
mod fetch;
mod model;

pub use client::{GitHubClient, DEFAULT_API_URL};
pub use fetch::{Fetcher, StarredApi};
pub use model::Repository;

#[cfg(test)]
pub use fetch::{MockStarredApi, StarredPage};
#[cfg(test)]
pub use model::StarredRepository;
