// src/github/fetch.rs
// =============================================================================
// The pagination loop over a user's starred repositories.
//
// Strategy:
// - Ask for the first page with no page number
// - Hand every repository on that page to the caller
// - If the response points at a next page, ask for that one; otherwise stop
//
// The HTTP details live behind the StarredApi trait (see client.rs), so the
// loop can be tested with a scripted mock instead of the real GitHub.
//
// Rust concepts:
// - Traits: The seam between "what to fetch" and "how to fetch it"
// - async-trait: Async functions inside a trait
// - Option<u32>: "No next page" is None rather than a magic 0
// =============================================================================

use async_trait::async_trait;
use tracing::{debug, warn};

use super::model::{Repository, StarredRepository};
use crate::error::Result;

// Query parameters for one page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListStarredOptions {
    /// None = the first request, which sends no page parameter
    pub page: Option<u32>,
    pub per_page: u32,
}

// One page of results plus the pointer to the next one
#[derive(Debug, Clone, Default)]
pub struct StarredPage {
    pub entries: Vec<StarredRepository>,
    pub next_page: Option<u32>,
}

// Anything that can list a user's stars, one page per call
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StarredApi: Send + Sync {
    async fn list_starred(&self, user: &str, opts: &ListStarredOptions) -> Result<StarredPage>;
}

// Walks the pages of one user's stars, holding only one page at a time
pub struct Fetcher<'a, A: StarredApi + ?Sized> {
    api: &'a A,
    user: &'a str,
    opts: ListStarredOptions,
    done: bool,
    requests: u32,
}

impl<'a, A: StarredApi + ?Sized> Fetcher<'a, A> {
    pub fn new(api: &'a A, user: &'a str, per_page: u32) -> Self {
        Self {
            api,
            user,
            opts: ListStarredOptions { page: None, per_page },
            done: false,
            requests: 0,
        }
    }

    // Fetches the next page
    //
    // Returns:
    //   Ok(Some(repos)) = one page of repositories, in API order
    //   Ok(None)        = pagination is exhausted
    //   Err             = the request failed; the fetcher should not be used again
    pub async fn next_page(&mut self) -> Result<Option<Vec<Repository>>> {
        if self.done {
            return Ok(None);
        }

        debug!(user = self.user, page = ?self.opts.page, "requesting starred page");
        self.requests += 1;

        let page = match self.api.list_starred(self.user, &self.opts).await {
            Ok(page) => page,
            Err(e) => {
                self.done = true;
                return Err(e);
            }
        };

        let current = self.opts.page.unwrap_or(1);
        match page.next_page {
            Some(next) if next > current => self.opts.page = Some(next),
            Some(next) => {
                // A cursor that doesn't move forward would loop forever
                warn!(current, next, "next page does not advance, stopping");
                self.done = true;
            }
            None => self.done = true,
        }

        let repos = page.entries.into_iter().map(|entry| entry.repo).collect();
        Ok(Some(repos))
    }

    // How many requests have been sent so far
    pub fn requests(&self) -> u32 {
        self.requests
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `A: StarredApi + ?Sized`?
//    - `?Sized` lets A be a trait object (`dyn StarredApi`) as well as a
//      concrete type like GitHubClient or the test mock
//
// 2. Why return one page at a time instead of a Vec of everything?
//    - A user can have thousands of stars
//    - The caller prints each page before the next request, so output
//      appears while we are still fetching and memory stays at one page
//
// 3. What does #[cfg_attr(test, mockall::automock)] do?
//    - Only in test builds, mockall generates a MockStarredApi struct
//    - Tests script its responses with expect_list_starred()
// -----------------------------------------------------------------------------
