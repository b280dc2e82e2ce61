// src/pipeline.rs
// =============================================================================
// Fetcher -> Filter -> Renderer, one page at a time.
//
// Repositories are written in the order GitHub returns them (page order, then
// order within the page). Nothing is buffered beyond the current page, and the
// first error ends the run; rows already written stay written.
// =============================================================================

use std::io::Write;

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::filter::LanguageFilter;
use crate::github::{Fetcher, StarredApi};
use crate::output::Renderer;

// What a finished run did, for the closing log line
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub requests: u32,
    pub seen: usize,
    pub written: usize,
}

pub async fn run<A, W>(api: &A, config: &Config, renderer: &mut Renderer<W>) -> Result<RunSummary>
where
    A: StarredApi + ?Sized,
    W: Write,
{
    let filter = LanguageFilter::new(config.lang.as_str());
    let mut fetcher = Fetcher::new(api, &config.user, config.per_page);
    let mut summary = RunSummary::default();

    while let Some(page) = fetcher.next_page().await? {
        summary.seen += page.len();
        for repo in page.iter().filter(|repo| filter.keep(repo)) {
            renderer.write(repo)?;
            summary.written += 1;
        }
    }

    summary.requests = fetcher.requests();
    info!(
        user = %config.user,
        requests = summary.requests,
        seen = summary.seen,
        written = summary.written,
        "finished listing stars"
    );

    Ok(summary)
}
