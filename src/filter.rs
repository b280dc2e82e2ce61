// src/filter.rs
// =============================================================================
// Keeps only repositories written in one language.
//
// The match is exact and case-sensitive: "Go" keeps Go repositories, "go"
// keeps nothing. Repositories GitHub reports no language for never match a
// non-empty filter. An empty filter keeps everything.
// =============================================================================

use crate::github::Repository;

#[derive(Debug, Clone, Default)]
pub struct LanguageFilter {
    lang: String,
}

impl LanguageFilter {
    pub fn new(lang: impl Into<String>) -> Self {
        Self { lang: lang.into() }
    }

    pub fn keep(&self, repo: &Repository) -> bool {
        self.lang.is_empty() || repo.language.as_deref() == Some(self.lang.as_str())
    }
}
