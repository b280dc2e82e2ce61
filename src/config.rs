// src/config.rs
// =============================================================================
// The run configuration, built once at startup and then only borrowed.
//
// Validation happens here, before any network request is made:
// - the output format must be text, csv or json
// - the page size must be in GitHub's 1..=100 range
// - the API URL must parse
// =============================================================================

use std::str::FromStr;

use url::Url;

use crate::cli::Cli;
use crate::error::{Result, StarsError};

// Which Renderer the run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = StarsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(StarsError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub user: String,
    /// Empty means "no filter"
    pub lang: String,
    pub format: OutputFormat,
    pub api_url: Url,
    pub per_page: u32,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let format = cli.format.parse()?;

        if !(1..=100).contains(&cli.per_page) {
            return Err(StarsError::InvalidPerPage(cli.per_page));
        }

        // Trailing slashes would otherwise produce "//users/..." paths
        let api_url = Url::parse(cli.api_url.trim_end_matches('/'))?;

        Ok(Config {
            user: cli.user,
            lang: cli.lang,
            format,
            api_url,
            per_page: cli.per_page,
        })
    }
}
