// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
//   stargazer [--lang <LANG>] [--format <text|csv|json>] <USER>
//
// The parsed Cli is only raw input. config.rs validates it and turns it into
// the immutable Config that the rest of the program uses.
//
// Rust concepts:
// - Derive macros: clap generates all the parsing code from the struct
// - Default values: Given as attributes, shown in --help
// =============================================================================

use clap::Parser;

use crate::github::DEFAULT_API_URL;

#[derive(Parser, Debug)]
#[command(
    name = "stargazer",
    version,
    about = "List the repositories a GitHub user has starred",
    long_about = "stargazer pages through a GitHub user's starred repositories, optionally \
                  keeps only one language, and prints them as text, CSV or JSON lines."
)]
pub struct Cli {
    /// GitHub user whose stars should be listed
    ///
    /// This is a positional argument (required, exactly one)
    pub user: String,

    /// Limit to language (e.g. Go). Case-sensitive exact match
    #[arg(long, default_value = "")]
    pub lang: String,

    /// Output format (text|csv|json)
    ///
    /// Kept as a plain string here so that an unknown value is reported
    /// as a configuration error rather than a usage error
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "STARGAZER_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Number of repositories requested per page (1-100)
    #[arg(long, default_value_t = 30)]
    pub per_page: u32,
}
