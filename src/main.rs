// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Validate them into a Config (before touching the network)
// 3. Page through the user's stars, filter, and print them
// 4. Exit with proper code (0 = success, 1 = usage error, 2 = any other error)
//
// Rust concepts used:
// - async/await: reqwest is async, so main runs inside a tokio runtime
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to map outcomes to exit codes
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;       // src/cli.rs - command-line parsing
mod config;    // src/config.rs - validated run configuration
mod error;     // src/error.rs - error types
mod filter;    // src/filter.rs - language filter
mod github;    // src/github/ - GitHub API access and pagination
mod output;    // src/output/ - text / csv / json writers
mod pipeline;  // src/pipeline.rs - ties fetching, filtering and output together

use std::io;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use config::Config;
use error::StarsError;
use github::GitHubClient;
use output::Renderer;

// A single-threaded runtime is enough: we only ever wait on one request
#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        // Someone closed our stdout (e.g. piped into `head`); that's not a failure
        Err(e) if e.downcast_ref::<StarsError>().is_some_and(StarsError::is_broken_pipe) => 0,
        Err(e) => {
            // If anything failed, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so they never mix with the listing on stdout.
// Quiet by default; set RUST_LOG=stargazer=debug to see every page request.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stargazer=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

// This is the main application logic
// Returns:
//   Ok(0) = listing finished (or --help / --version was shown)
//   Ok(1) = usage error
//   Err   = configuration, API or output error
async fn run() -> Result<i32> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return Ok(report_usage_error(e)),
    };

    // Unknown --format etc. fail here, before any request is sent
    let config = Config::from_cli(cli)?;
    tracing::debug!(?config, "starting");

    let client = GitHubClient::new(config.api_url.clone())?;
    let mut renderer = Renderer::new(config.format, io::stdout())?;

    pipeline::run(&client, &config, &mut renderer).await?;

    Ok(0)
}

// Prints clap's message; for real usage errors also the full option list with defaults
fn report_usage_error(e: clap::Error) -> i32 {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = e.print();
            0
        }
        _ => {
            let _ = e.print();
            eprintln!();
            eprintln!("{}", Cli::command().render_help());
            1
        }
    }
}
