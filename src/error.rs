// src/error.rs
// =============================================================================
// All the ways a run can fail.
//
// Every failure is terminal: the pipeline stops at the first error and main.rs
// turns it into an "Error: ..." line on stderr plus a non-zero exit code.
// Output that was already written before the failure stays written.
//
// Rust concepts:
// - thiserror: Derives Display and std::error::Error for our enum
// - #[from]: Lets the ? operator convert library errors automatically
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StarsError {
    /// --format was something other than text, csv or json
    #[error("unknown output format: {0} (expected text, csv or json)")]
    UnknownFormat(String),

    #[error("--per-page must be between 1 and 100, got {0}")]
    InvalidPerPage(u32),

    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request never produced a response (DNS, TLS, connection reset...)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub answered, but not with a 2xx
    #[error("GitHub API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("could not decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("output failed: {0}")]
    Io(#[from] std::io::Error),
}

impl StarsError {
    // True when stdout was closed underneath us (e.g. `stargazer me | head`)
    pub fn is_broken_pipe(&self) -> bool {
        let io = match self {
            StarsError::Io(e) => Some(e),
            StarsError::Csv(e) => match e.kind() {
                csv::ErrorKind::Io(e) => Some(e),
                _ => None,
            },
            _ => None,
        };
        matches!(io, Some(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }
}

// Shorthand used across the crate
pub type Result<T> = std::result::Result<T, StarsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message() {
        let err = StarsError::Api {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "GitHub API returned 404: Not Found");
    }

    #[test]
    fn test_broken_pipe_detection() {
        let err: StarsError = std::io::Error::from(std::io::ErrorKind::BrokenPipe).into();
        assert!(err.is_broken_pipe());

        let err: StarsError = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert!(!err.is_broken_pipe());

        assert!(!StarsError::UnknownFormat("xml".to_string()).is_broken_pipe());
    }
}
