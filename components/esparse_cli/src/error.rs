//! Error types for the CLI.

use estree::ParseError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// The source failed to parse.
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// The input file could not be read.
    #[error("could not read input: {0}")]
    Io(#[from] std::io::Error),

    /// The tree could not be serialized.
    #[error("could not serialize tree: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
