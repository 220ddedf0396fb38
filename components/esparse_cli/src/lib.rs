//! ESTree parser CLI library.
//!
//! Provides the argument definitions and the parse-to-JSON driver
//! behind the `esparse` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod run;

pub use cli::Cli;
pub use error::{CliError, CliResult};
pub use run::run;
