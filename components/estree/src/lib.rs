//! ESTree node vocabulary, source positions and parse errors.
//!
//! This crate provides the foundational types shared by the parser and its
//! consumers: the ESTree-shaped AST node definitions, source span/location
//! tracking, and the single error value a failed parse produces.
//!
//! # Overview
//!
//! - [`Program`] - Root node of every parse
//! - [`Statement`] / [`Expression`] / [`Pattern`] - The node categories
//! - [`ParseError`] / [`ErrorKind`] - Terminal parse failure
//! - [`NodePos`] / [`SourceLocation`] - Optional position attachments
//!
//! All nodes serialize to JSON in the ESTree shape: a closed-vocabulary
//! `"type"` tag followed by the node's fields, with `start`/`end` offsets
//! and `loc` objects present only when the parse was configured to record
//! them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod node;
mod ser;
mod source;

pub use error::{ErrorKind, ParseError};
pub use node::*;
pub use source::{NodePos, Position, SourceLocation};
