//! Parse error type.
//!
//! A parse either returns a complete [`crate::Program`] or exactly one
//! `ParseError`; there is no recovery and no partial tree.

use std::fmt;

/// Classification of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed token: unterminated literal/comment, invalid escape or
    /// character. Raised by the lexer.
    Lexical,
    /// The token stream matches no production at the current state.
    Syntax,
    /// Grammatically valid but forbidden by context: duplicate bindings,
    /// invalid assignment targets, reserved words, strict-mode violations.
    EarlyError,
    /// Input nesting exceeded the configured recursion limit.
    DepthExceeded,
}

/// A parse failure with the position of the offending token.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Failure classification
    pub kind: ErrorKind,
    /// Human-readable description
    pub message: String,
    /// Line number, starting at 1
    pub line: u32,
    /// Column number, starting at 0
    pub column: u32,
    /// Byte offset from the start of the source
    pub offset: u32,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SyntaxError: {} ({}:{})",
            self.message, self.line, self.column
        )
    }
}

impl std::error::Error for ParseError {}
