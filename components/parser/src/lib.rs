//! ECMAScript parser producing ESTree-shaped syntax trees.
//!
//! The crate exposes three entry points: [`parse_script`],
//! [`parse_module`], and the option-driven [`parse`]. All of them lex
//! and parse in a single forward pass, performing automatic semicolon
//! insertion, cover-grammar reinterpretation for destructuring and
//! arrow parameters, and the strict-mode early errors. The result is
//! either a [`Program`] or the first [`ParseError`] encountered.
//!
//! ```
//! use parser::{parse_script, Options};
//!
//! let program = parse_script("let answer = 6 * 7;", &Options::default()).unwrap();
//! assert_eq!(program.body.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod context;
pub mod lexer;
mod parser;

pub use estree::{ErrorKind, ParseError, Program};

/// Parser configuration.
///
/// The default is a plain ES2022 script parse with no positions
/// attached to nodes.
#[derive(Clone, Debug)]
pub struct Options {
    /// Parse with the Module goal symbol; implies strict mode.
    pub module: bool,
    /// Enable stage-adjacent syntax: class fields, static blocks,
    /// dynamic `import()`, and `import.meta`.
    pub next: bool,
    /// Enable everything `next` enables plus experimental syntax.
    pub experimental: bool,
    /// Recognize JSX elements and fragments in expression position.
    pub jsx: bool,
    /// Attach `start`/`end` byte offsets to every node.
    pub ranges: bool,
    /// Attach line/column `loc` objects to every node.
    pub loc: bool,
    /// Attach the raw source text to literal nodes.
    pub raw: bool,
    /// Value for `loc.source` on every location, typically a file name.
    pub source: Option<String>,
    /// Permit `return` at the top level of a script.
    pub global_return: bool,
    /// Treat script source as strict without a directive.
    pub implied_strict: bool,
    /// Maximum grammar nesting depth before the parse is abandoned.
    pub max_depth: u32,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            module: false,
            next: false,
            experimental: false,
            jsx: false,
            ranges: false,
            loc: false,
            raw: false,
            source: None,
            global_return: false,
            implied_strict: false,
            max_depth: 256,
        }
    }
}

impl Options {
    pub(crate) fn next_enabled(&self) -> bool {
        self.next || self.experimental
    }
}

/// Parse `source` with the goal symbol chosen by `options.module`.
pub fn parse(source: &str, options: &Options) -> Result<Program, ParseError> {
    parser::Parser::new(source, options).parse_program()
}

/// Parse `source` as a classic script.
pub fn parse_script(source: &str, options: &Options) -> Result<Program, ParseError> {
    let options = Options { module: false, ..options.clone() };
    parser::Parser::new(source, &options).parse_program()
}

/// Parse `source` as a module. Module code is strict and may contain
/// import and export declarations.
pub fn parse_module(source: &str, options: &Options) -> Result<Program, ParseError> {
    let options = Options { module: true, ..options.clone() };
    parser::Parser::new(source, &options).parse_program()
}
