//! Command-line argument definitions.

use clap::Parser;

/// Parse ECMAScript source and print the ESTree syntax tree as JSON.
#[derive(Parser, Debug)]
#[command(name = "esparse", version, about)]
pub struct Cli {
    /// Source file to parse; reads stdin when omitted
    pub file: Option<String>,

    /// Inline source text to parse instead of a file
    #[arg(short, long, value_name = "CODE", conflicts_with = "file")]
    pub eval: Option<String>,

    /// Parse with the Module goal (implies strict mode)
    #[arg(short, long)]
    pub module: bool,

    /// Recognize JSX elements and fragments
    #[arg(long)]
    pub jsx: bool,

    /// Enable class fields, static blocks, dynamic import, and
    /// import.meta
    #[arg(long)]
    pub next: bool,

    /// Attach start/end byte offsets to every node
    #[arg(long)]
    pub range: bool,

    /// Attach line/column locations to every node
    #[arg(long)]
    pub loc: bool,

    /// Attach raw source text to literal nodes
    #[arg(long)]
    pub raw: bool,

    /// Source name recorded in locations (defaults to the file name
    /// when --loc is set)
    #[arg(long, value_name = "NAME")]
    pub source: Option<String>,

    /// Treat script source as strict without a directive
    #[arg(long)]
    pub strict: bool,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

impl Cli {
    /// Parser options implied by the flags.
    pub fn options(&self) -> parser::Options {
        parser::Options {
            module: self.module,
            next: self.next,
            jsx: self.jsx,
            ranges: self.range,
            loc: self.loc,
            raw: self.raw,
            source: self
                .source
                .clone()
                .or_else(|| self.loc.then(|| self.file.clone()).flatten()),
            implied_strict: self.strict,
            ..parser::Options::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser as _;

    #[test]
    fn flags_map_to_options() {
        let cli = Cli::parse_from(["esparse", "--module", "--loc", "--raw", "a.js"]);
        let options = cli.options();
        assert!(options.module);
        assert!(options.loc);
        assert!(options.raw);
        assert!(!options.ranges);
        assert_eq!(options.source.as_deref(), Some("a.js"));
    }

    #[test]
    fn explicit_source_wins() {
        let cli = Cli::parse_from(["esparse", "--loc", "--source", "input", "a.js"]);
        assert_eq!(cli.options().source.as_deref(), Some("input"));
    }

    #[test]
    fn eval_conflicts_with_file() {
        assert!(Cli::try_parse_from(["esparse", "-e", "1;", "a.js"]).is_err());
    }
}
