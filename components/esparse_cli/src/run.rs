//! The parse-to-JSON driver.

use std::io::Read;

use crate::cli::Cli;
use crate::error::CliResult;

/// Resolve the input source, parse it, and return the tree as a JSON
/// string.
pub fn run(cli: &Cli) -> CliResult<String> {
    let source = read_source(cli)?;
    let program = parser::parse(&source, &cli.options())?;
    let json = if cli.pretty {
        serde_json::to_string_pretty(&program)?
    } else {
        serde_json::to_string(&program)?
    };
    Ok(json)
}

fn read_source(cli: &Cli) -> CliResult<String> {
    if let Some(code) = &cli.eval {
        return Ok(code.clone());
    }
    if let Some(file) = &cli.file {
        return Ok(std::fs::read_to_string(file)?);
    }
    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source)?;
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser as _;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("esparse").chain(args.iter().copied()))
    }

    #[test]
    fn eval_produces_json() {
        let json = run(&cli(&["-e", "let x = 1;"])).expect("parses");
        assert!(json.contains("\"Program\""));
        assert!(json.contains("\"VariableDeclaration\""));
    }

    #[test]
    fn parse_errors_carry_position() {
        let err = run(&cli(&["-e", "let 1;"])).expect_err("must fail");
        assert!(err.to_string().starts_with("SyntaxError:"));
    }

    #[test]
    fn module_flag_changes_goal() {
        assert!(run(&cli(&["-e", "export const a = 1;"])).is_err());
        assert!(run(&cli(&["-e", "export const a = 1;", "--module"])).is_ok());
    }

    #[test]
    fn pretty_output_is_multiline() {
        let json = run(&cli(&["-e", "1;", "--pretty"])).expect("parses");
        assert!(json.contains('\n'));
    }
}
