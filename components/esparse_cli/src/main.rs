//! esparse CLI
//!
//! Entry point for the parser binary. Parses CLI arguments, runs the
//! parse, and prints the resulting ESTree JSON.

use clap::Parser as ClapParser;
use esparse_cli::{run, Cli, CliError};

fn main() {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(json) => println!("{json}"),
        Err(CliError::Parse(e)) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}
