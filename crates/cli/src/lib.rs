//! Command-line interface for tsgen.
//!
//! Argument definitions, configuration loading, logging setup and the
//! `generate` / `check` commands. The binary crate only parses arguments,
//! installs logging and calls [`run`].

pub mod check;
pub mod common;
pub mod generate;
pub mod logging;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "tsgen",
    version,
    about = "Compile OpenAPI documents into TypeScript types and API clients"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log every generation step
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate TypeScript files into an output directory
    Generate(generate::GenerateArgs),
    /// Run generation without writing anything and report diagnostics
    Check(check::CheckArgs),
}

/// Dispatch a parsed command line. Returns the process exit code.
pub fn run(cli: Cli) -> i32 {
    match cli.command {
        Commands::Generate(args) => generate::run(args),
        Commands::Check(args) => check::run(args),
    }
}

/// Run a command body, printing its error and mapping the outcome to an
/// exit code.
pub(crate) fn run_command<F>(f: F) -> i32
where
    F: FnOnce() -> Result<(), String>,
{
    match f() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}
