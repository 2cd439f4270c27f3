//! buildart CLI - Command-line interface for Build engine tile tools

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;
use progress::TermCaps;

#[derive(Parser)]
#[command(name = "buildart")]
#[command(about = "buildart: Build engine ART tile tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the buildart CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    // Terminal capabilities are detected once here and passed down rather
    // than read from globals
    let caps = TermCaps::detect();

    let cli = Cli::parse();
    cli.command.execute(&caps)?;

    Ok(())
}
