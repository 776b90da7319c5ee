//! l2data CLI - Command-line interface for Lineage 2 datapack files

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::{Commands, Context};

use crate::config::DataLayout;

#[derive(Parser)]
#[command(name = "l2data")]
#[command(about = "l2data: Lineage 2 Classic datapack tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Data root holding public/txt and xml (or an l2data.toml)
    #[arg(short, long, global = true, default_value = ".")]
    root: String,

    /// Print the JSON report instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Run the l2data CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let ctx = Context {
        layout: DataLayout::load(&cli.root)?,
        json: cli.json,
    };
    cli.command.execute(&ctx)?;

    Ok(())
}
