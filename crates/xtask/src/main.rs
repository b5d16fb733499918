//! Development tasks for the augment engine
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Check, Decode, Encode, List, Show};

/// Development tasks for the augment engine
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for augment catalogs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Validate a catalog document and report every issue
    Check(Check),

    /// List augments defined by a catalog
    List(List),

    /// Show one augment with all its modifiers
    Show(Show),

    /// Encode an augment or a single modifier record to hex
    Encode(Encode),

    /// Decode a hex augment snapshot or modifier record
    Decode(Decode),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for AUGMENT_DATA_DIR and other env vars)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Check(cmd) => cmd.execute(),
        Command::List(cmd) => cmd.execute(),
        Command::Show(cmd) => cmd.execute(),
        Command::Encode(cmd) => cmd.execute(),
        Command::Decode(cmd) => cmd.execute(),
    }
}
