//! Decode persisted augment snapshots and modifier records
//!
//! Accepts hex on the command line or a raw binary file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use augment_core::{Augment, DamageModifier};
use clap::{Parser, ValueEnum};
use console::style;

use super::catalog::OutputFormat;
use super::show::{describe_modifier, print_augment, print_json};

/// Decode a hex augment snapshot or modifier record
#[derive(Parser)]
pub struct Decode {
    /// Hex-encoded bytes (whitespace and a 0x prefix are ignored)
    #[arg(value_name = "HEX", required_unless_present = "input")]
    hex: Option<String>,

    /// Read raw bytes from a file instead
    #[arg(short, long, value_name = "PATH", conflicts_with = "hex")]
    input: Option<PathBuf>,

    /// What the bytes hold
    #[arg(short, long, value_enum, default_value = "augment")]
    kind: PayloadKind,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum PayloadKind {
    /// Augment snapshot (name, description, both modifier lists)
    Augment,
    /// A single modifier record
    Record,
}

impl Decode {
    pub fn execute(self) -> Result<()> {
        let bytes = self.read_bytes()?;
        eprintln!("{} {} bytes", style("Payload:").bold().cyan(), bytes.len());

        match self.kind {
            PayloadKind::Augment => {
                let augment =
                    Augment::from_bytes(&bytes).context("Failed to decode augment snapshot")?;
                match self.format {
                    OutputFormat::Summary => print_augment(&augment),
                    OutputFormat::Json => print_json(&augment)?,
                }
            }
            PayloadKind::Record => {
                let modifier =
                    DamageModifier::from_bytes(&bytes).context("Failed to decode modifier record")?;
                match self.format {
                    OutputFormat::Summary => println!("{}", describe_modifier(&modifier)),
                    OutputFormat::Json => print_json(&modifier)?,
                }
            }
        }
        Ok(())
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        if let Some(path) = &self.input {
            return std::fs::read(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()));
        }
        let text = self.hex.as_deref().unwrap_or_default();
        let cleaned: String = text.split_whitespace().collect();
        let digits = cleaned.strip_prefix("0x").unwrap_or(&cleaned);
        hex::decode(digits).context("Failed to parse hex input")
    }
}
