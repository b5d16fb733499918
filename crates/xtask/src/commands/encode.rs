//! Encode augments and modifier records
//!
//! Produces the binary layout used for per-entity persistence, printed as hex
//! or written to a file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use augment_core::{
    CombatOrigin, CreatureKind, DamageKind, DamageModifier, Factor, ModifierKind, Race, Vocabulary,
};
use clap::{Args, Parser, Subcommand};
use console::style;

use super::catalog::CatalogArgs;
use super::show::describe_modifier;

/// Encode an augment or a single modifier record to hex
#[derive(Parser)]
pub struct Encode {
    #[command(subcommand)]
    target: EncodeTarget,

    /// Write raw bytes to this file instead of printing hex
    #[arg(short, long, value_name = "PATH", global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum EncodeTarget {
    /// Snapshot of one augment from the catalog
    Augment {
        /// Name of the augment to encode
        #[arg(value_name = "NAME")]
        name: String,

        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// One modifier record built from its fields
    Record(RecordArgs),
}

/// Modifier fields, using the catalog vocabulary.
#[derive(Args)]
struct RecordArgs {
    /// Modifier type (e.g. critical, lifesteal, absorb)
    #[arg(long = "mod", value_name = "TYPE")]
    kind: String,

    #[arg(long, default_value_t = 0)]
    value: u16,

    /// percent or flat
    #[arg(long, default_value = "percent")]
    factor: String,

    /// Clamped to 100
    #[arg(long, default_value_t = 100)]
    chance: u8,

    #[arg(long, default_value = "none")]
    damage: String,

    #[arg(long, default_value = "none")]
    origin: String,

    #[arg(long, default_value = "none")]
    target: String,

    #[arg(long, default_value = "none")]
    race: String,

    /// Exact target name (none for any)
    #[arg(long, default_value = "none")]
    monster: String,

    /// Damage kind a conversion or reform transmutes into
    #[arg(long, value_name = "DAMAGE")]
    to_damage: Option<String>,
}

impl RecordArgs {
    fn build(&self) -> Result<DamageModifier> {
        let kind: ModifierKind = self.kind.parse().context("Invalid --mod")?;
        let factor: Factor = self
            .factor
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid --factor: {} (expected percent or flat)", self.factor))?;

        let mut modifier = DamageModifier::new(kind, self.value, factor, self.chance)
            .with_damage(DamageKind::lookup(&self.damage).context("Invalid --damage")?)
            .with_origin(CombatOrigin::lookup(&self.origin).context("Invalid --origin")?)
            .with_target(
                CreatureKind::lookup(&self.target).context("Invalid --target")?,
                Race::lookup(&self.race).context("Invalid --race")?,
            )
            .with_creature_name(self.monster.as_str());

        if let Some(to_damage) = &self.to_damage {
            if !kind.is_conversion_class() {
                anyhow::bail!("--to-damage only applies to conversion and reform, not {}", kind);
            }
            modifier = modifier
                .with_transform(DamageKind::lookup(to_damage).context("Invalid --to-damage")?);
        }
        Ok(modifier)
    }
}

impl Encode {
    pub fn execute(self) -> Result<()> {
        let bytes = match &self.target {
            EncodeTarget::Augment { name, catalog } => {
                let registry = catalog.registry()?;
                let augment = registry
                    .make_augment(name)
                    .with_context(|| format!("Augment not found: {}", name))?;
                eprintln!(
                    "{} {} ({} modifiers)",
                    style("Encoding augment:").bold().cyan(),
                    augment.name(),
                    augment.modifier_count()
                );
                augment.to_bytes().context("Failed to encode augment")?
            }
            EncodeTarget::Record(args) => {
                let modifier = args.build()?;
                eprintln!(
                    "{} {}",
                    style("Encoding record:").bold().cyan(),
                    describe_modifier(&modifier)
                );
                modifier.to_bytes().context("Failed to encode modifier")?
            }
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, &bytes)
                    .with_context(|| format!("Failed to write output file: {}", path.display()))?;
                eprintln!(
                    "{} {} bytes to {}",
                    style("Wrote").bold().green(),
                    bytes.len(),
                    path.display()
                );
            }
            None => println!("{}", hex::encode(&bytes)),
        }
        Ok(())
    }
}
