//! Show augment details
//!
//! Clones one template from the catalog and prints its modifier lists.

use anyhow::{Context, Result};
use augment_core::{Augment, DamageModifier, Factor, WILDCARD_NAME};
use clap::Parser;
use console::style;

use super::catalog::{CatalogArgs, OutputFormat};

/// Show one augment with all its modifiers
#[derive(Parser)]
pub struct Show {
    /// Name of the augment to show
    #[arg(value_name = "NAME")]
    name: String,

    #[command(flatten)]
    catalog: CatalogArgs,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Show {
    pub fn execute(self) -> Result<()> {
        let registry = self.catalog.registry()?;
        let augment = registry
            .make_augment(&self.name)
            .with_context(|| format!("Augment not found: {}", self.name))?;

        match self.format {
            OutputFormat::Summary => print_augment(&augment),
            OutputFormat::Json => print_json(&augment)?,
        }
        Ok(())
    }
}

pub(super) fn print_augment(augment: &Augment) {
    println!("{} {}", style("Augment:").bold().cyan(), augment.name());
    if !augment.description().is_empty() {
        println!("{} {}", style("Description:").bold().cyan(), augment.description());
    }
    println!();

    print_list("Attack modifiers:", augment.attack_modifiers());
    print_list("Defense modifiers:", augment.defense_modifiers());
}

fn print_list(title: &str, modifiers: &[DamageModifier]) {
    println!("{} {}", style(title).bold().yellow(), modifiers.len());
    for modifier in modifiers {
        println!("  {}", describe_modifier(modifier));
    }
    println!();
}

/// One-line rendering such as `critical 60% (chance 100) vs monster`.
pub(super) fn describe_modifier(modifier: &DamageModifier) -> String {
    let amount = match modifier.factor() {
        Factor::Percent => format!("{}%", modifier.value()),
        Factor::Flat => format!("+{}", modifier.value()),
    };
    let mut line = format!(
        "{} {} (chance {})",
        style(modifier.kind()).bold(),
        amount,
        modifier.chance()
    );

    let mut filters = Vec::new();
    if !modifier.damage_filter().is_wildcard() {
        filters.push(format!("damage {}", modifier.damage_filter()));
    }
    if !modifier.origin_filter().is_wildcard() {
        filters.push(format!("origin {}", modifier.origin_filter()));
    }
    if !modifier.target_filter().is_wildcard() {
        filters.push(format!("target {}", modifier.target_filter()));
    }
    if !modifier.race_filter().is_wildcard() {
        filters.push(format!("race {}", modifier.race_filter()));
    }
    if modifier.creature_name() != WILDCARD_NAME {
        filters.push(format!("name {}", modifier.creature_name()));
    }
    if !filters.is_empty() {
        line.push_str(&format!(" [{}]", filters.join(", ")));
    }

    if let Some(transform) = modifier.conversion_type() {
        line.push_str(&format!(" -> {}", transform));
    }
    line
}

pub(super) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}
