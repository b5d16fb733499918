//! List augments defined by a catalog

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use super::catalog::CatalogArgs;

/// List augments defined by a catalog
#[derive(Parser)]
pub struct List {
    #[command(flatten)]
    catalog: CatalogArgs,
}

impl List {
    pub fn execute(self) -> Result<()> {
        let registry = self.catalog.registry()?;
        let names = registry.names().context("Failed to read registry")?;

        println!(
            "{} {}",
            style("Augments:").bold().cyan(),
            style(names.len()).bold()
        );
        println!();

        for name in names {
            let augment = registry
                .make_augment(&name)
                .with_context(|| format!("Failed to clone augment: {}", name))?;
            println!(
                "  {:<24} {} attack, {} defense",
                style(&name).bold(),
                augment.attack_modifiers().len(),
                augment.defense_modifiers().len()
            );
        }

        Ok(())
    }
}
