//! Validate a catalog document
//!
//! Resolves every entry and prints the issues the loader collected.

use anyhow::{Context, Result};
use augment_core::EngineError;
use clap::Parser;
use console::style;

use super::catalog::CatalogArgs;

/// Validate a catalog document and report every issue
#[derive(Parser)]
pub struct Check {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Fail when any issue is reported, not only when entries are skipped
    #[arg(long)]
    deny_warnings: bool,
}

impl Check {
    pub fn execute(self) -> Result<()> {
        let source = self.catalog.source()?;
        let label = source.describe();
        let report = source
            .load()
            .with_context(|| format!("Failed to read catalog: {}", label))?;

        println!("{} {}", style("Catalog:").bold().cyan(), label);
        println!("{} {}", style("Augments:").bold().cyan(), report.augments.len());
        println!(
            "{} {}",
            style("Modifiers:").bold().cyan(),
            report
                .augments
                .iter()
                .map(|augment| augment.modifier_count())
                .sum::<usize>()
        );
        println!();

        if report.is_clean() {
            println!("{}", style("No issues found").bold().green());
            return Ok(());
        }

        let mut skipped = 0;
        println!("{}", style("Issues:").bold().yellow());
        for issue in &report.issues {
            let marker = if issue.skipped_entry() {
                skipped += 1;
                style("skip").red().bold()
            } else {
                style("warn").yellow().bold()
            };
            println!("  [{}] {} {}", marker, style(issue.error_code()).dim(), issue);
        }
        println!();

        let warned = report.issues.len() - skipped;
        println!(
            "{} {} skipped, {} adjusted",
            style("Summary:").bold().cyan(),
            skipped,
            warned
        );

        if skipped > 0 || self.deny_warnings {
            anyhow::bail!("Catalog has {} issue(s)", report.issues.len());
        }
        Ok(())
    }
}
