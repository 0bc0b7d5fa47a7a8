//! Plain colored console output, used when the `tui` feature is disabled and for listings

use crate::generate::{kind_label, GenerationOutcome};
use crate::manifest::ModuleEntry;
use colored::Colorize;

/// Print the files a generation wrote
pub fn print_outcome(outcome: &GenerationOutcome) {
    println!(
        "{} {} '{}'",
        "Generated".green().bold(),
        kind_label(outcome.entry.kind),
        outcome.entry.name
    );

    for path in &outcome.written {
        println!("  {} {}", "+".green(), path.display());
    }
    for path in &outcome.skipped {
        println!("  {} {} (exists)", "=".blue(), path.display());
    }
    for warning in &outcome.warnings {
        eprintln!("{} {}", "Warning:".yellow(), warning);
    }

    println!();
    println!("  Route: {}", outcome.entry.route.cyan());
}

/// Print the modules recorded in a manifest
pub fn print_modules(entries: &[ModuleEntry]) {
    if entries.is_empty() {
        println!("{}", "No modules generated yet.".dimmed());
        return;
    }

    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    for entry in entries {
        println!(
            "  {:<8} {:<width$}  {}",
            entry.kind.display_name().blue(),
            entry.name,
            entry.route.cyan(),
            width = width
        );
    }
}

#[cfg(not(feature = "tui"))]
pub use plain::run;

#[cfg(not(feature = "tui"))]
mod plain {
    use super::print_outcome;
    use crate::framework::FrameworkConfig;
    use crate::generate::{GenerateRequest, GenerationOutcome, Generator};
    use anyhow::Result;

    /// Run one generation and print the summary without interactive widgets
    pub async fn run<C: FrameworkConfig>(
        config: &C,
        generator: &Generator,
        request: GenerateRequest,
    ) -> Result<GenerationOutcome> {
        let outcome = generator.generate(&request).await?;
        print_outcome(&outcome);

        for (i, step) in config.next_steps(&outcome).iter().enumerate() {
            println!("  {}.  {}", i + 1, step);
        }
        Ok(outcome)
    }
}
