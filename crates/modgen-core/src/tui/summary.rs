//! Charm-style generation summary using cliclack

use crate::framework::FrameworkConfig;
use crate::generate::{kind_label, GenerateRequest, GenerationOutcome, Generator};
use crate::manifest::MergeOutcome;
use anyhow::Result;

/// Run one generation with a spinner and print the summary
pub async fn run<C: FrameworkConfig>(
    config: &C,
    generator: &Generator,
    request: GenerateRequest,
) -> Result<GenerationOutcome> {
    cliclack::intro(format!("{} modules", config.display_name()))?;

    let spinner = cliclack::spinner();
    spinner.start(format!(
        "Generating {} '{}'...",
        kind_label(request.kind()),
        request.target()
    ));

    let outcome = match generator.generate(&request).await {
        Ok(outcome) => outcome,
        Err(e) => {
            if e.wrote_files() {
                spinner.error("Module files were written, but bookkeeping failed");
            } else {
                spinner.stop("Nothing was generated");
            }
            if e.is_conflict() {
                cliclack::log::error(format!("{}", e))?;
                anyhow::bail!("Remove the existing files or pick another name.");
            }
            return Err(e.into());
        }
    };

    spinner.stop(format!(
        "Created {} files for {} '{}'",
        outcome.written.len(),
        kind_label(outcome.entry.kind),
        outcome.entry.name
    ));

    for path in &outcome.written {
        cliclack::log::success(path.display())?;
    }
    for path in &outcome.skipped {
        cliclack::log::info(format!("{} already exists, kept as is", path.display()))?;
    }
    for warning in &outcome.warnings {
        cliclack::log::warning(warning.lines().next().unwrap_or(warning))?;
    }

    let recorded = match outcome.manifest {
        MergeOutcome::Added => "added to",
        MergeOutcome::Replaced => "replaced in",
        MergeOutcome::Skipped => "already in",
    };
    cliclack::log::info(format!(
        "Route {} {} {}",
        outcome.entry.route,
        recorded,
        generator.layout().manifest_file
    ))?;

    print_next_steps(config, &outcome)?;

    Ok(outcome)
}

fn print_next_steps<C: FrameworkConfig>(config: &C, outcome: &GenerationOutcome) -> Result<()> {
    let steps = config.next_steps(outcome);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
