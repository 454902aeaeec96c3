use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use dartforge_common::{load_description, load_registry_file};
use dartforge_generator::{validate_description, Snapshot};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Widget description JSON file
    pub input: PathBuf,

    /// Registry definitions JSON file (widget types + rules)
    #[arg(short, long)]
    pub registry: PathBuf,
}

pub fn validate(args: ValidateArgs) -> Result<()> {
    let registry_file = load_registry_file(&args.registry)
        .with_context(|| format!("failed to load registry {:?}", args.registry))?;
    let description = load_description(&args.input)
        .with_context(|| format!("failed to load description {:?}", args.input))?;

    let snapshot = Arc::new(Snapshot::from_registry_file(registry_file));
    let report = validate_description(&snapshot, &description);

    for warning in &report.warnings {
        println!("  {} {}", "⚠".yellow(), warning);
    }
    for error in &report.errors {
        println!("  {} {}", "✗".red(), error.to_string().red());
    }

    if report.is_valid() {
        println!("{} {} is valid", "✓".green(), description.widget_type);
        Ok(())
    } else {
        anyhow::bail!(
            "{} error(s), {} warning(s)",
            report.errors.len(),
            report.warnings.len()
        );
    }
}
