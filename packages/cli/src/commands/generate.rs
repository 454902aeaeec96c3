use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use dartforge_common::{load_description, load_registry_file, write_output};
use dartforge_generator::{assemble_page, assemble_snippet, Snapshot, WidgetGenerator};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Widget description JSON file
    pub input: PathBuf,

    /// Registry definitions JSON file (widget types + rules)
    #[arg(short, long)]
    pub registry: PathBuf,

    /// Wrap the output in a full page class with the given name
    #[arg(short, long)]
    pub page: Option<String>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn generate(args: GenerateArgs) -> Result<()> {
    let registry_file = load_registry_file(&args.registry)
        .with_context(|| format!("failed to load registry {:?}", args.registry))?;
    let description = load_description(&args.input)
        .with_context(|| format!("failed to load description {:?}", args.input))?;

    let snapshot = Arc::new(Snapshot::from_registry_file(registry_file));
    let generator = WidgetGenerator::new(snapshot);
    let generated = generator.generate(&description)?;

    let rendered = match &args.page {
        Some(page_name) => assemble_page(page_name, &generated),
        None => assemble_snippet(&generated),
    };

    match &args.output {
        Some(path) => {
            write_output(path, &rendered)
                .with_context(|| format!("failed to write {:?}", path))?;
            println!(
                "{} {} → {}",
                "✓".green(),
                description.widget_type,
                path.display()
            );
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
