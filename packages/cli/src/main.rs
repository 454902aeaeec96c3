mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{generate, validate, GenerateArgs, ValidateArgs};

/// Dartforge CLI - registry-driven Flutter code generation
#[derive(Parser, Debug)]
#[command(name = "dartforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate Dart code from a widget description
    Generate(GenerateArgs),

    /// Validate a widget description against the registry
    Validate(ValidateArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(args) => generate(args),
        Command::Validate(args) => validate(args),
    };

    if let Err(error) = result {
        eprintln!("{} {}", "✗".red(), error);
        std::process::exit(1);
    }
}
