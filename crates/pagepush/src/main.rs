//! pagepush CLI - publish HTML trees into Confluence.
//!
//! Provides commands for:
//! - `publish`: Publish one HTML file, or mirror a directory tree, under a page

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::PublishArgs;
use output::Output;

/// pagepush - publish HTML documents into Confluence.
#[derive(Parser)]
#[command(name = "pagepush", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish HTML files into Confluence pages.
    Publish(PublishArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Publish(args) => args.verbose,
    };

    let directives = log_directives(verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Publish(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// Log filter directives: `info` with --verbose, otherwise `RUST_LOG` or `warn`.
fn log_directives(verbose: bool, rust_log: Option<String>) -> String {
    if verbose {
        return "info".to_owned();
    }
    rust_log
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "warn".to_owned())
}
