//! Obex CLI - Command-line utility for fetching, extracting, and validating
//! operator bundles.

mod cli;
mod commands;
mod error;
mod output;
mod progress;
mod source;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match &cli.command {
        cli::Commands::Run(args) => commands::run::execute(args, &*formatter).await,
        cli::Commands::Fetch(args) => commands::fetch::execute(args, &*formatter).await,
        cli::Commands::Extract(args) => commands::extract::execute(args, &*formatter),
        cli::Commands::Validate(args) => commands::validate::execute(args, &*formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    }
}
