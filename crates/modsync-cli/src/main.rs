mod cli;
mod commands;
mod interactive;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use commands::CommandOptions;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Set up Ctrl+C handler for graceful interruption
    ctrlc::set_handler(|| {
        eprintln!("\n\nInterrupted by user (Ctrl+C)");
        std::process::exit(130); // Standard exit code for SIGINT
    })
    .context("Failed to set Ctrl+C handler")?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = CommandOptions {
        verbose: cli.verbose,
        dry_run: cli.dry_run,
        yes: cli.yes,
        config_path: cli.config.as_deref(),
        primary: cli.primary.clone(),
        secondary: cli.secondary.clone(),
    };

    match &cli.command {
        Commands::Status => {
            commands::Status::execute(&options).context("Failed to execute status command")?;
        }
        Commands::Diff { json } => {
            commands::Diff::execute(*json, &options).context("Failed to execute diff command")?;
        }
        Commands::Dedupe => {
            commands::Dedupe::execute(&options).context("Failed to execute dedupe command")?;
        }
        Commands::Resolve { updates } => {
            commands::Resolve::execute(*updates, &options)
                .context("Failed to execute resolve command")?;
        }
        Commands::Push { to, delete_unique } => {
            commands::Push::execute(*to, *delete_unique, &options)
                .context("Failed to execute push command")?;
        }
    }

    Ok(())
}

/// Log to stderr so that stdout stays clean for `diff --json`
fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
