use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use promptgate::cli::{self, Cli, Commands, load_config};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config_path = cli.config.as_deref();
    // `config` subcommands must work even when the file does not parse.
    let config = load_config(config_path);

    // Initialize logging (stderr, so gated output on stdout stays clean)
    let log_level = cli::log_level(cli.verbose, config.as_ref().ok());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let accepted = match cli.command {
        Commands::Check(args) => cli::check::run(args, &config?)?,
        Commands::Sign(args) => cli::sign::run(args, &config?).map(|_| true)?,
        Commands::Verify(args) => cli::verify::run(args, &config?)?,
        Commands::Chat(args) => cli::chat::run(args, &config?).map(|_| true)?,
        Commands::Config(args) => cli::config::run(args, config_path).map(|_| true)?,
    };

    Ok(if accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
