pub mod chat;
pub mod check;
pub mod config;
pub mod sign;
pub mod verify;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "promptgate")]
#[command(author, version, about = "Signed-command gate for LLM query input")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file
    #[arg(short, long, global = true, env = "PROMPTGATE_CONFIG")]
    pub config: Option<String>,
}

/// Load the config selected by `--config`, or the default one.
pub fn load_config(path: Option<&str>) -> Result<Config> {
    Config::load(path.map(Path::new))
}

/// Default log filter: `--verbose` wins, then `[logging] level`, then info.
/// `RUST_LOG` overrides all of these at subscriber setup.
pub fn log_level(verbose: bool, config: Option<&Config>) -> &str {
    match (verbose, config) {
        (true, _) => "debug",
        (false, Some(config)) => config.logging.level.as_str(),
        (false, None) => "info",
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one input through the gate
    Check(check::CheckArgs),

    /// Sign a command with the configured key
    Sign(sign::SignArgs),

    /// Extract and verify a signed command token
    Verify(verify::VerifyArgs),

    /// Interactive session: every line is signed (if keyed) and gated
    Chat(chat::ChatArgs),

    /// Configuration management
    Config(config::ConfigArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_level(level: &str) -> Config {
        let mut config = Config::default();
        config.logging.level = level.to_string();
        config
    }

    #[test]
    fn config_level_used_when_not_verbose() {
        let config = with_level("warn");
        assert_eq!(log_level(false, Some(&config)), "warn");
    }

    #[test]
    fn verbose_overrides_config_level() {
        let config = with_level("error");
        assert_eq!(log_level(true, Some(&config)), "debug");
    }

    #[test]
    fn unreadable_config_falls_back_to_info() {
        assert_eq!(log_level(false, None), "info");
    }
}
