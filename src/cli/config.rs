use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (secret key redacted)
    Show {
        /// Output format: toml (default) or json
        #[arg(short, long, default_value = "toml")]
        format: String,
    },

    /// Show config file path
    Path,

    /// Initialize default config file
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// `path` is the `--config` override, if any.
pub fn run(args: ConfigArgs, path: Option<&str>) -> Result<()> {
    let path = match path {
        Some(p) => PathBuf::from(p),
        None => Config::default_path()?,
    };

    match args.command {
        ConfigCommands::Show { format } => show_config(&path, &format),
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Init { force } => {
            Config::write_template(&path, force)?;
            println!("Created config at {}", path.display());
            Ok(())
        }
    }
}

fn show_config(path: &std::path::Path, format: &str) -> Result<()> {
    let config = Config::load(Some(path))?.redacted();

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
        _ => {
            let toml = toml::to_string_pretty(&config)?;
            println!("{}", toml);
        }
    }

    Ok(())
}
