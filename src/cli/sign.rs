use anyhow::Result;
use clap::Args;

use crate::config::{Config, SECRET_KEY_ENV};
use crate::gate;

#[derive(Args)]
pub struct SignArgs {
    /// Command text to sign (`<command>.<digest>`)
    #[arg(required_unless_present = "id", conflicts_with = "id")]
    pub command: Option<String>,

    /// Sign the command identifier `$Sys.command.<ID>` instead
    #[arg(long)]
    pub id: Option<u64>,
}

pub fn run(args: SignArgs, config: &Config) -> Result<()> {
    let Some(key) = config.secret_key() else {
        anyhow::bail!(
            "No secret key configured. Set {} or gate.secret_key in the config file.",
            SECRET_KEY_ENV
        );
    };

    let signed = match (args.id, args.command) {
        (Some(id), _) => gate::sign_command(id, &key),
        (None, Some(command)) => gate::sign(&command, &key),
        (None, None) => anyhow::bail!("Nothing to sign"),
    };

    println!("{}", signed);
    Ok(())
}
