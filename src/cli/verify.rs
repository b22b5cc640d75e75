use anyhow::Result;
use clap::Args;

use crate::config::{Config, SECRET_KEY_ENV};
use crate::gate;

#[derive(Args)]
pub struct VerifyArgs {
    /// Text containing a `$Sys.command.<n>.<digest>` token
    pub input: String,
}

/// Returns `Ok(false)` when no valid token is found.
pub fn run(args: VerifyArgs, config: &Config) -> Result<bool> {
    let Some(key) = config.secret_key() else {
        anyhow::bail!(
            "No secret key configured. Set {} or gate.secret_key in the config file.",
            SECRET_KEY_ENV
        );
    };

    let result = gate::extract_token(&args.input).and_then(|token| {
        gate::verify(token, &key)?;
        Ok(token)
    });

    match result {
        Ok(token) => {
            println!("Token: VALID ({})", token);
            Ok(true)
        }
        Err(e) => {
            println!("Token: REJECTED");
            println!("  {}", e);
            Ok(false)
        }
    }
}
