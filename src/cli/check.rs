use anyhow::Result;
use clap::Args;

use crate::config::Config;
use crate::gate::Gatekeeper;
use crate::intake::classify_query;

#[derive(Args)]
pub struct CheckArgs {
    /// The raw input to check
    pub input: String,

    /// Output format: text (default) or json
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

/// Returns `Ok(false)` when the gate rejects the input.
pub fn run(args: CheckArgs, config: &Config) -> Result<bool> {
    let gate = Gatekeeper::new(config.secret_key());
    let result = gate.process(&args.input);

    match args.format.as_str() {
        "json" => {
            let output = match &result {
                Ok(query) => serde_json::json!({
                    "status": "accepted",
                    "query": query,
                    "kind": classify_query(query),
                    "authenticated": gate.is_authenticated(),
                }),
                Err(e) => serde_json::json!({
                    "status": "rejected",
                    "stage": e.stage().to_string(),
                    "error": e.to_string(),
                }),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => match &result {
            Ok(query) => println!("{}", query),
            Err(e) => eprintln!("{}", e),
        },
    }

    Ok(result.is_ok())
}
