use anyhow::Result;
use clap::Args;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::config::Config;
use crate::intake::{IntakeOutcome, gate_query};

#[derive(Args)]
pub struct ChatArgs {
    /// Print each outcome as a JSON line
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ChatArgs, config: &Config) -> Result<()> {
    let key = config.secret_key();

    println!(
        "promptgate chat ({} mode)",
        if key.is_some() { "signed" } else { "unsigned" }
    );
    println!("Type /quit to exit\n");

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline("You: ");

        let input = match readline {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                break; // Ctrl+D
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if input == "/quit" || input == "/exit" {
            break;
        }

        let _ = rl.add_history_entry(input);

        let outcome = gate_query(input, key.as_ref());
        if args.json {
            println!("{}", serde_json::to_string(&outcome)?);
            continue;
        }

        match outcome {
            IntakeOutcome::Accepted { query, kind } => {
                println!("Accepted ({:?}): {}\n", kind, query);
            }
            IntakeOutcome::Rejected { error } => {
                eprintln!("{}\n", error);
            }
        }
    }

    Ok(())
}
