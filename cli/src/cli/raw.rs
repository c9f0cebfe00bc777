use anyhow::{anyhow, Context, Result};
use codem_core::rpc::message::Command;
use codem_core::{Params, PlayerClient};
use colored::*;
use serde_json::Value;
use structopt::StructOpt;

use super::print_json;

#[derive(StructOpt, Debug)]
pub struct CallCommand {
    /// Command name, e.g. get_status or set_volume
    #[structopt(name = "COMMAND")]
    command: String,

    /// Parameters as a JSON object, e.g. '{"volume": 80}'
    #[structopt(long)]
    params: Option<String>,
}

impl CallCommand {
    pub fn execute(self, client: &mut PlayerClient) -> Result<()> {
        let params = match self.params.as_deref() {
            Some(text) => parse_params(text)?,
            None => Params::new(),
        };
        if Command::from_name(&self.command).is_none() {
            println!(
                "{} '{}' is not a known player command; sending it anyway.",
                "[WARN]".yellow(),
                self.command
            );
        }

        println!("{} Sending {}...", "[INFO]".blue(), self.command.cyan());
        let response = client.call(&self.command, params)?;
        print_json(&Value::Object(response.into_inner()));
        Ok(())
    }
}

fn parse_params(text: &str) -> Result<Params> {
    let value: Value = serde_json::from_str(text)
        .with_context(|| format!("Failed to parse --params as JSON: {}", text))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(anyhow!("--params must be a JSON object, got {}", other)),
    }
}
