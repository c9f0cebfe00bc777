mod library;
mod playback;
mod query;
mod raw;

use anyhow::{Context, Result};
use codem_core::utils::logging;
use codem_core::{ClientConfig, ClientError, PlayerClient, Response};
use colored::*;
use serde_json::Value;
use structopt::{clap::AppSettings, StructOpt};
use self::{
    library::LibraryCommand, playback::PlaybackCommand, query::QueryCommand, raw::CallCommand,
};

#[derive(StructOpt, Debug)]
#[structopt(
    name = "codem",
    about = "Remote control for the Codem music player",
    global_settings = &[AppSettings::DisableHelpSubcommand]
)]
pub struct App {
    /// Optional path to config file (default: ./default.json if present)
    #[structopt(long, global = true)]
    config: Option<String>,

    /// Player host, overrides the config file
    #[structopt(long, global = true)]
    host: Option<String>,

    /// Player API port, overrides the config file
    #[structopt(long, global = true)]
    port: Option<u16>,

    #[structopt(subcommand)]
    command: AppCommand,
}

#[derive(StructOpt, Debug)]
pub enum AppCommand {
    #[structopt(flatten)]
    Playback(PlaybackCommand),

    #[structopt(flatten)]
    Library(LibraryCommand),

    #[structopt(flatten)]
    Query(QueryCommand),

    /// Send a raw command with optional JSON parameters
    #[structopt(name = "call")]
    Call(CallCommand),
}

impl App {
    pub fn execute(self) -> Result<()> {
        let config = self.client_config()?;
        logging::init(
            logging::parse_level(&config.log_level),
            config.log_path.as_deref(),
        )
        .context("Failed to initialize logger")?;

        log::debug!(
            "Using player at {}:{} ({} framing)",
            config.host,
            config.port,
            config.framing
        );
        let mut client = PlayerClient::new(config);
        let result = match self.command {
            AppCommand::Playback(cmd) => cmd.execute(&mut client),
            AppCommand::Library(cmd) => cmd.execute(&mut client),
            AppCommand::Query(cmd) => cmd.execute(&mut client),
            AppCommand::Call(cmd) => cmd.execute(&mut client),
        };

        if let Err(e) = &result {
            if let Some(ClientError::ConnectionFailure { .. }) = e.downcast_ref::<ClientError>() {
                println!(
                    "{} Make sure the Codem Music Player is running!",
                    "[WARN]".yellow()
                );
            }
        }
        result
    }

    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::load(self.config.as_deref())
            .context("Failed to load client configuration")?;
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        config.validate().context("Invalid client configuration")?;
        Ok(config)
    }
}

/// Prints the outcome of a command the player acknowledges with a status.
fn report(action: &str, response: &Response) {
    if response.is_success() {
        match response.message() {
            Some(msg) => println!("{} {}: {}", "[SUCCESS]".green(), action, msg.italic()),
            None => println!("{} {}", "[SUCCESS]".green(), action),
        }
    } else {
        println!(
            "{} {} was not accepted (status: {}): {}",
            "[WARN]".yellow(),
            action,
            response.status().unwrap_or("missing").bold(),
            response.message().unwrap_or("no details").italic()
        );
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}
