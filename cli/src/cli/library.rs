use anyhow::Result;
use codem_core::player::ConversionMode;
use codem_core::PlayerClient;
use colored::*;
use structopt::StructOpt;

use super::report;

#[derive(StructOpt, Debug)]
pub enum LibraryCommand {
    /// Load files into the playlist (no files opens the player's file dialog)
    #[structopt(name = "load")]
    Load {
        #[structopt(name = "FILES")]
        files: Vec<String>,
    },

    /// Download a YouTube video/audio
    #[structopt(name = "download")]
    Download {
        #[structopt(name = "URL")]
        url: String,
    },

    /// Download a URL and add it to the playlist without playing
    #[structopt(name = "queue")]
    Queue {
        #[structopt(name = "URL")]
        url: String,
    },

    /// Download a URL and start playing if the player is idle
    #[structopt(name = "play-url")]
    PlayUrl {
        #[structopt(name = "URL")]
        url: String,
    },

    /// Wait for the current download to complete
    #[structopt(name = "wait")]
    Wait {
        /// Maximum number of poll intervals to wait
        #[structopt(long, default_value = "60")]
        timeout: u32,
    },

    /// Convert files with the player's file converter
    #[structopt(name = "convert")]
    Convert {
        /// Conversion mode, e.g. "PNG to JPG", "Image to WebP", "PDF to JPGs"
        #[structopt(long, default_value = "PNG to JPG")]
        mode: String,

        #[structopt(name = "FILES", required = true, min_values = 1)]
        files: Vec<String>,
    },
}

impl LibraryCommand {
    pub fn execute(self, client: &mut PlayerClient) -> Result<()> {
        match self {
            Self::Load { files } => Self::handle_load(client, files),
            Self::Download { url } => {
                println!("{} Downloading {}...", "[INFO]".blue(), url.cyan());
                report("Download", &client.download(&url)?);
                Ok(())
            }
            Self::Queue { url } => {
                println!("{} Queueing {}...", "[INFO]".blue(), url.cyan());
                report("Add to queue", &client.add_to_queue(&url)?);
                Ok(())
            }
            Self::PlayUrl { url } => {
                println!("{} Downloading and playing {}...", "[INFO]".blue(), url.cyan());
                report("Play URL", &client.play_url(&url)?);
                Ok(())
            }
            Self::Wait { timeout } => Self::handle_wait(client, timeout),
            Self::Convert { mode, files } => Self::handle_convert(client, &mode, &files),
        }
    }

    fn handle_load(client: &mut PlayerClient, files: Vec<String>) -> Result<()> {
        if files.is_empty() {
            println!("{} Asking the player to open its file dialog...", "[INFO]".blue());
            report("Load playlist", &client.load_playlist(None)?);
        } else {
            println!("{} Loading {} file(s)...", "[INFO]".blue(), files.len());
            report("Load playlist", &client.load_playlist(Some(files))?);
        }
        Ok(())
    }

    fn handle_wait(client: &mut PlayerClient, timeout: u32) -> Result<()> {
        let interval = client.config().poll_interval();
        println!(
            "{} Waiting up to {:?} for the download to finish...",
            "[INFO]".blue(),
            interval * timeout
        );
        if client.wait_for_download(timeout)? {
            println!("{} Download finished.", "[SUCCESS]".green());
        } else {
            println!("{} Timed out waiting for the download.", "[WARN]".yellow());
        }
        Ok(())
    }

    fn handle_convert(client: &mut PlayerClient, mode: &str, files: &[String]) -> Result<()> {
        if mode.parse::<ConversionMode>().is_err() {
            let known: Vec<&str> = ConversionMode::ALL.iter().map(|m| m.as_str()).collect();
            println!(
                "{} '{}' is not a known conversion mode ({}); sending it anyway.",
                "[WARN]".yellow(),
                mode,
                known.join(", ")
            );
        }
        println!(
            "{} Converting {} file(s) with mode {}...",
            "[INFO]".blue(),
            files.len(),
            mode.cyan()
        );
        report("Convert files", &client.convert_files(files, mode)?);
        Ok(())
    }
}
