use anyhow::{Context, Result};
use codem_core::player::PlayerStatus;
use codem_core::PlayerClient;
use colored::*;
use structopt::StructOpt;

use super::{print_json, report};

#[derive(StructOpt, Debug)]
pub enum QueryCommand {
    /// Show current player status
    #[structopt(name = "status")]
    Status,

    /// Show the current playlist
    #[structopt(name = "playlist")]
    Playlist,

    /// Show information about the current track
    #[structopt(name = "track")]
    Track,
}

impl QueryCommand {
    pub fn execute(self, client: &mut PlayerClient) -> Result<()> {
        match self {
            Self::Status => Self::handle_status(client),
            Self::Playlist => Self::handle_playlist(client),
            Self::Track => Self::handle_track(client),
        }
    }

    fn handle_status(client: &mut PlayerClient) -> Result<()> {
        let response = client.get_status()?;
        if !response.is_success() {
            report("Get status", &response);
            return Ok(());
        }

        let status: PlayerStatus = match response.data() {
            Some(data) => serde_json::from_value(data.clone())
                .context("Player sent a malformed status")?,
            None => PlayerStatus::default(),
        };
        println!("{}", format_status(&status));
        Ok(())
    }

    fn handle_playlist(client: &mut PlayerClient) -> Result<()> {
        let response = client.get_playlist()?;
        match response.data() {
            Some(data) if response.is_success() => print_json(data),
            _ => report("Get playlist", &response),
        }
        Ok(())
    }

    fn handle_track(client: &mut PlayerClient) -> Result<()> {
        match client.get_current_track_info()? {
            Some(info) => print_json(&info),
            None => println!("{} No track information available.", "[WARN]".yellow()),
        }
        Ok(())
    }
}

fn format_status(status: &PlayerStatus) -> String {
    let state = if status.is_paused.unwrap_or(false) {
        "paused".yellow()
    } else if status.playing() {
        "playing".green()
    } else {
        "stopped".red()
    };

    let mut lines = vec![format!("{:<10} {}", "State:".bold(), state)];
    if let Some(track) = &status.current_track {
        lines.push(format!("{:<10} {}", "Track:".bold(), track.cyan()));
    }
    if let (Some(index), Some(length)) = (status.playlist_index, status.playlist_length) {
        lines.push(format!("{:<10} {}/{}", "Playlist:".bold(), index + 1, length));
    }
    if let Some(volume) = status.volume {
        lines.push(format!("{:<10} {:.0}%", "Volume:".bold(), volume));
    }
    if let (Some(position), Some(duration)) = (status.position, status.duration) {
        let progress = status
            .progress()
            .map(|p| format!(" ({:.0}%)", p))
            .unwrap_or_default();
        lines.push(format!(
            "{:<10} {} / {}{}",
            "Position:".bold(),
            format_clock(position),
            format_clock(duration),
            progress
        ));
    }
    lines.join("\n")
}

/// Formats seconds as `m:ss`.
fn format_clock(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
