use anyhow::Result;
use codem_core::player::Position;
use codem_core::PlayerClient;
use colored::*;
use structopt::StructOpt;

use super::report;

#[derive(StructOpt, Debug)]
pub enum PlaybackCommand {
    /// Start or resume playback
    #[structopt(name = "play")]
    Play,

    /// Pause playback
    #[structopt(name = "pause")]
    Pause,

    /// Stop playback
    #[structopt(name = "stop")]
    Stop,

    /// Play next track in playlist
    #[structopt(name = "next")]
    Next,

    /// Play previous track in playlist
    #[structopt(name = "prev")]
    Prev,

    /// Toggle loop mode (none, track, playlist)
    #[structopt(name = "loop")]
    Loop,

    /// Set volume level (0-100)
    #[structopt(name = "volume")]
    Volume {
        #[structopt(name = "LEVEL", allow_hyphen_values = true)]
        level: f64,
    },

    /// Jump to a position, in seconds or as a percentage such as 50%
    #[structopt(name = "seek")]
    Seek {
        #[structopt(name = "POSITION")]
        position: Position,
    },
}

impl PlaybackCommand {
    pub fn execute(self, client: &mut PlayerClient) -> Result<()> {
        match self {
            Self::Play => report("Play", &client.play()?),
            Self::Pause => report("Pause", &client.pause()?),
            Self::Stop => report("Stop", &client.stop()?),
            Self::Next => report("Next track", &client.next_track()?),
            Self::Prev => report("Previous track", &client.previous_track()?),
            Self::Loop => report("Toggle loop", &client.toggle_loop()?),
            Self::Volume { level } => {
                println!("{} Setting volume to {}%...", "[INFO]".blue(), level);
                report("Set volume", &client.set_volume(level)?);
            }
            Self::Seek { position } => {
                println!("{} Seeking to {}...", "[INFO]".blue(), position.to_string().cyan());
                report("Seek", &client.set_position(position)?);
            }
        }
        Ok(())
    }
}
