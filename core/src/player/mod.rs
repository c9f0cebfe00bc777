// core/src/player/mod.rs
pub mod types;

use crate::error::{ClientError, CommunicationError, Result};
use crate::rpc::message::{Command, Params, Request, Response};
use crate::rpc::request_reply;
use crate::utils::config::ClientConfig;
use serde_json::{json, Value};
use std::thread;
pub use types::{ConversionMode, PlayerStatus, Position};

/// Remote control for a running Codem music player.
///
/// Each operation opens its own connection, so a client holds no socket
/// between calls. Operations take `&mut self` because they update the
/// connection flag reported by [`PlayerClient::is_connected`].
#[derive(Debug, Clone)]
pub struct PlayerClient {
    config: ClientConfig,
    connected: bool,
}

impl Default for PlayerClient {
    fn default() -> Self {
        PlayerClient::new(ClientConfig::default())
    }
}

impl PlayerClient {
    pub fn new(config: ClientConfig) -> Self {
        PlayerClient {
            config,
            connected: false,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether the most recent call completed a round trip.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Sends `command` with `params` and returns the player's reply.
    pub fn call(&mut self, command: &str, params: Params) -> Result<Response> {
        let request = Request::new(command, params);
        let result = request_reply(&self.config, &request);
        self.connected = result.is_ok();
        result
    }

    fn send(&mut self, command: Command) -> Result<Response> {
        self.call(command.as_str(), Params::new())
    }

    fn send_with(&mut self, command: Command, params: Value) -> Result<Response> {
        let params = match params {
            Value::Object(map) => map,
            _ => Params::new(),
        };
        self.call(command.as_str(), params)
    }

    // Player controls

    pub fn play(&mut self) -> Result<Response> {
        self.send(Command::Play)
    }

    pub fn pause(&mut self) -> Result<Response> {
        self.send(Command::Pause)
    }

    pub fn stop(&mut self) -> Result<Response> {
        self.send(Command::Stop)
    }

    pub fn next_track(&mut self) -> Result<Response> {
        self.send(Command::Next)
    }

    pub fn previous_track(&mut self) -> Result<Response> {
        self.send(Command::Prev)
    }

    /// Cycles the loop mode (none, track, playlist).
    pub fn toggle_loop(&mut self) -> Result<Response> {
        self.send(Command::ToggleLoop)
    }

    /// Sets the volume. Values outside 0..=100 are rejected without a call.
    pub fn set_volume(&mut self, volume: f64) -> Result<Response> {
        if !(0.0..=100.0).contains(&volume) {
            return Err(ClientError::InvalidArgument(format!(
                "Volume must be between 0 and 100, got {}",
                volume
            )));
        }
        self.send_with(Command::SetVolume, json!({ "volume": volume }))
    }

    /// Loads `files` into the playlist. With no files the player opens its
    /// own file picker.
    pub fn load_playlist(&mut self, files: Option<Vec<String>>) -> Result<Response> {
        match files {
            Some(files) if !files.is_empty() => {
                self.send_with(Command::LoadPlaylist, json!({ "files": files }))
            }
            _ => self.send(Command::LoadPlaylist),
        }
    }

    pub fn download(&mut self, url: &str) -> Result<Response> {
        self.send_with(Command::Download, json!({ "url": url }))
    }

    pub fn get_status(&mut self) -> Result<Response> {
        self.send(Command::GetStatus)
    }

    pub fn get_playlist(&mut self) -> Result<Response> {
        self.send(Command::GetPlaylist)
    }

    pub fn set_position(&mut self, position: impl Into<Position>) -> Result<Response> {
        let position = position.into();
        self.send_with(Command::SetPosition, json!({ "position": position }))
    }

    /// Runs the player's file converter. `mode` is forwarded unchecked; see
    /// [`ConversionMode`] for the labels the player accepts.
    pub fn convert_files(&mut self, files: &[String], mode: &str) -> Result<Response> {
        self.send_with(
            Command::ConvertFiles,
            json!({ "files": files, "mode": mode }),
        )
    }

    // Composite operations

    /// Downloads `url` and starts playback if nothing is playing yet.
    ///
    /// Returns the `play` reply when playback was started, otherwise the
    /// download reply. The wait between the two is a fixed poll interval,
    /// not a wait for the download to finish.
    pub fn play_url(&mut self, url: &str) -> Result<Response> {
        let result = self.download(url)?;
        if result.is_success() {
            thread::sleep(self.config.poll_interval());
            let status = self.get_status()?;
            if status.is_success() && !is_playing(&status) {
                log::debug!("Player idle after download of {}, starting playback", url);
                return self.play();
            }
        }
        Ok(result)
    }

    /// Same as [`PlayerClient::download`]; the player appends downloads to
    /// the playlist.
    pub fn add_to_queue(&mut self, url: &str) -> Result<Response> {
        self.download(url)
    }

    /// The `data` of a successful status reply, `None` otherwise.
    pub fn get_current_track_info(&mut self) -> Result<Option<Value>> {
        let status = self.get_status()?;
        if status.is_success() {
            Ok(status.into_data().filter(|data| !data.is_null()))
        } else {
            Ok(None)
        }
    }

    /// Like [`PlayerClient::get_current_track_info`], decoded into a
    /// [`PlayerStatus`].
    pub fn current_status(&mut self) -> Result<Option<PlayerStatus>> {
        match self.get_current_track_info()? {
            Some(data) => serde_json::from_value(data).map(Some).map_err(|e| {
                ClientError::CommunicationFailure {
                    host: self.config.host.clone(),
                    port: self.config.port,
                    source: CommunicationError::Json(e),
                }
            }),
            None => Ok(None),
        }
    }

    /// Polls the status up to `timeout_units` times, sleeping one poll
    /// interval after each successful poll.
    ///
    /// Returns `false` when every poll reported success and `true` as soon
    /// as one did not. The player has no download-progress field, so a
    /// non-success status is taken to mean the download is done.
    pub fn wait_for_download(&mut self, timeout_units: u32) -> Result<bool> {
        let interval = self.config.poll_interval();
        for _ in 0..timeout_units {
            if !self.get_status()?.is_success() {
                return Ok(true);
            }
            thread::sleep(interval);
        }
        Ok(false)
    }
}

// Missing, null, false, zero and empty values all count as "not playing".
fn is_playing(status: &Response) -> bool {
    match status.data().and_then(|data| data.get("is_playing")) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(false, |n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(value: Value) -> Response {
        match value {
            Value::Object(map) => Response::from(map),
            _ => panic!("test responses must be objects"),
        }
    }

    #[test]
    fn new_client_is_not_connected() {
        let client = PlayerClient::default();
        assert!(!client.is_connected());
        assert_eq!(client.config().port, 65432);
    }

    #[test]
    fn out_of_range_volume_is_rejected_locally() {
        let mut client = PlayerClient::default();
        for volume in [-1.0, 100.5, f64::NAN, f64::INFINITY] {
            let err = client.set_volume(volume).unwrap_err();
            assert!(err.is_invalid_argument(), "{}", err);
        }
        assert!(!client.is_connected());
    }

    #[test]
    fn is_playing_follows_truthiness() {
        assert!(is_playing(&response(json!({"data": {"is_playing": true}}))));
        assert!(is_playing(&response(json!({"data": {"is_playing": 1}}))));
        assert!(!is_playing(&response(json!({"data": {"is_playing": false}}))));
        assert!(!is_playing(&response(json!({"data": {"is_playing": null}}))));
        assert!(!is_playing(&response(json!({"data": {}}))));
        assert!(!is_playing(&response(json!({"status": "success"}))));
    }
}
