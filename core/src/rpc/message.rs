// core/src/rpc/message.rs
use crate::error::CommunicationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Command parameters, keyed by name.
pub type Params = serde_json::Map<String, Value>;

/// Value of the `status` field in a successful reply.
pub const STATUS_SUCCESS: &str = "success";

/// Request envelope sent to the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub command: String,
    #[serde(default)]
    pub params: Params,
}

impl Request {
    pub fn new(command: impl Into<String>, params: Params) -> Self {
        Request {
            command: command.into(),
            params,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Reply envelope returned by the player.
///
/// By convention the player includes a `status` field and, depending on the
/// command, a `data` or `message` field. None of them is enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Response(Params);

impl Response {
    /// Decodes a reply payload. Anything but a JSON object is rejected.
    pub fn decode(bytes: &[u8]) -> Result<Self, CommunicationError> {
        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(map) => Ok(Response(map)),
            _ => Err(CommunicationError::NotAMapping),
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    pub fn is_success(&self) -> bool {
        self.status() == Some(STATUS_SUCCESS)
    }

    pub fn data(&self) -> Option<&Value> {
        self.0.get("data")
    }

    pub fn into_data(mut self) -> Option<Value> {
        self.0.remove("data")
    }

    /// Error or informational text, if the player sent any.
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Params {
        &self.0
    }

    pub fn into_inner(self) -> Params {
        self.0
    }
}

impl From<Params> for Response {
    fn from(map: Params) -> Self {
        Response(map)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.0.clone()))
    }
}

/// Commands the player understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Play,
    Pause,
    Stop,
    Next,
    Prev,
    SetVolume,
    LoadPlaylist,
    Download,
    GetStatus,
    GetPlaylist,
    SetPosition,
    ToggleLoop,
    ConvertFiles,
}

impl Command {
    pub const ALL: [Command; 13] = [
        Command::Play,
        Command::Pause,
        Command::Stop,
        Command::Next,
        Command::Prev,
        Command::SetVolume,
        Command::LoadPlaylist,
        Command::Download,
        Command::GetStatus,
        Command::GetPlaylist,
        Command::SetPosition,
        Command::ToggleLoop,
        Command::ConvertFiles,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Command::Play => "play",
            Command::Pause => "pause",
            Command::Stop => "stop",
            Command::Next => "next",
            Command::Prev => "prev",
            Command::SetVolume => "set_volume",
            Command::LoadPlaylist => "load_playlist",
            Command::Download => "download",
            Command::GetStatus => "get_status",
            Command::GetPlaylist => "get_playlist",
            Command::SetPosition => "set_position",
            Command::ToggleLoop => "toggle_loop",
            Command::ConvertFiles => "convert_files",
        }
    }

    pub fn from_name(name: &str) -> Option<Command> {
        Command::ALL.iter().copied().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_command_and_params() {
        let mut params = Params::new();
        params.insert("volume".to_string(), json!(42));
        let request = Request::new("set_volume", params);

        let value: Value = serde_json::from_slice(&request.encode().unwrap()).unwrap();
        assert_eq!(value, json!({"command": "set_volume", "params": {"volume": 42}}));
    }

    #[test]
    fn request_without_params_decodes_to_empty_map() {
        let request: Request = serde_json::from_str(r#"{"command": "play"}"#).unwrap();
        assert_eq!(request.command, "play");
        assert!(request.params.is_empty());
    }

    #[test]
    fn response_accessors() {
        let response =
            Response::decode(br#"{"status": "success", "data": {"is_playing": true}}"#).unwrap();
        assert_eq!(response.status(), Some("success"));
        assert!(response.is_success());
        assert_eq!(response.data(), Some(&json!({"is_playing": true})));
        assert_eq!(response.message(), None);
        assert_eq!(response.into_data(), Some(json!({"is_playing": true})));
    }

    #[test]
    fn error_response_is_not_success() {
        let response =
            Response::decode(br#"{"status": "error", "message": "Unknown command"}"#).unwrap();
        assert!(!response.is_success());
        assert_eq!(response.message(), Some("Unknown command"));
    }

    #[test]
    fn response_without_status_is_not_success() {
        let response = Response::decode(b"{}").unwrap();
        assert_eq!(response.status(), None);
        assert!(!response.is_success());
    }

    #[test]
    fn non_object_reply_is_rejected() {
        assert!(matches!(
            Response::decode(b"[1, 2, 3]"),
            Err(CommunicationError::NotAMapping)
        ));
        assert!(matches!(
            Response::decode(b"\"success\""),
            Err(CommunicationError::NotAMapping)
        ));
    }

    #[test]
    fn malformed_reply_is_a_json_error() {
        assert!(matches!(
            Response::decode(b"{\"status\": "),
            Err(CommunicationError::Json(_))
        ));
    }

    #[test]
    fn command_names_round_trip() {
        for command in Command::ALL {
            assert_eq!(Command::from_name(command.as_str()), Some(command));
        }
        assert_eq!(Command::Next.to_string(), "next");
        assert_eq!(Command::from_name("rewind"), None);
    }
}
