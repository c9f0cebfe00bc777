// core/src/player/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Playback position for `set_position`.
///
/// Sent as a JSON number for seconds or as a string such as `"50%"`. The
/// player does the parsing; the client forwards the value as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Position {
    Seconds(f64),
    Percentage(String),
}

impl Position {
    pub fn percent(value: f64) -> Self {
        Position::Percentage(format!("{}%", value))
    }
}

impl From<f64> for Position {
    fn from(seconds: f64) -> Self {
        Position::Seconds(seconds)
    }
}

impl From<u32> for Position {
    fn from(seconds: u32) -> Self {
        Position::Seconds(seconds.into())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.ends_with('%') {
            return Ok(Position::Percentage(s.to_string()));
        }
        s.parse::<f64>()
            .map(Position::Seconds)
            .map_err(|_| format!("'{}' is neither seconds nor a percentage like '50%'", s))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Seconds(seconds) => write!(f, "{}s", seconds),
            Position::Percentage(text) => f.write_str(text),
        }
    }
}

/// Conversion directions offered by the player's file converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionMode {
    #[default]
    PngToJpg,
    JpgToPng,
    PngToIco,
    ImageToWebp,
    WebpToPng,
    PdfToJpgs,
    JpgsToPdf,
}

impl ConversionMode {
    pub const ALL: [ConversionMode; 7] = [
        ConversionMode::PngToJpg,
        ConversionMode::JpgToPng,
        ConversionMode::PngToIco,
        ConversionMode::ImageToWebp,
        ConversionMode::WebpToPng,
        ConversionMode::PdfToJpgs,
        ConversionMode::JpgsToPdf,
    ];

    /// The label the player expects in the `mode` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            ConversionMode::PngToJpg => "PNG to JPG",
            ConversionMode::JpgToPng => "JPG to PNG",
            ConversionMode::PngToIco => "PNG to ICO",
            ConversionMode::ImageToWebp => "Image to WebP",
            ConversionMode::WebpToPng => "WebP to PNG",
            ConversionMode::PdfToJpgs => "PDF to JPGs",
            ConversionMode::JpgsToPdf => "JPGs to PDF",
        }
    }
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConversionMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown conversion mode '{}'", s))
    }
}

/// Typed view of the `data` field of a `get_status` reply.
///
/// Fields the player leaves out are `None`; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub is_playing: Option<bool>,
    pub is_paused: Option<bool>,
    pub current_track: Option<String>,
    pub playlist_index: Option<i64>,
    pub playlist_length: Option<u64>,
    pub volume: Option<f64>,
    /// Seconds.
    pub position: Option<f64>,
    /// Seconds.
    pub duration: Option<f64>,
}

impl PlayerStatus {
    pub fn playing(&self) -> bool {
        self.is_playing.unwrap_or(false)
    }

    /// Position as a percentage of the track duration.
    pub fn progress(&self) -> Option<f64> {
        match (self.position, self.duration) {
            (Some(position), Some(duration)) if duration > 0.0 => {
                Some((position / duration * 100.0).clamp(0.0, 100.0))
            }
            _ => None,
        }
    }
}
