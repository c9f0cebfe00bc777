// core/src/utils/config.rs
use crate::rpc::framing::Framing;
use crate::utils::{DEFAULT_HOST, DEFAULT_PORT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};
use thiserror::Error;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "default.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found at {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Connection and logging settings for the client.
///
/// Keys are kebab-case in the JSON file and every key is optional:
///
/// ```json
/// { "host": "localhost", "port": 65432, "timeout-ms": 5000, "framing": "length-prefixed" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Applied to connecting and to every read and write.
    pub timeout_ms: u64,
    pub framing: Framing,
    /// One "time unit" for `play_url` and `wait_for_download`.
    pub poll_interval_ms: u64,
    pub log_level: String,
    pub log_path: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout_ms: 5_000,
            framing: Framing::default(),
            poll_interval_ms: 1_000,
            log_level: "info".to_string(),
            log_path: None,
        }
    }
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        ClientConfig {
            host: host.into(),
            port,
            timeout_ms: whole_millis(timeout),
            ..ClientConfig::default()
        }
    }

    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = whole_millis(interval);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must not be 0".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "timeout-ms must be greater than 0".to_string(),
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "poll-interval-ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ClientConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the explicitly requested file, else `default.json` from the
    /// working directory if present, else the built-in defaults.
    pub fn load(config_override: Option<&str>) -> Result<Self, ConfigError> {
        match config_override {
            Some(path) => Self::from_file(Path::new(path)),
            None => {
                let current_dir = env::current_dir().map_err(|source| ConfigError::Read {
                    path: PathBuf::from("."),
                    source,
                })?;
                Self::load_from_dir(&current_dir)
            }
        }
    }

    fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.exists() {
            log::debug!("Using config file {}", candidate.display());
            Self::from_file(&candidate)
        } else {
            Ok(ClientConfig::default())
        }
    }
}

// Rounds sub-millisecond durations up so they never collapse to 0.
fn whole_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX).max(1)
}
