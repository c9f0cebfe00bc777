// core/src/error.rs
use thiserror::Error;

/// Failures surfaced by [`crate::PlayerClient`] operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Rejected locally, nothing was sent to the player.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The connection could not be established or an I/O operation timed out.
    #[error(
        "Could not connect to Music Player at {host}:{port}. Make sure the application is running. ({source})"
    )]
    ConnectionFailure {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },

    /// Anything else that went wrong while exchanging the request and reply.
    #[error("Error communicating with Music Player at {host}:{port}: {source}")]
    CommunicationFailure {
        host: String,
        port: u16,
        #[source]
        source: CommunicationError,
    },
}

impl ClientError {
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, ClientError::ConnectionFailure { .. })
    }

    pub fn is_communication_failure(&self) -> bool {
        matches!(self, ClientError::CommunicationFailure { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ClientError::InvalidArgument(_))
    }
}

/// Cause of a [`ClientError::CommunicationFailure`].
#[derive(Error, Debug)]
pub enum CommunicationError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Received excessively large reply length: {0}")]
    FrameTooLarge(u32),

    #[error("Request of {0} bytes does not fit in a length prefix")]
    RequestTooLarge(usize),

    #[error("Reply is not a mapping")]
    NotAMapping,
}

pub type Result<T> = std::result::Result<T, ClientError>;
