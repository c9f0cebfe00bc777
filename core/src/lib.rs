//! Client library for remote-controlling the Codem music player.
//!
//! Every call opens its own TCP connection to the player, sends one JSON
//! request envelope, reads one reply envelope and closes the connection.
//! [`player::PlayerClient`] layers the player's commands on top of that.

pub mod error;
pub mod player;
pub mod rpc;
pub mod utils;

pub use error::{ClientError, CommunicationError, Result};
pub use player::PlayerClient;
pub use rpc::message::{Params, Request, Response};
pub use utils::config::ClientConfig;
