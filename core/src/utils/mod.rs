// core/src/utils/mod.rs
pub mod config;
pub mod logging;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 65432;
