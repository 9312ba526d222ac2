pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod rank;
pub mod search;
pub mod tui;

pub use error::{PulseError, Result};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
