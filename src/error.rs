use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    /// The request never produced a response (DNS, refused connection,
    /// platform-level timeout, or an unparseable success body).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status. The body text is
    /// kept verbatim so the user sees what the backend said.
    #[error("Backend error: {status} {body}")]
    Backend { status: u16, body: String },

    /// A one-shot run ended in the failed phase; carries the message the
    /// UI would have shown.
    #[error("{0}")]
    SearchFailed(String),
}

impl From<reqwest::Error> for PulseError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if message.trim().is_empty() {
            Self::Transport("something went wrong".to_string())
        } else {
            Self::Transport(message)
        }
    }
}

pub type Result<T> = std::result::Result<T, PulseError>;
