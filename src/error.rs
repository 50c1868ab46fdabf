//! Error handling and custom error types
//!
//! Every failure of an image request maps onto one of four kinds, so callers
//! can decide for themselves whether to retry, degrade, or give up.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Image API error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Malformed image API response: {0}")]
    MalformedResponse(String),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl Error {
    /// Short, stable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Configuration(_) => "configuration",
            Error::Upstream { .. } => "upstream",
            Error::MalformedResponse(_) => "malformed_response",
            Error::Transport(_) => "transport",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
