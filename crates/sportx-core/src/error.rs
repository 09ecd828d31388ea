//! Error types for the SportX signing SDK.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Caller-supplied order, fill or cancel data failed validation.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Odds conversion input outside its valid range.
    #[error("Range error: {0}")]
    Range(String),

    #[error("Signing error: {message}")]
    Signing { message: String },

    #[error("Chain read error: {message}")]
    Chain { message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] config::ConfigError),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl Error {
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        Error::Schema(message.into())
    }

    pub(crate) fn signing(message: impl std::fmt::Display) -> Self {
        Error::Signing {
            message: message.to_string(),
        }
    }

    pub(crate) fn chain(message: impl Into<String>) -> Self {
        Error::Chain {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
