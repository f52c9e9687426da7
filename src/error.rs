//! Error types shared by the authenticator, the API client and the CLI.

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while talking to Spotify.
#[derive(Error, Debug)]
pub enum Error {
    /// Authorization code missing, state mismatch, callback timeout or a
    /// non-200 answer from the token endpoint.
    #[error("Authorization failed: {0}")]
    Auth(String),

    /// The liveness probe after authentication answered 401.
    #[error("Invalid or expired access token. Please authorize again.")]
    TokenValidity,

    /// Any non-2xx answer from a domain call.
    #[error("Spotify API error ({status}): {body}")]
    Api { status: StatusCode, body: String },

    /// DNS, connect, TLS or timeout failures.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A request was issued before the client finished authenticating, or
    /// after authentication failed.
    #[error("Client is not authenticated")]
    NotAuthenticated,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status carried by an [`Error::Api`], if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for everything in this crate.
pub type Result<T> = std::result::Result<T, Error>;
