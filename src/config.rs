//! Configuration management for the Playlist Converter.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, endpoint URLs, the local
//! callback server and timeouts.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory, or the file passed on the command line
//! 3. Application defaults (where applicable)

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use crate::{
    error::{Error, Result},
    types::Credentials,
};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8888/callback";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_CALLBACK_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Returns the platform-specific path of the default `.env` file.
///
/// - Linux: `~/.local/share/playlist-converter/.env`
/// - macOS: `~/Library/Application Support/playlist-converter/.env`
/// - Windows: `%LOCALAPPDATA%/playlist-converter/.env`
pub fn default_env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("playlist-converter/.env");
    path
}

/// Loads environment variables from a `.env` file.
///
/// When `path` is given the file must exist and parse. Otherwise the default
/// file in the local data directory is used; its directory is created if
/// needed and a missing file is not an error, since every key can also come
/// from the process environment. Variables already present in the
/// environment are never overwritten.
///
/// # Errors
///
/// Returns [`Error::Config`] if the directory cannot be created or an
/// explicitly requested file cannot be read or parsed.
pub async fn load_env(path: Option<PathBuf>) -> Result<()> {
    if let Some(path) = path {
        return dotenv::from_path(&path)
            .map_err(|e| Error::Config(format!("cannot load {}: {}", path.display(), e)));
    }

    let path = default_env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::Config(e.to_string()))?;
    }

    if path.is_file() {
        dotenv::from_path(&path)
            .map_err(|e| Error::Config(format!("cannot load {}: {}", path.display(), e)))?;
    }
    Ok(())
}

/// Base URLs of the three Spotify services the client talks to.
///
/// Injectable so tests can point the client at a fake server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Web API base, e.g. `https://api.spotify.com/v1`.
    pub api_url: String,
    /// Browser-facing authorization endpoint.
    pub auth_url: String,
    /// Server-to-server token endpoint.
    pub token_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Uses the same base for all three endpoints. Handy for fake servers.
    pub fn local(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            api_url: format!("{base}/v1"),
            auth_url: format!("{base}/authorize"),
            token_url: format!("{base}/api/token"),
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
    /// Redirect URI registered with the Spotify application.
    pub redirect_uri: String,
    /// Address the local callback server binds to.
    pub server_addr: SocketAddr,
    /// Upper bound on the wait for the browser redirect.
    pub callback_timeout: Duration,
    /// Per-request timeout for every HTTP call.
    pub http_timeout: Duration,
}

impl Settings {
    /// Settings with default redirect, server address and timeouts.
    pub fn new(credentials: Credentials, endpoints: Endpoints) -> Self {
        Self {
            credentials,
            endpoints,
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            server_addr: SocketAddr::from(([127, 0, 0, 1], 8888)),
            callback_timeout: Duration::from_secs(DEFAULT_CALLBACK_TIMEOUT_SECS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    /// Reads the settings from the process environment.
    ///
    /// Call [`load_env`] first to merge the `.env` file into the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a required key is missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self> {
        let credentials = Credentials {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            user_id: required("SPOTIFY_USER_ID")?,
        };

        let endpoints = Endpoints {
            api_url: optional("SPOTIFY_API_URL", DEFAULT_API_URL),
            auth_url: optional("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
        };

        let server_addr = parse("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)?;
        let callback_timeout: u64 = parse(
            "CALLBACK_TIMEOUT_SECS",
            &DEFAULT_CALLBACK_TIMEOUT_SECS.to_string(),
        )?;
        let http_timeout: u64 =
            parse("HTTP_TIMEOUT_SECS", &DEFAULT_HTTP_TIMEOUT_SECS.to_string())?;

        Ok(Self {
            credentials,
            endpoints,
            redirect_uri: optional("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            server_addr,
            callback_timeout: Duration::from_secs(callback_timeout),
            http_timeout: Duration::from_secs(http_timeout),
        })
    }
}

fn required(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!("{key} must be set"))),
    }
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = optional(key, default);
    raw.trim()
        .parse()
        .map_err(|e| Error::Config(format!("{key}={raw:?} is invalid: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_endpoints_share_one_base() {
        let endpoints = Endpoints::local("http://127.0.0.1:4000/");
        assert_eq!(endpoints.api_url, "http://127.0.0.1:4000/v1");
        assert_eq!(endpoints.auth_url, "http://127.0.0.1:4000/authorize");
        assert_eq!(endpoints.token_url, "http://127.0.0.1:4000/api/token");
    }

    #[test]
    fn parse_rejects_garbage() {
        let result: Result<SocketAddr> = parse("PLCONV_TEST_UNSET_ADDRESS", "not-an-address");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn parse_falls_back_to_default() {
        let value: u64 = parse("PLCONV_TEST_UNSET_TIMEOUT", "120").unwrap();
        assert_eq!(value, 120);
    }

    #[test]
    fn settings_new_uses_defaults() {
        let settings = Settings::new(
            Credentials {
                client_id: "id".into(),
                client_secret: "secret".into(),
                user_id: "user".into(),
            },
            Endpoints::default(),
        );
        assert_eq!(settings.redirect_uri, DEFAULT_REDIRECT_URI);
        assert_eq!(settings.server_addr.port(), 8888);
        assert_eq!(settings.callback_timeout, Duration::from_secs(120));
    }
}
