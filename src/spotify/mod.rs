//! # Spotify Integration Module
//!
//! Client for the parts of the Spotify Web API the converter needs.
//!
//! ## Layout
//!
//! ```text
//! CLI commands
//!      ↓
//! SpotifyClient (client)          session state + authorized request
//!     ├── auth                     authorization-code flow, token exchange
//!     ├── tracks                   search, saved check, resolution
//!     ├── playlist                 create playlist, add tracks
//!     ├── library                  liked songs: add, list, remove, clear
//!     └── build                    bulk build from a track list
//!      ↓
//! reqwest → Spotify Web API
//! ```
//!
//! ## Authentication
//!
//! [`auth::authorize`] opens the consent page in the browser, captures the
//! redirect on a local one-shot server ([`crate::server`]) and exchanges the
//! code for an access token with the client secret. The token is used for
//! the lifetime of one [`SpotifyClient`] and never refreshed or stored.
//!
//! ## API Coverage
//!
//! - `GET /me` - token liveness probe
//! - `GET /search` - track search
//! - `GET /me/tracks/contains` - saved status of up to 50 tracks
//! - `POST /users/{user_id}/playlists` - create a private playlist
//! - `POST /playlists/{playlist_id}/tracks` - add tracks to a playlist
//! - `GET|PUT|DELETE /me/tracks` - list, save and remove liked songs
//!
//! ## Errors
//!
//! Every request goes through one primitive that maps non-2xx answers to
//! [`crate::Error::Api`] and network failures to
//! [`crate::Error::Transport`]. Requests are sent one at a time, without
//! retries or backoff.

pub mod auth;
mod build;
mod client;
mod library;
mod playlist;
mod tracks;

pub use client::{ClientState, Session, SpotifyClient};
