//! # API Module
//!
//! HTTP endpoints served by the short-lived local server that receives the
//! Spotify OAuth redirect.
//!
//! - [`callback`] - Captures the authorization code from the redirect,
//!   checks the anti-forgery `state` and hands the result to the waiting
//!   authenticator through a [`CallbackSlot`].
//! - [`health`] - Reports that the listener is up, with the crate version.
//!
//! Both are plain async functions wired into an Axum router by
//! [`crate::server`].

mod callback;
mod health;

pub use callback::{CallbackSlot, callback};
pub use health::health;
