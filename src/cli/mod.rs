//! # CLI Module
//!
//! User-facing commands of the Playlist Converter. Each command loads what it
//! needs, asks for confirmation before touching the user's library, connects
//! a [`SpotifyClient`], runs one bulk operation with a progress indicator and
//! prints a summary.
//!
//! - [`build`] - Builds a playlist or fills liked songs from a track list file
//! - [`clear_liked`] - Removes every track from liked songs
//! - [`resolve`] - Shows which track a single title/artist pair resolves to
//!
//! Errors are returned to `main`, which prints them and exits with status 1.

mod build;
mod clear;
mod resolve;

pub use build::build;
pub use clear::clear_liked;
pub use resolve::resolve;

use std::time::Duration;

use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::Settings,
    error::{Error, Result},
    info,
    spotify::SpotifyClient,
    success,
};

/// Builds a client and runs the authorization flow.
async fn connect(settings: Settings) -> Result<SpotifyClient> {
    info!("Connecting to Spotify...");
    let mut client = SpotifyClient::new(settings)?;
    client.authenticate().await?;
    success!("Authorization successful!");
    Ok(client)
}

fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| Error::Io(std::io::Error::other(e)))
}

/// Bar for `len` steps; hidden in verbose mode so log lines stay readable.
fn progress_bar(len: u64, verbose: bool) -> ProgressBar {
    if verbose {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{prefix:.bold} [{bar:40.green/white}] {pos}/{len} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏ "),
    );
    pb.set_prefix("Progress:");
    pb
}

/// Spinner for operations of unknown length.
fn spinner(message: &str, verbose: bool) -> ProgressBar {
    if verbose {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
