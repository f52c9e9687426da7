use std::path::Path;

use rand::{Rng, distr::Alphanumeric};

use crate::{error::Result, types::TrackQuery};

/// Length of the anti-forgery `state` sent with the authorization request.
pub const STATE_LENGTH: usize = 32;

pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LENGTH)
        .map(char::from)
        .collect()
}

pub fn track_uri(track_id: &str) -> String {
    format!("spotify:track:{track_id}")
}

/// A line of a track list that could not be turned into a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLine {
    pub number: usize,
    pub content: String,
}

/// Parses a track list: one `title - artist` per line.
///
/// The split happens on the last ` - ` so titles like `Song - Remastered`
/// stay intact. Blank lines and lines starting with `#` are skipped.
pub fn parse_track_list(input: &str) -> (Vec<TrackQuery>, Vec<InvalidLine>) {
    let mut queries = Vec::new();
    let mut invalid = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.rsplit_once(" - ") {
            Some((title, artist)) if !title.trim().is_empty() && !artist.trim().is_empty() => {
                queries.push(TrackQuery::new(title.trim(), artist.trim()));
            }
            _ => invalid.push(InvalidLine {
                number: idx + 1,
                content: line.to_string(),
            }),
        }
    }

    (queries, invalid)
}

pub async fn read_track_list(path: &Path) -> Result<(Vec<TrackQuery>, Vec<InvalidLine>)> {
    let content = async_fs::read_to_string(path).await?;
    Ok(parse_track_list(&content))
}
