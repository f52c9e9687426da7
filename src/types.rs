use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Application credentials plus the account playlists are created for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

/// One line of work: find `title` by `artist`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackQuery {
    pub title: String,
    pub artist: String,
}

impl TrackQuery {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }
}

impl fmt::Display for TrackQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title, self.artist)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

/// A track returned by search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackCandidate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    #[serde(default)]
    pub uri: String,
}

impl TrackCandidate {
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: SearchTracks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTracks {
    // Spotify occasionally returns `null` entries for unavailable tracks.
    #[serde(default)]
    pub items: Vec<Option<TrackCandidate>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

/// Body of `PUT /me/tracks` and `DELETE /me/tracks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackIdsRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTracksPage {
    #[serde(default)]
    pub items: Vec<SavedTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTrack {
    pub track: SavedTrackItem,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTrackItem {
    pub id: Option<String>,
}

/// Where a bulk build puts the tracks it resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// A new private playlist with this name.
    Playlist(String),
    LikedSongs,
}

/// What happened to one query during a bulk build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    Added(String),
    NotFound,
    Failed(String),
}

/// Per-query outcomes of a bulk build, in processing (reverse input) order.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub playlist: Option<Playlist>,
    pub outcomes: Vec<(TrackQuery, TrackOutcome)>,
}

impl BuildReport {
    pub fn added(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, TrackOutcome::Added(_)))
            .count()
    }

    pub fn not_found(&self) -> impl Iterator<Item = &TrackQuery> {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == TrackOutcome::NotFound)
            .map(|(q, _)| q)
    }

    pub fn failed(&self) -> impl Iterator<Item = (&TrackQuery, &str)> {
        self.outcomes.iter().filter_map(|(q, o)| match o {
            TrackOutcome::Failed(reason) => Some((q, reason.as_str())),
            _ => None,
        })
    }
}

/// Result of emptying liked songs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearReport {
    pub removed: usize,
    /// Liked items left behind because they carry no track id.
    pub undeletable: usize,
}

#[derive(Tabled)]
pub struct SkippedTableRow {
    pub title: String,
    pub artist: String,
    pub reason: String,
}
