use reqwest::Method;
use tracing::debug;

use crate::{
    error::Result,
    spotify::client::{SpotifyClient, parse},
    types::{AddTrackToPlaylistRequest, CreatePlaylistRequest, Playlist},
};

pub(crate) const PLAYLIST_DESCRIPTION: &str = "Created by Playlist Converter";
/// Most uris `POST /playlists/{id}/tracks` accepts per call.
pub(crate) const ADD_TRACKS_LIMIT: usize = 100;

impl SpotifyClient {
    /// Creates a private playlist for the configured user.
    pub async fn create_playlist(&self, name: &str) -> Result<Playlist> {
        let request = CreatePlaylistRequest {
            name: name.to_string(),
            description: PLAYLIST_DESCRIPTION.to_string(),
            public: false,
        };

        let path = format!("/users/{}/playlists", self.user_id());
        let response = self
            .send_request(
                Method::POST,
                &path,
                &[],
                Some(serde_json::to_value(&request)?),
            )
            .await?;

        let playlist: Playlist = parse(response)?;
        debug!(id = %playlist.id, name = %playlist.name, "playlist created");
        Ok(playlist)
    }

    /// Appends tracks to a playlist, in batches Spotify accepts.
    pub async fn add_to_playlist(&self, playlist_id: &str, track_uris: &[String]) -> Result<()> {
        let path = format!("/playlists/{playlist_id}/tracks");
        for chunk in track_uris.chunks(ADD_TRACKS_LIMIT) {
            let request = AddTrackToPlaylistRequest {
                uris: chunk.to_vec(),
            };
            self.send_request(
                Method::POST,
                &path,
                &[],
                Some(serde_json::to_value(&request)?),
            )
            .await?;
        }
        Ok(())
    }
}
