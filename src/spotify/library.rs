use indicatif::ProgressBar;
use reqwest::Method;
use tracing::{debug, warn};

use crate::{
    error::Result,
    spotify::client::{SpotifyClient, parse},
    types::{ClearReport, SavedTracksPage, TrackIdsRequest},
};

/// Most ids the liked-songs endpoints accept per call, and the page size
/// used when listing them.
pub(crate) const LIBRARY_LIMIT: usize = 50;

impl SpotifyClient {
    /// Saves tracks to the user's liked songs.
    pub async fn add_to_liked(&self, track_ids: &[String]) -> Result<()> {
        self.modify_liked(Method::PUT, track_ids).await
    }

    /// Removes tracks from the user's liked songs.
    pub async fn remove_liked(&self, track_ids: &[String]) -> Result<()> {
        self.modify_liked(Method::DELETE, track_ids).await
    }

    /// Ids of the first `limit` liked songs (most recently added first).
    ///
    /// Items without a track id, such as local files, are left out.
    pub async fn liked_tracks(&self, limit: usize) -> Result<Vec<String>> {
        let page = self.liked_page(limit).await?;
        Ok(page.items.into_iter().filter_map(|i| i.track.id).collect())
    }

    /// Empties the liked songs library one page at a time.
    ///
    /// Always fetches the first page and deletes it, until a page comes back
    /// empty. Stops early when the first page only holds items without a
    /// track id, since those cannot be removed through the API, or when a
    /// page repeats after its removal.
    pub async fn clear_liked(&self, progress: &ProgressBar) -> Result<ClearReport> {
        let mut report = ClearReport::default();
        let mut previous: Vec<String> = Vec::new();

        loop {
            let page = self.liked_page(LIBRARY_LIMIT).await?;
            if page.items.is_empty() {
                break;
            }

            let listed = page.items.len();
            let ids: Vec<String> = page.items.into_iter().filter_map(|i| i.track.id).collect();
            if ids.is_empty() {
                warn!(count = listed, "liked items without a track id cannot be removed");
                report.undeletable = listed;
                break;
            }
            if ids == previous {
                warn!("liked songs did not change after removal, stopping");
                break;
            }

            self.remove_liked(&ids).await?;
            report.removed += ids.len();
            debug!(batch = ids.len(), total = report.removed, "removed liked tracks");
            progress.set_message(format!(
                "Removed {} tracks... (Total: {})",
                ids.len(),
                report.removed
            ));
            progress.inc(ids.len() as u64);
            previous = ids;
        }

        if report.removed == 0 && report.undeletable == 0 {
            warn!("liked songs library was already empty");
        }
        Ok(report)
    }

    async fn liked_page(&self, limit: usize) -> Result<SavedTracksPage> {
        let response = self
            .send_request(
                Method::GET,
                "/me/tracks",
                &[("limit", limit.min(LIBRARY_LIMIT).to_string())],
                None,
            )
            .await?;
        parse(response)
    }

    async fn modify_liked(&self, method: Method, track_ids: &[String]) -> Result<()> {
        for chunk in track_ids.chunks(LIBRARY_LIMIT) {
            let request = TrackIdsRequest {
                ids: chunk.to_vec(),
            };
            self.send_request(
                method.clone(),
                "/me/tracks",
                &[],
                Some(serde_json::to_value(&request)?),
            )
            .await?;
        }
        Ok(())
    }
}
