use indicatif::ProgressBar;
use tracing::{debug, warn};

use crate::{
    error::Result,
    spotify::client::SpotifyClient,
    types::{BuildReport, Destination, TrackOutcome, TrackQuery},
    utils,
};

enum Target<'a> {
    Playlist(&'a str),
    LikedSongs,
}

impl SpotifyClient {
    /// Resolves every query and adds the matches to `destination`.
    ///
    /// Queries are processed last to first, one add call per resolved
    /// track, so a collection listed newest-first reads in input order.
    ///
    /// Only creating the playlist can fail the whole build. A failure while
    /// resolving or adding one query, an expired token included, is recorded
    /// in the report and the next query is processed.
    pub async fn build_from_queries(
        &self,
        queries: &[TrackQuery],
        destination: &Destination,
        progress: &ProgressBar,
    ) -> Result<BuildReport> {
        let mut report = BuildReport::default();

        if let Destination::Playlist(name) = destination {
            report.playlist = Some(self.create_playlist(name).await?);
        }

        let target = match &report.playlist {
            Some(playlist) => Target::Playlist(&playlist.id),
            None => Target::LikedSongs,
        };

        progress.set_length(queries.len() as u64);
        for query in queries.iter().rev() {
            progress.set_message(query.to_string());

            let outcome = match self.add_one(query, &target).await {
                Ok(Some(id)) => TrackOutcome::Added(id),
                Ok(None) => {
                    debug!(%query, "not found");
                    TrackOutcome::NotFound
                }
                Err(e) => {
                    warn!(%query, error = %e, "failed to process track");
                    TrackOutcome::Failed(e.to_string())
                }
            };

            report.outcomes.push((query.clone(), outcome));
            progress.inc(1);
        }

        Ok(report)
    }

    async fn add_one(&self, query: &TrackQuery, target: &Target<'_>) -> Result<Option<String>> {
        let Some(track_id) = self.resolve(&query.title, &query.artist).await? else {
            return Ok(None);
        };

        match target {
            Target::Playlist(playlist_id) => {
                self.add_to_playlist(playlist_id, &[utils::track_uri(&track_id)])
                    .await?
            }
            Target::LikedSongs => self.add_to_liked(&[track_id.clone()]).await?,
        }

        Ok(Some(track_id))
    }
}
