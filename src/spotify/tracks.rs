use reqwest::Method;
use tracing::debug;

use crate::{
    error::Result,
    spotify::client::{SpotifyClient, parse},
    types::{SearchResponse, TrackCandidate},
};

/// Number of candidates requested per search.
pub(crate) const SEARCH_LIMIT: usize = 10;
/// Most ids `GET /me/tracks/contains` accepts per call.
pub(crate) const CONTAINS_LIMIT: usize = 50;

impl SpotifyClient {
    /// Searches tracks for `"<title> <artist>"`, up to `SEARCH_LIMIT`
    /// results in Spotify's order.
    pub async fn search(&self, title: &str, artist: &str) -> Result<Vec<TrackCandidate>> {
        let query = format!("{title} {artist}");
        let response = self
            .send_request(
                Method::GET,
                "/search",
                &[
                    ("q", query.clone()),
                    ("type", "track".to_string()),
                    ("limit", SEARCH_LIMIT.to_string()),
                ],
                None,
            )
            .await?;

        let response: SearchResponse = parse(response)?;
        let candidates: Vec<TrackCandidate> = response.tracks.items.into_iter().flatten().collect();
        debug!(count = candidates.len(), %query, "search finished");
        Ok(candidates)
    }

    /// Saved flags for the first `CONTAINS_LIMIT` ids, in input order.
    pub async fn saved_flags(&self, track_ids: &[String]) -> Result<Vec<bool>> {
        let track_ids = &track_ids[..track_ids.len().min(CONTAINS_LIMIT)];
        if track_ids.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .send_request(
                Method::GET,
                "/me/tracks/contains",
                &[("ids", track_ids.join(","))],
                None,
            )
            .await?;
        parse(response)
    }

    /// First id (of at most the first 50) already in the user's library.
    pub async fn is_saved(&self, track_ids: &[String]) -> Result<Option<String>> {
        let flags = self.saved_flags(track_ids).await?;
        Ok(first_saved(track_ids, &flags))
    }

    /// Turns a (title, artist) pair into at most one track id.
    ///
    /// Candidates whose name equals the title (ignoring case) are preferred
    /// over the rest. Within the preferred tier a track already saved in the
    /// library wins, otherwise the first one does. No saved-status lookup
    /// happens when the search comes back empty.
    pub async fn resolve(&self, title: &str, artist: &str) -> Result<Option<String>> {
        let candidates = self.search(title, artist).await?;
        let (exact, other) = partition_exact(title, candidates);

        for c in &exact {
            debug!(name = %c.name, artists = %c.artist_names(), "exact match");
        }
        for c in &other {
            debug!(name = %c.name, artists = %c.artist_names(), "other match");
        }

        if exact.is_empty() && other.is_empty() {
            debug!(%title, %artist, "no matches found");
            return Ok(None);
        }

        let exact_count = exact.len();
        let ids: Vec<String> = exact.into_iter().chain(other).map(|c| c.id).collect();
        let flags = self.saved_flags(&ids).await?;

        Ok(pick(&ids, exact_count, &flags))
    }
}

/// Splits candidates into exact title matches and the rest, keeping order.
pub(crate) fn partition_exact(
    title: &str,
    candidates: Vec<TrackCandidate>,
) -> (Vec<TrackCandidate>, Vec<TrackCandidate>) {
    let wanted = title.to_lowercase();
    candidates
        .into_iter()
        .partition(|c| c.name.to_lowercase() == wanted)
}

pub(crate) fn first_saved(track_ids: &[String], flags: &[bool]) -> Option<String> {
    track_ids
        .iter()
        .zip(flags)
        .find(|(_, saved)| **saved)
        .map(|(id, _)| id.clone())
}

/// Chooses from `ids` (exact matches first, `exact_count` of them).
///
/// Only the exact tier is considered when it is non-empty; inside the tier
/// the first saved id wins, else the first id.
pub(crate) fn pick(ids: &[String], exact_count: usize, flags: &[bool]) -> Option<String> {
    let tier = if exact_count > 0 {
        &ids[..exact_count]
    } else {
        ids
    };
    let tier_flags = &flags[..flags.len().min(tier.len())];

    first_saved(tier, tier_flags).or_else(|| tier.first().cloned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, name: &str) -> TrackCandidate {
        TrackCandidate {
            id: id.into(),
            name: name.into(),
            artists: Vec::new(),
            uri: format!("spotify:track:{id}"),
        }
    }

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn partition_is_case_insensitive_and_stable() {
        let (exact, other) = partition_exact(
            "Imagine",
            vec![
                candidate("1", "Imagine (Remastered)"),
                candidate("2", "IMAGINE"),
                candidate("3", "Imagine Dragons"),
                candidate("4", "imagine"),
            ],
        );

        let exact: Vec<_> = exact.iter().map(|c| c.id.as_str()).collect();
        let other: Vec<_> = other.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(exact, vec!["2", "4"]);
        assert_eq!(other, vec!["1", "3"]);
    }

    #[test]
    fn first_saved_follows_input_order() {
        let tracks = ids(&["a", "b", "c"]);
        assert_eq!(first_saved(&tracks, &[false, true, true]), Some("b".into()));
        assert_eq!(first_saved(&tracks, &[false, false, false]), None);
    }

    #[test]
    fn pick_prefers_exact_tier_over_saved_other() {
        // exact "x" unsaved, other "y" saved
        let tracks = ids(&["x", "y"]);
        assert_eq!(pick(&tracks, 1, &[false, true]), Some("x".into()));
    }

    #[test]
    fn pick_prefers_saved_within_exact_tier() {
        let tracks = ids(&["x1", "x2", "y"]);
        assert_eq!(pick(&tracks, 2, &[false, true, true]), Some("x2".into()));
    }

    #[test]
    fn pick_uses_saved_other_when_no_exact() {
        let tracks = ids(&["y1", "y2"]);
        assert_eq!(pick(&tracks, 0, &[false, true]), Some("y2".into()));
        assert_eq!(pick(&tracks, 0, &[false, false]), Some("y1".into()));
    }

    #[test]
    fn pick_handles_empty_input() {
        assert_eq!(pick(&[], 0, &[]), None);
    }
}
