use crate::{config::Settings, error::Result, success, utils, warning};

use super::connect;

pub async fn resolve(settings: Settings, title: &str, artist: &str) -> Result<()> {
    let client = connect(settings).await?;

    match client.resolve(title, artist).await? {
        Some(id) => success!("{} - {} -> {}", title, artist, utils::track_uri(&id)),
        None => warning!("No track found for {} - {}", title, artist),
    }
    Ok(())
}
