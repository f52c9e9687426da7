use crate::{config::Settings, error::Result, info, success, warning};

use super::{confirm, connect, spinner};

pub async fn clear_liked(settings: Settings, assume_yes: bool, verbose: bool) -> Result<()> {
    if !assume_yes && !confirm("This will remove ALL tracks from your Liked Songs. Continue?")? {
        info!("Operation cancelled.");
        return Ok(());
    }

    let client = connect(settings).await?;

    let pb = spinner("Removing liked songs...", verbose);
    let report = client.clear_liked(&pb).await;
    pb.finish_and_clear();

    let report = report?;
    if report.undeletable > 0 {
        warning!(
            "Removed {} tracks, but {} liked items have no track id (local files?) and were left in place",
            report.removed,
            report.undeletable
        );
    } else if report.removed == 0 {
        warning!("Liked Songs is already empty");
    } else {
        success!(
            "All tracks have been removed from Liked Songs! (Total removed: {})",
            report.removed
        );
    }
    Ok(())
}
