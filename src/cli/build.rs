use std::path::Path;

use tabled::Table;

use crate::{
    config::Settings,
    error::Result,
    info, success,
    types::{BuildReport, Destination, SkippedTableRow},
    utils, warning,
};

use super::{confirm, connect, progress_bar};

pub async fn build(
    settings: Settings,
    file: &Path,
    destination: Destination,
    assume_yes: bool,
    verbose: bool,
) -> Result<()> {
    let (queries, invalid) = utils::read_track_list(file).await?;
    for line in &invalid {
        warning!(
            "Skipping line {}: {:?} is not in 'title - artist' form",
            line.number,
            line.content
        );
    }

    if queries.is_empty() {
        warning!("No tracks to process in {}", file.display());
        return Ok(());
    }

    if destination == Destination::LikedSongs
        && !assume_yes
        && !confirm(&format!(
            "Add up to {} tracks to your Liked Songs?",
            queries.len()
        ))?
    {
        info!("Operation cancelled.");
        return Ok(());
    }

    let client = connect(settings).await?;

    match &destination {
        Destination::Playlist(name) => info!("Creating playlist: {}", name),
        Destination::LikedSongs => info!("Searching and adding tracks to Liked Songs..."),
    }

    let pb = progress_bar(queries.len() as u64, verbose);
    let report = client.build_from_queries(&queries, &destination, &pb).await;
    pb.finish_and_clear();

    print_summary(&report?, &destination);
    Ok(())
}

fn print_summary(report: &BuildReport, destination: &Destination) {
    let added = report.added();
    if added == 0 {
        warning!("No tracks were found to add");
    } else {
        match destination {
            Destination::LikedSongs => {
                success!("Successfully added {} tracks to Liked Songs!", added)
            }
            Destination::Playlist(name) => {
                success!("Playlist {} created successfully with {} tracks!", name, added)
            }
        }
    }

    let mut rows: Vec<SkippedTableRow> = report
        .not_found()
        .map(|q| SkippedTableRow {
            title: q.title.clone(),
            artist: q.artist.clone(),
            reason: "not found".to_string(),
        })
        .chain(report.failed().map(|(q, reason)| SkippedTableRow {
            title: q.title.clone(),
            artist: q.artist.clone(),
            reason: reason.to_string(),
        }))
        .collect();

    if !rows.is_empty() {
        rows.sort_by(|a, b| a.title.cmp(&b.title));
        warning!("{} tracks were skipped:", rows.len());
        let table = Table::new(rows);
        println!("{}", table);
    }
}
