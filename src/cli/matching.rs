use std::path::{Path, PathBuf};

use crate::{
    catalog::{self, MatchSummary},
    config::{self, SpotifySettings},
    error, info,
    management::TokenManager,
    report,
    spotify::SpotifyCatalog,
    success,
};

use super::{print_summary, summary_row};

/// Matches a processed list written by an earlier scan.
pub async fn match_list(from: PathBuf, playlist: Option<String>, notfound_file: PathBuf) {
    let playlist_id = match config::resolve_playlist_id(playlist, &config::lookup_env) {
        Ok(id) => id,
        Err(e) => error!("{}", e),
    };
    let settings = match SpotifySettings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("{}", e),
    };

    let songs = match report::read_song_list(&from).await {
        Ok(songs) => songs,
        Err(e) => error!("Cannot read song list {}. Err: {}", from.display(), e),
    };

    let mut catalog = connect(settings).await;
    let summary = run_match(&mut catalog, &playlist_id, &songs, &notfound_file).await;

    print_summary(vec![
        summary_row("added", summary.added, None),
        summary_row(
            "not found",
            summary.not_found.len(),
            Some(notfound_file.as_path()),
        ),
    ]);
}

/// Loads the cached token. Exits when no token was stored yet.
pub(crate) async fn connect(settings: SpotifySettings) -> SpotifyCatalog {
    let api_url = settings.api_url.clone();
    let tokens = match TokenManager::load(settings).await {
        Ok(tokens) => tokens,
        Err(e) => error!(
            "Failed to load token. Please run tunesweep auth\n Error: {}",
            e
        ),
    };
    SpotifyCatalog::new(api_url, tokens)
}

/// Runs the catalog matcher and writes the not-found list. A failed catalog
/// call ends the process; additions made before it stay in the playlist.
pub(crate) async fn run_match(
    catalog: &mut SpotifyCatalog,
    playlist_id: &str,
    songs: &[String],
    notfound_file: &Path,
) -> MatchSummary {
    info!(
        "Searching {} songs and adding matches to playlist {}",
        songs.len(),
        playlist_id
    );

    let summary = match catalog::match_songs(catalog, playlist_id, songs).await {
        Ok(summary) => summary,
        Err(e) => error!(
            "Matching stopped at '{}' after {} of {} songs. Err: {}",
            e.failed_song,
            e.completed.added + e.completed.not_found.len(),
            songs.len(),
            e.source
        ),
    };

    info!("Not found: {:?}", summary.not_found);

    if let Err(e) = report::write_song_list(notfound_file, &summary.not_found).await {
        error!(
            "Failed to write not found songs to {}. Err: {}",
            notfound_file.display(),
            e
        );
    }

    success!(
        "{} tracks added, {} songs written to {}",
        summary.added,
        summary.not_found.len(),
        notfound_file.display()
    );

    summary
}
