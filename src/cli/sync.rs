use std::path::PathBuf;

use crate::{
    config::{self, SpotifySettings},
    error,
};

use super::{
    matching::{connect, run_match},
    print_summary,
    scan::run_scan,
    summary_row,
};

/// Scan, delete, search and append in one run.
///
/// Every setting and the cached token are checked before the first file is
/// touched, so a misconfigured run never deletes anything.
pub async fn sync(
    dir: Option<PathBuf>,
    playlist: Option<String>,
    processed_file: PathBuf,
    notfound_file: PathBuf,
) {
    let dir = match config::resolve_music_dir(dir, &config::lookup_env) {
        Ok(dir) => dir,
        Err(e) => error!("{}", e),
    };
    let playlist_id = match config::resolve_playlist_id(playlist, &config::lookup_env) {
        Ok(id) => id,
        Err(e) => error!("{}", e),
    };
    let settings = match SpotifySettings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("{}", e),
    };
    let mut catalog = connect(settings).await;

    let scanned = run_scan(&dir, &processed_file).await;
    let matched = run_match(&mut catalog, &playlist_id, &scanned.songs, &notfound_file).await;

    print_summary(vec![
        summary_row(
            "processed",
            scanned.songs.len(),
            Some(processed_file.as_path()),
        ),
        summary_row("added", matched.added, None),
        summary_row(
            "not found",
            matched.not_found.len(),
            Some(notfound_file.as_path()),
        ),
    ]);
}
