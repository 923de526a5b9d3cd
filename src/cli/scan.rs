use std::path::{Path, PathBuf};

use crate::{
    config, error, info, report,
    scanner::{self, ScanSummary},
    success,
    tags::LoftyTags,
    warning,
};

use super::{print_summary, summary_row};

pub async fn scan(dir: Option<PathBuf>, processed_file: PathBuf) {
    let dir = match config::resolve_music_dir(dir, &config::lookup_env) {
        Ok(dir) => dir,
        Err(e) => error!("{}", e),
    };

    let summary = run_scan(&dir, &processed_file).await;
    print_summary(vec![summary_row(
        "processed",
        summary.songs.len(),
        Some(processed_file.as_path()),
    )]);
}

/// Scans `dir`, deleting every file whose tags were captured, and writes the
/// processed list. Exits when the directory cannot be listed or the list
/// cannot be written.
pub(crate) async fn run_scan(dir: &Path, processed_file: &Path) -> ScanSummary {
    info!("Scanning {}", dir.display());

    let summary = match scanner::scan_directory(dir, &LoftyTags) {
        Ok(summary) => summary,
        Err(e) => error!("Cannot read directory {}. Err: {}", dir.display(), e),
    };

    info!("Processed songs: {:?}", summary.songs);

    if let Err(e) = report::write_song_list(processed_file, &summary.songs).await {
        error!(
            "Failed to write processed songs to {}. Err: {}",
            processed_file.display(),
            e
        );
    }

    success!(
        "{} songs written to {}",
        summary.songs.len(),
        processed_file.display()
    );

    if summary.delete_failures > 0 {
        warning!(
            "{} processed files could not be deleted and are still on disk",
            summary.delete_failures
        );
    }
    if summary.unreadable > 0 {
        warning!("{} files could not be read and were kept", summary.unreadable);
    }
    if summary.missing_metadata > 0 {
        info!(
            "{} files without artist or title were kept",
            summary.missing_metadata
        );
    }

    summary
}
