//! Directory scanning and source file deletion.
//!
//! The scanner walks the direct entries of one directory, hands every file
//! with a recognised suffix to a [`TagSource`] and collects the formatted
//! song names in listing order. A file whose tags were captured is deleted
//! afterwards. Per-file failures are logged and skipped; only a directory
//! that cannot be listed stops the scan.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use crate::{
    info, success,
    tags::{AudioFormat, TagPair, TagReadError, TagSource},
    warning,
};

/// What happened to a single file during the scan.
#[derive(Debug)]
pub enum FileOutcome {
    /// Tags were captured. `deleted` reports whether the source file was removed;
    /// the song counts as processed either way.
    Processed {
        song: String,
        tags: TagPair,
        deleted: Result<(), DeleteError>,
    },
    /// Artist or title is absent. The file is left in place.
    MissingMetadata,
    /// The container could not be read. The file is left in place.
    Unreadable(TagReadError),
}

#[derive(Debug)]
pub struct DeleteError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl fmt::Display for DeleteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error deleting {}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for DeleteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    /// Formatted song names in directory listing order.
    pub songs: Vec<String>,
    pub deleted: usize,
    pub delete_failures: usize,
    pub missing_metadata: usize,
    pub unreadable: usize,
}

impl ScanSummary {
    fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Processed { song, deleted, .. } => {
                self.songs.push(song);
                match deleted {
                    Ok(()) => self.deleted += 1,
                    Err(_) => self.delete_failures += 1,
                }
            }
            FileOutcome::MissingMetadata => self.missing_metadata += 1,
            FileOutcome::Unreadable(_) => self.unreadable += 1,
        }
    }
}

/// Removes a source file whose tags have already been captured.
pub fn delete_file(path: &Path) -> Result<(), DeleteError> {
    fs::remove_file(path).map_err(|source| DeleteError {
        path: path.to_path_buf(),
        source,
    })
}

/// Extracts, formats and deletes a single file.
///
/// The song name is fixed before the deletion is attempted, so a failed
/// deletion never drops the song from the processed list.
pub fn process_file<S: TagSource>(source: &S, format: AudioFormat, path: &Path) -> FileOutcome {
    let tags = match source.read_tags(format, path) {
        Ok(tags) => tags,
        Err(e) => return FileOutcome::Unreadable(e),
    };

    let Some(song) = tags.song_name() else {
        return FileOutcome::MissingMetadata;
    };

    let deleted = delete_file(path);
    FileOutcome::Processed {
        song,
        tags,
        deleted,
    }
}

/// Scans the direct entries of `dir` and returns the processed songs.
///
/// Subdirectories are not entered and files with an unknown suffix are
/// ignored. No sorting is applied: the order of the directory listing is the
/// order of the returned songs and later of the playlist.
pub fn scan_directory<S: TagSource>(dir: &Path, source: &S) -> io::Result<ScanSummary> {
    let mut summary = ScanSummary::default();

    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warning!("Error reading entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let file_name = entry.file_name();
        let Some(format) = AudioFormat::from_file_name(&file_name.to_string_lossy()) else {
            continue;
        };

        let outcome = process_file(source, format, &path);
        log_outcome(&path, &outcome);
        summary.record(outcome);
    }

    Ok(summary)
}

fn log_outcome(path: &Path, outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Processed { tags, deleted, .. } => {
            info!("File: {}", path.display());
            info!("Artist: {}", tags.artist_display());
            info!("Title: {}", tags.title_display());
            match deleted {
                Ok(()) => success!("Deleted file: {}", path.display()),
                Err(e) => warning!("{}", e),
            }
        }
        FileOutcome::MissingMetadata => {}
        FileOutcome::Unreadable(e) => warning!("Error processing {}: {}", path.display(), e),
    }
}
