//! The search-and-append loop against a music catalog.
//!
//! [`Catalog`] is the remote surface the loop needs: a track search and a
//! playlist append. [`crate::spotify::SpotifyCatalog`] implements it against
//! the Spotify Web API.

use std::fmt;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{success, types::Track, warning};

#[derive(Debug)]
pub enum CatalogError {
    Http(reqwest::Error),
    Decode(String),
    Auth(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Http(err)
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Http(e) => write!(f, "request failed: {}", e),
            CatalogError::Decode(e) => write!(f, "unexpected response: {}", e),
            CatalogError::Auth(e) => write!(f, "not authorized: {}", e),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Http(e) => Some(e),
            _ => None,
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait Catalog {
    /// Searches tracks only, best match first.
    async fn search_tracks(&mut self, query: &str) -> Result<Vec<Track>, CatalogError>;

    async fn add_to_playlist(&mut self, playlist_id: &str, track: &Track)
    -> Result<(), CatalogError>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    pub added: usize,
    pub not_found: Vec<String>,
}

/// A catalog call failed. Songs before `failed_song` were handled and their
/// playlist additions remain applied.
#[derive(Debug)]
pub struct MatchError {
    pub failed_song: String,
    pub completed: MatchSummary,
    pub source: CatalogError,
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "catalog call for '{}' failed after {} added: {}",
            self.failed_song, self.completed.added, self.source
        )
    }
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Searches every song in order and appends the first hit to the playlist.
///
/// One search and at most one append per song, with the raw song name as the
/// query. Songs without a hit are collected in [`MatchSummary::not_found`].
/// The same track is appended again if it is matched again; the playlist is
/// never checked for existing entries. The first failing call stops the loop.
pub async fn match_songs<C: Catalog>(
    catalog: &mut C,
    playlist_id: &str,
    songs: &[String],
) -> Result<MatchSummary, MatchError> {
    let mut summary = MatchSummary::default();

    let pb = ProgressBar::new(songs.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:30.blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for song in songs {
        pb.set_message(song.clone());

        let result = match catalog.search_tracks(song).await {
            Ok(tracks) => match tracks.first() {
                Some(track) => catalog
                    .add_to_playlist(playlist_id, track)
                    .await
                    .map(|_| true),
                None => Ok(false),
            },
            Err(e) => Err(e),
        };

        match result {
            Ok(true) => {
                summary.added += 1;
                pb.suspend(|| success!("Track added to your playlist successfully. {}", song));
            }
            Ok(false) => {
                summary.not_found.push(song.clone());
                pb.suspend(|| warning!("No search results found. {}", song));
            }
            Err(source) => {
                pb.finish_and_clear();
                return Err(MatchError {
                    failed_song: song.clone(),
                    completed: summary,
                    source,
                });
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(summary)
}
