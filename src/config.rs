//! Configuration management for Tunesweep.
//!
//! Settings come from environment variables, optionally seeded from a `.env`
//! file in the local data directory, and from command line flags which take
//! precedence. Everything a command needs is resolved and validated before
//! the command touches the filesystem or the network:
//! 1. Command line flags (highest priority)
//! 2. Environment variables
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{
    env, fmt,
    net::SocketAddr,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::utils;

pub const DEFAULT_PROCESSED_FILE: &str = "all-processed_songs.txt";
pub const DEFAULT_NOTFOUND_FILE: &str = "notfound.txt";

pub const MUSIC_DIR: &str = "TUNESWEEP_MUSIC_DIR";
pub const PLAYLIST_ID: &str = "TUNESWEEP_PLAYLIST_ID";
pub const SERVER_ADDRESS: &str = "SERVER_ADDRESS";
pub const SPOTIFY_API_AUTH_CLIENT_ID: &str = "SPOTIFY_API_AUTH_CLIENT_ID";
pub const SPOTIFY_API_AUTH_CLIENT_SECRET: &str = "SPOTIFY_API_AUTH_CLIENT_SECRET";
pub const SPOTIFY_API_REDIRECT_URI: &str = "SPOTIFY_API_REDIRECT_URI";
pub const SPOTIFY_API_AUTH_SCOPE: &str = "SPOTIFY_API_AUTH_SCOPE";
pub const SPOTIFY_API_AUTH_URL: &str = "SPOTIFY_API_AUTH_URL";
pub const SPOTIFY_API_TOKEN_URL: &str = "SPOTIFY_API_TOKEN_URL";
pub const SPOTIFY_API_URL: &str = "SPOTIFY_API_URL";

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_SCOPE: &str = "playlist-modify-public";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the `tunesweep` data directory if it doesn't exist. A missing
/// `.env` file is not an error; variables already present in the process
/// environment are never overwritten.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/tunesweep/.env`
/// - macOS: `~/Library/Application Support/tunesweep/.env`
/// - Windows: `%LOCALAPPDATA%/tunesweep/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file exists but cannot be read or parsed
pub async fn load_env() -> Result<(), String> {
    let path = utils::data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Reads a variable from the process environment. Blank values count as unset.
pub fn lookup_env(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    NotADirectory(PathBuf),
    Invalid { var: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "{} must be set", var),
            ConfigError::NotADirectory(path) => {
                write!(f, "{} is not a readable directory", path.display())
            }
            ConfigError::Invalid { var, reason } => write!(f, "{} is invalid: {}", var, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Credentials and endpoints for the Spotify Web API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifySettings {
    pub client_id: String,
    /// Sent as HTTP basic auth on token requests when present.
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: SocketAddr,
}

impl SpotifySettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&lookup_env)
    }

    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let client_id =
            lookup(SPOTIFY_API_AUTH_CLIENT_ID).ok_or(ConfigError::Missing(SPOTIFY_API_AUTH_CLIENT_ID))?;

        let server_addr = lookup(SERVER_ADDRESS).unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string());
        let server_addr = SocketAddr::from_str(&server_addr).map_err(|e| ConfigError::Invalid {
            var: SERVER_ADDRESS,
            reason: e.to_string(),
        })?;

        let url = |var: &'static str, default: &str| -> Result<String, ConfigError> {
            let value = lookup(var).unwrap_or_else(|| default.to_string());
            if value.starts_with("http://") || value.starts_with("https://") {
                Ok(value.trim_end_matches('/').to_string())
            } else {
                Err(ConfigError::Invalid {
                    var,
                    reason: format!("'{}' is not an http(s) URL", value),
                })
            }
        };

        Ok(Self {
            client_id,
            client_secret: lookup(SPOTIFY_API_AUTH_CLIENT_SECRET),
            redirect_uri: lookup(SPOTIFY_API_REDIRECT_URI),
            scope: lookup(SPOTIFY_API_AUTH_SCOPE).unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            auth_url: url(SPOTIFY_API_AUTH_URL, DEFAULT_AUTH_URL)?,
            token_url: url(SPOTIFY_API_TOKEN_URL, DEFAULT_TOKEN_URL)?,
            api_url: url(SPOTIFY_API_URL, DEFAULT_API_URL)?,
            server_addr,
        })
    }

    /// The redirect URI is only needed for the authorization flow.
    pub fn redirect_uri(&self) -> Result<&str, ConfigError> {
        self.redirect_uri
            .as_deref()
            .ok_or(ConfigError::Missing(SPOTIFY_API_REDIRECT_URI))
    }
}

/// Resolves the input directory from the flag or `TUNESWEEP_MUSIC_DIR` and
/// checks that it is an existing directory.
pub fn resolve_music_dir(
    flag: Option<PathBuf>,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<PathBuf, ConfigError> {
    let dir = flag
        .or_else(|| lookup(MUSIC_DIR).map(PathBuf::from))
        .ok_or(ConfigError::Missing(MUSIC_DIR))?;

    if !Path::new(&dir).is_dir() {
        return Err(ConfigError::NotADirectory(dir));
    }
    Ok(dir)
}

/// Resolves the destination playlist from the flag or `TUNESWEEP_PLAYLIST_ID`.
/// Accepts a bare id, a `spotify:playlist:` URI or an `open.spotify.com` link.
pub fn resolve_playlist_id(
    flag: Option<String>,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    let raw = flag
        .filter(|v| !v.trim().is_empty())
        .or_else(|| lookup(PLAYLIST_ID))
        .ok_or(ConfigError::Missing(PLAYLIST_ID))?;

    utils::parse_playlist_id(&raw).map_err(|reason| ConfigError::Invalid {
        var: PLAYLIST_ID,
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn spotify_settings_apply_defaults() {
        let lookup = lookup_from(&[(SPOTIFY_API_AUTH_CLIENT_ID, "client")]);
        let settings = SpotifySettings::from_lookup(&lookup).unwrap();

        assert_eq!(settings.client_id, "client");
        assert_eq!(settings.client_secret, None);
        assert_eq!(settings.scope, "playlist-modify-public");
        assert_eq!(settings.api_url, "https://api.spotify.com/v1");
        assert_eq!(settings.server_addr, "127.0.0.1:8888".parse::<SocketAddr>().unwrap());
        assert_eq!(
            settings.redirect_uri(),
            Err(ConfigError::Missing(SPOTIFY_API_REDIRECT_URI))
        );
    }

    #[test]
    fn spotify_settings_require_client_id() {
        let lookup = lookup_from(&[]);
        assert_eq!(
            SpotifySettings::from_lookup(&lookup),
            Err(ConfigError::Missing(SPOTIFY_API_AUTH_CLIENT_ID))
        );
    }

    #[test]
    fn spotify_settings_reject_bad_values() {
        let lookup = lookup_from(&[
            (SPOTIFY_API_AUTH_CLIENT_ID, "client"),
            (SERVER_ADDRESS, "not-an-address"),
        ]);
        assert!(matches!(
            SpotifySettings::from_lookup(&lookup),
            Err(ConfigError::Invalid { var: SERVER_ADDRESS, .. })
        ));

        let lookup = lookup_from(&[
            (SPOTIFY_API_AUTH_CLIENT_ID, "client"),
            (SPOTIFY_API_URL, "api.spotify.com"),
        ]);
        assert!(matches!(
            SpotifySettings::from_lookup(&lookup),
            Err(ConfigError::Invalid { var: SPOTIFY_API_URL, .. })
        ));
    }

    #[test]
    fn api_url_loses_trailing_slash() {
        let lookup = lookup_from(&[
            (SPOTIFY_API_AUTH_CLIENT_ID, "client"),
            (SPOTIFY_API_URL, "http://127.0.0.1:9000/v1/"),
        ]);
        let settings = SpotifySettings::from_lookup(&lookup).unwrap();
        assert_eq!(settings.api_url, "http://127.0.0.1:9000/v1");
    }

    #[test]
    fn music_dir_flag_wins_over_env() {
        let dir = tempfile::tempdir().unwrap();
        let lookup = lookup_from(&[(MUSIC_DIR, "/definitely/not/here")]);

        let resolved = resolve_music_dir(Some(dir.path().to_path_buf()), &lookup).unwrap();
        assert_eq!(resolved, dir.path());

        assert_eq!(
            resolve_music_dir(None, &lookup),
            Err(ConfigError::NotADirectory(PathBuf::from("/definitely/not/here")))
        );
        assert_eq!(
            resolve_music_dir(None, &lookup_from(&[])),
            Err(ConfigError::Missing(MUSIC_DIR))
        );
    }

    #[test]
    fn music_dir_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("song.mp3");
        std::fs::write(&file, b"x").unwrap();

        assert_eq!(
            resolve_music_dir(Some(file.clone()), &lookup_from(&[])),
            Err(ConfigError::NotADirectory(file))
        );
    }

    #[test]
    fn playlist_id_from_env_is_normalized() {
        let lookup = lookup_from(&[(PLAYLIST_ID, "spotify:playlist:2V187F982G937HA346K35")]);
        assert_eq!(
            resolve_playlist_id(None, &lookup).unwrap(),
            "2V187F982G937HA346K35"
        );
        assert_eq!(
            resolve_playlist_id(Some("abc123".to_string()), &lookup).unwrap(),
            "abc123"
        );
        assert_eq!(
            resolve_playlist_id(None, &lookup_from(&[])),
            Err(ConfigError::Missing(PLAYLIST_ID))
        );
    }
}
