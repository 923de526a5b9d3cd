use std::path::PathBuf;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Platform data directory for tunesweep, e.g. `~/.local/share/tunesweep`.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tunesweep");
    path
}

/// Extracts the playlist id from a bare id, a `spotify:playlist:<id>` URI or an
/// `https://open.spotify.com/playlist/<id>?...` link.
pub fn parse_playlist_id(input: &str) -> Result<String, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("playlist id cannot be empty".to_string());
    }

    let id = if let Some(rest) = input.strip_prefix("spotify:playlist:") {
        rest
    } else if let Some(pos) = input.find("/playlist/") {
        let rest = &input[pos + "/playlist/".len()..];
        rest.split(['?', '/', '#']).next().unwrap_or_default()
    } else {
        input
    };

    if id.is_empty() {
        return Err(format!("no playlist id found in '{}'", input));
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!("invalid playlist id '{}'", id));
    }
    Ok(id.to_string())
}
