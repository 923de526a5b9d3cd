//! Plain text song lists.
//!
//! One song per line, UTF-8, `\n` terminated. Existing files are overwritten.
//! Names are written verbatim; a name that contains a line break spans two
//! lines when read back.

use std::path::Path;

pub async fn write_song_list(path: &Path, songs: &[String]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            async_fs::create_dir_all(parent).await?;
        }
    }

    let mut content = String::new();
    for song in songs {
        content.push_str(song);
        content.push('\n');
    }
    async_fs::write(path, content).await
}

/// Reads a list written by [`write_song_list`]. Empty lines are skipped.
/// Only `\n` separates entries, so a trailing `\r` stays part of the name.
pub async fn read_song_list(path: &Path) -> std::io::Result<Vec<String>> {
    let content = async_fs::read_to_string(path).await?;
    Ok(content
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
