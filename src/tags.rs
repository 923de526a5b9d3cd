//! Tag extraction for the supported audio containers.
//!
//! Every container keeps artist and title under its own native keys: ID3v2
//! frames (`TPE1`/`TIT2`, falling back to ID3v1) for MP3, Vorbis comments (`ARTIST`/`TITLE`) for
//! FLAC and iTunes-style atoms (`©ART`/`©nam`) for M4A. [`AudioFormat`] maps
//! each variant onto the matching `lofty` tag block, and [`TagSource`] is the
//! capability the directory scanner needs from an extractor.

use std::{fmt, io, path::Path};

use lofty::{
    error::LoftyError,
    file::{FileType, TaggedFileExt},
    probe::Probe,
    tag::{ItemKey, TagType},
};

/// A supported audio container, selected by file name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Flac,
    M4a,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 3] = [AudioFormat::Mp3, AudioFormat::Flac, AudioFormat::M4a];

    /// Picks the format whose suffix ends `name`. Matching is case-sensitive,
    /// so `song.MP3` is not recognised.
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| name.ends_with(format.suffix()))
    }

    pub fn suffix(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => ".mp3",
            AudioFormat::Flac => ".flac",
            AudioFormat::M4a => ".m4a",
        }
    }

    fn file_type(self) -> FileType {
        match self {
            AudioFormat::Mp3 => FileType::Mpeg,
            AudioFormat::Flac => FileType::Flac,
            AudioFormat::M4a => FileType::Mp4,
        }
    }

    /// Tag blocks to consult, in order of precedence. MP3 falls back to a
    /// trailing ID3v1 block for fields the ID3v2 tag does not carry.
    fn tag_types(self) -> &'static [TagType] {
        match self {
            AudioFormat::Mp3 => &[TagType::Id3v2, TagType::Id3v1],
            AudioFormat::Flac => &[TagType::VorbisComments],
            AudioFormat::M4a => &[TagType::Mp4Ilst],
        }
    }

    /// Reads artist and title from the container's native tag block.
    ///
    /// The container type is sniffed from the file content and has to agree
    /// with the variant. A file without any of its tag blocks is not an error;
    /// it yields a [`TagPair`] with both fields missing.
    pub fn read_tags(self, path: &Path) -> Result<TagPair, TagReadError> {
        // Parsing the audio properties is what rejects a stream without frames.
        let probe = Probe::open(path)?.guess_file_type()?;

        match probe.file_type() {
            Some(found) if found == self.file_type() => {}
            found => {
                return Err(TagReadError::FormatMismatch {
                    expected: self,
                    found,
                });
            }
        }

        let tagged_file = probe.read()?;

        let mut pair = TagPair::default();
        for &tag_type in self.tag_types() {
            let Some(tag) = tagged_file.tag(tag_type) else {
                continue;
            };
            if pair.artist.is_none() {
                pair.artist = collect_values(tag.get_strings(&ItemKey::TrackArtist));
            }
            if pair.title.is_none() {
                pair.title = collect_values(tag.get_strings(&ItemKey::TrackTitle));
            }
        }

        Ok(pair)
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AudioFormat::Mp3 => "MP3",
            AudioFormat::Flac => "FLAC",
            AudioFormat::M4a => "M4A",
        };
        f.write_str(name)
    }
}

fn collect_values<'a>(values: impl Iterator<Item = &'a str>) -> Option<Vec<String>> {
    let values: Vec<String> = values.map(str::to_string).collect();
    if values.is_empty() { None } else { Some(values) }
}

/// Raw artist and title fields as stored in the container. Each field may
/// hold several values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPair {
    pub artist: Option<Vec<String>>,
    pub title: Option<Vec<String>>,
}

impl TagPair {
    pub fn new(artist: &[&str], title: &[&str]) -> Self {
        let owned = |values: &[&str]| -> Option<Vec<String>> {
            Some(values.iter().map(|v| v.to_string()).collect())
        };
        Self {
            artist: owned(artist),
            title: owned(title),
        }
    }

    /// The search string for this pair, or `None` unless both fields are present.
    pub fn song_name(&self) -> Option<String> {
        match (&self.artist, &self.title) {
            (Some(artist), Some(title)) => {
                Some(format_song_name(Some(artist.as_slice()), Some(title.as_slice())))
            }
            _ => None,
        }
    }

    pub fn artist_display(&self) -> String {
        self.artist.as_deref().map(|v| v.join(", ")).unwrap_or_default()
    }

    pub fn title_display(&self) -> String {
        self.title.as_deref().map(|v| v.join(", ")).unwrap_or_default()
    }
}

/// Builds the catalog query `"{title} {artist}"`.
///
/// Multiple values of a field are joined with a single space and a missing
/// field contributes an empty string. The result is not trimmed, so a missing
/// side leaves a leading or trailing space.
pub fn format_song_name(artist: Option<&[String]>, title: Option<&[String]>) -> String {
    let artist_name = artist.map(|values| values.join(" ")).unwrap_or_default();
    let title_name = title.map(|values| values.join(" ")).unwrap_or_default();
    format!("{} {}", title_name, artist_name)
}

#[derive(Debug)]
pub enum TagReadError {
    Io(io::Error),
    Parse(LoftyError),
    FormatMismatch {
        expected: AudioFormat,
        found: Option<FileType>,
    },
}

impl From<io::Error> for TagReadError {
    fn from(err: io::Error) -> Self {
        TagReadError::Io(err)
    }
}

impl From<LoftyError> for TagReadError {
    fn from(err: LoftyError) -> Self {
        TagReadError::Parse(err)
    }
}

impl fmt::Display for TagReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagReadError::Io(e) => write!(f, "cannot read file: {}", e),
            TagReadError::Parse(e) => write!(f, "cannot parse tags: {}", e),
            TagReadError::FormatMismatch { expected, found } => match found {
                Some(found) => write!(f, "expected {} content, found {:?}", expected, found),
                None => write!(f, "expected {} content, found unknown data", expected),
            },
        }
    }
}

impl std::error::Error for TagReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TagReadError::Io(e) => Some(e),
            TagReadError::Parse(e) => Some(e),
            TagReadError::FormatMismatch { .. } => None,
        }
    }
}

/// Something that can read a [`TagPair`] for a file of a known format.
pub trait TagSource {
    fn read_tags(&self, format: AudioFormat, path: &Path) -> Result<TagPair, TagReadError>;
}

/// Reads tags from disk through `lofty`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyTags;

impl TagSource for LoftyTags {
    fn read_tags(&self, format: AudioFormat, path: &Path) -> Result<TagPair, TagReadError> {
        format.read_tags(path)
    }
}
