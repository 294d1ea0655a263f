/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::Duration;

/// Artist credit as delivered by the catalog
///
/// The catalog stores either a single name or an ordered list of names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArtistCredit {
    /// Single artist string
    Single(String),

    /// Ordered list of artist names
    Many(Vec<String>),
}

impl ArtistCredit {
    /// Display string (list entries joined with ", ")
    pub fn display(&self) -> String {
        match self {
            Self::Single(name) => name.clone(),
            Self::Many(names) => names.join(", "),
        }
    }
}

impl Default for ArtistCredit {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

impl fmt::Display for ArtistCredit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<&str> for ArtistCredit {
    fn from(name: &str) -> Self {
        Self::Single(name.to_string())
    }
}

impl From<String> for ArtistCredit {
    fn from(name: String) -> Self {
        Self::Single(name)
    }
}

impl From<Vec<String>> for ArtistCredit {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names)
    }
}

/// Playable track
///
/// Immutable value object. The library and the queue hold independent copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TrackWire")]
pub struct Track {
    /// Catalog identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist credit
    pub artist: ArtistCredit,

    /// Cover art URL
    pub cover_url: String,

    /// Playable source URL
    pub song_url: String,

    /// Duration hint in seconds
    #[serde(rename = "duration", skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
}

/// Catalog entry as sent over the wire
///
/// Entries may carry `id`, `_id` or both, and display fields may be `null`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackWire {
    #[serde(default)]
    id: Option<TrackId>,

    #[serde(default, rename = "_id")]
    object_id: Option<TrackId>,

    #[serde(default, deserialize_with = "null_as_default")]
    title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    artist: ArtistCredit,

    #[serde(default, deserialize_with = "null_as_default")]
    cover_url: String,

    #[serde(default, deserialize_with = "null_as_default")]
    song_url: String,

    #[serde(default)]
    duration: Option<f64>,
}

impl From<TrackWire> for Track {
    fn from(wire: TrackWire) -> Self {
        Self {
            id: wire
                .id
                .or(wire.object_id)
                .unwrap_or_else(|| TrackId::new("")),
            title: wire.title,
            artist: wire.artist,
            cover_url: wire.cover_url,
            song_url: wire.song_url,
            duration_secs: wire.duration,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Track {
    /// Create a track with the required fields
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        artist: impl Into<ArtistCredit>,
        song_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            cover_url: String::new(),
            song_url: song_url.into(),
            duration_secs: None,
        }
    }

    /// Set the cover URL
    pub fn with_cover(mut self, cover_url: impl Into<String>) -> Self {
        self.cover_url = cover_url.into();
        self
    }

    /// Set the duration hint
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_secs = Some(duration.as_secs_f64());
        self
    }

    /// Artist display string
    pub fn artist_display(&self) -> String {
        self.artist.display()
    }

    /// Duration hint, if the catalog provided a usable one
    pub fn duration(&self) -> Option<Duration> {
        self.duration_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}
