//! Core types for playback management

use mellow_core::Track;
use serde::{Deserialize, Serialize};

/// Where `QueueSession::add` places new tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddMode {
    /// Append to the tail
    End,

    /// Insert right after the current position, position unchanged
    Next,

    /// Insert right after the current position and move onto the first inserted track
    Now,
}

/// Controller state derived from the authoritative session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No track loaded
    Idle,

    /// Track bound to the engine, paused
    Loaded,

    /// Track bound to the engine, running
    Playing,
}

/// Library-level shuffle
///
/// Governs traversal of the library only. The queue carries its own
/// independent shuffle flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShuffleMode {
    /// Linear library order
    #[default]
    Off,

    /// Uniformly random library index, never the current one twice in a row
    Random,
}

/// Repeat mode
///
/// Library traversal always wraps around, so there is no separate "repeat all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Advance when a track ends
    #[default]
    Off,

    /// Restart the current track when it ends
    One,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 1.0)
    pub volume: f32,

    /// Initial library shuffle (default: Off)
    pub shuffle: ShuffleMode,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            shuffle: ShuffleMode::Off,
            repeat: RepeatMode::Off,
        }
    }
}

/// Read-only view of the queue around the current position
#[derive(Debug, Clone, PartialEq)]
pub struct QueueInfo {
    /// Queue contents in current order
    pub tracks: Vec<Track>,

    /// Current position (0 when empty)
    pub position: usize,

    /// Track at the current position
    pub current: Option<Track>,

    /// Track after the current position in queue order
    pub next: Option<Track>,

    /// Track before the current position in queue order
    pub previous: Option<Track>,

    /// Whether queue shuffle is active
    pub shuffle_active: bool,
}

impl QueueInfo {
    /// Number of queued tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.volume, 1.0);
        assert_eq!(config.shuffle, ShuffleMode::Off);
        assert_eq!(config.repeat, RepeatMode::Off);
    }

    #[test]
    fn add_mode_wire_names() {
        assert_eq!(serde_json::to_string(&AddMode::Now).unwrap(), "\"now\"");
        assert_eq!(
            serde_json::from_str::<AddMode>("\"next\"").unwrap(),
            AddMode::Next
        );
    }
}
