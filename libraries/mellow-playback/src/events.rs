//! Playback Events
//!
//! Event-based communication for UI synchronization. The controller queues
//! events as it commits state and the UI drains them once per frame/tick:
//! - Track changes (every change of the authoritative library index)
//! - State changes (idle/loaded/playing)
//! - Queue mutations
//! - Position updates (forwarded engine time updates)

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// Authoritative track changed
    TrackChanged {
        /// ID of the new (current) track
        track_id: String,
        /// Library index of the new track
        library_index: usize,
        /// ID of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// Queue changed (tracks added/removed/reordered/shuffled)
    QueueChanged {
        /// New queue length
        length: usize,
        /// Queue position after the change
        position: usize,
    },

    /// Position update forwarded from the engine
    PositionUpdate {
        /// Current playback position
        position_ms: u64,
        /// Total track duration, if known
        duration_ms: Option<u64>,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume (0.0-1.0)
        volume: f32,
    },

    /// Library contents changed
    LibraryChanged {
        /// New library length
        length: usize,
    },

    /// Error occurred during playback
    Error {
        /// Error message
        message: String,
    },
}
