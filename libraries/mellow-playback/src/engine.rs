//! Platform-agnostic playback engine boundary
//!
//! The controller never renders audio. It drives an engine (an HTML audio
//! element, a native player, a test double) through this trait and learns
//! about progress through `EngineEvent`s the host feeds back in.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Audio engine driven by the controller
///
/// Calls are fire-and-forget: an `Ok` means the request was accepted, not
/// that playback has started. Completion is observed via later events.
#[cfg_attr(test, mockall::automock)]
pub trait PlaybackEngine: Send {
    /// Load a playable source, replacing whatever was bound
    fn bind(&mut self, source_url: &str) -> Result<()>;

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Set output volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32) -> Result<()>;

    /// Seek to an absolute position in seconds
    fn set_current_time(&mut self, seconds: f64) -> Result<()>;

    /// Drop the bound source
    fn unload(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Events emitted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Position/duration changed (also sent once metadata is loaded)
    ///
    /// `duration_secs` may be NaN or infinite while the source is still loading.
    TimeUpdate {
        /// Current position
        current_secs: f64,
        /// Total duration as reported by the engine
        duration_secs: f64,
    },

    /// Bound source played to the end
    Ended,
}
