//! Now-playing notification surface
//!
//! Platform media-session / lock-screen integration. Strictly best effort:
//! the controller logs failures and keeps playing.

use crate::error::Result;
use mellow_core::Track;
use serde::{Deserialize, Serialize};

/// Platform "now playing" surface
#[cfg_attr(test, mockall::automock)]
pub trait NowPlayingSurface: Send {
    /// Announce a newly loaded track
    fn start(&mut self, track: &Track, is_playing: bool) -> Result<()>;

    /// Update play/pause state for the announced track
    fn update_play_state(&mut self, is_playing: bool) -> Result<()>;
}

/// Surface that accepts everything and shows nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSurface;

impl NowPlayingSurface for NoopSurface {
    fn start(&mut self, _track: &Track, _is_playing: bool) -> Result<()> {
        Ok(())
    }

    fn update_play_state(&mut self, _is_playing: bool) -> Result<()> {
        Ok(())
    }
}

/// Remote-control button pressed on the surface (headset, lock screen, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteCommand {
    /// Resume playback
    Play,

    /// Pause playback
    Pause,

    /// Skip forward
    Next,

    /// Skip back
    Previous,

    /// Pause and rewind to the start
    Stop,
}
