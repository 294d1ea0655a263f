//! Mellow Player - Playback Session
//!
//! Platform-agnostic queue and playback control for Mellow Player.
//!
//! This crate provides:
//! - A queue session (end/next/now insertion, shuffle with restorable order)
//! - Library traversal with shuffle and repeat-one
//! - A single authoritative "now playing" index that engine and
//!   notification surface follow
//! - Transport state (position, duration, volume, fractional seek)
//! - Library search over title and artist
//!
//! # Architecture
//!
//! The controller never renders audio and never talks to the OS directly.
//! Hosts plug in a [`PlaybackEngine`] (audio element, native player) and a
//! [`NowPlayingSurface`] (media session, lock screen) and feed engine
//! progress back through [`EngineEvent`]s.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use mellow_core::Track;
//! use mellow_playback::{
//!     AddMode, NoopSurface, PlaybackConfig, PlaybackController, PlaybackEngine, PlaybackState,
//!     Result,
//! };
//!
//! struct SilentEngine;
//!
//! impl PlaybackEngine for SilentEngine {
//!     fn bind(&mut self, _source_url: &str) -> Result<()> { Ok(()) }
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) -> Result<()> { Ok(()) }
//!     fn set_volume(&mut self, _volume: f32) -> Result<()> { Ok(()) }
//!     fn set_current_time(&mut self, _seconds: f64) -> Result<()> { Ok(()) }
//! }
//!
//! let mut controller = PlaybackController::new(
//!     PlaybackConfig::default(),
//!     Box::new(SilentEngine),
//!     Box::new(NoopSurface),
//! );
//!
//! controller.replace_library(vec![
//!     Track::new("a", "Intro", "Artist", "https://cdn.example/a.mp3"),
//!     Track::new("b", "Outro", "Artist", "https://cdn.example/b.mp3"),
//! ]);
//!
//! controller.select_track(0)?;
//! assert_eq!(controller.state(), PlaybackState::Playing);
//!
//! // Queued tracks win over library order
//! controller.queue_add(
//!     [Track::new("c", "Bonus", "Guest", "https://cdn.example/c.mp3")],
//!     AddMode::End,
//! )?;
//! controller.advance()?;
//! assert_eq!(controller.current_track().map(|t| t.title.as_str()), Some("Bonus"));
//! # Ok::<(), mellow_playback::PlaybackError>(())
//! ```
//!
//! # Example: Shuffle and Repeat
//!
//! ```rust
//! use mellow_core::Track;
//! use mellow_playback::{AddMode, QueueSession, RepeatMode, SeededRandom, ShuffleMode};
//!
//! // Deterministic queue shuffle
//! let mut queue = QueueSession::with_random(Box::new(SeededRandom::new(7)));
//! queue.add(
//!     (1..=5).map(|n| Track::new(format!("t{n}"), format!("Song {n}"), "Band", format!("https://cdn.example/{n}.mp3"))),
//!     AddMode::End,
//! );
//! assert!(queue.toggle_shuffle());
//! assert!(!queue.toggle_shuffle());
//! assert_eq!(queue.snapshot()[0].title, "Song 1");
//!
//! // Library shuffle and repeat are controller settings
//! let config = mellow_playback::PlaybackConfig {
//!     shuffle: ShuffleMode::Random,
//!     repeat: RepeatMode::One,
//!     ..Default::default()
//! };
//! assert_eq!(config.volume, 1.0);
//! ```

mod controller;
mod engine;
mod error;
pub mod events;
mod queue;
mod random;
mod surface;
mod transport;
pub mod types;

// Public exports
pub use controller::PlaybackController;
pub use engine::{EngineEvent, PlaybackEngine};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use queue::QueueSession;
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use surface::{NoopSurface, NowPlayingSurface, RemoteCommand};
pub use transport::Transport;
pub use types::{AddMode, PlaybackConfig, PlaybackState, QueueInfo, RepeatMode, ShuffleMode};
