//! Playback controller - authoritative session orchestration
//!
//! Coordinates library, queue, shuffle/repeat, the playback engine and the
//! now-playing surface. Navigation decisions are committed first and then
//! pushed out to the engine and surface, so a failing collaborator never
//! rolls back what the user asked for.

use crate::{
    engine::{EngineEvent, PlaybackEngine},
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    queue::QueueSession,
    random::{index_excluding, RandomSource, ThreadRandom},
    surface::{NowPlayingSurface, RemoteCommand},
    transport::Transport,
    types::{AddMode, PlaybackConfig, PlaybackState, QueueInfo, RepeatMode, ShuffleMode},
};
use mellow_core::{Library, SearchField, SubstringIndex, Track, TrackId, TrackIndex};
use tracing::{debug, info, warn};

/// Central playback session
///
/// Owns:
/// - The library (source of truth for "all tracks") and the authoritative index into it
/// - The queue session (user-curated upcoming tracks)
/// - Library shuffle and repeat-one
/// - The engine and now-playing surface (sole writer to both)
/// - Transport state and the library search term
pub struct PlaybackController {
    // Authoritative session
    library: Library,
    current_index: Option<usize>,
    is_playing: bool,

    // Traversal
    queue: QueueSession,
    shuffle: ShuffleMode,
    repeat: RepeatMode,
    random: Box<dyn RandomSource>,

    // Collaborators
    engine: Box<dyn PlaybackEngine>,
    surface: Box<dyn NowPlayingSurface>,
    bound_source: Option<String>,
    volume_synced: bool,

    // UI-facing state
    transport: Transport,
    search_term: String,
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    /// Create a controller with no track loaded
    pub fn new(
        config: PlaybackConfig,
        engine: Box<dyn PlaybackEngine>,
        surface: Box<dyn NowPlayingSurface>,
    ) -> Self {
        Self {
            library: Library::new(),
            current_index: None,
            is_playing: false,
            queue: QueueSession::new(),
            shuffle: config.shuffle,
            repeat: config.repeat,
            random: Box::new(ThreadRandom),
            engine,
            surface,
            bound_source: None,
            volume_synced: false,
            transport: Transport::new(config.volume),
            search_term: String::new(),
            pending_events: Vec::new(),
        }
    }

    /// Use `random` for library shuffle draws
    pub fn with_random(mut self, random: Box<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Replace the (empty) queue session, e.g. one with a seeded random source
    pub fn with_queue(mut self, queue: QueueSession) -> Self {
        self.queue = queue;
        self
    }

    // ===== Navigation =====

    /// Select a library track
    ///
    /// Selecting the current track toggles play/pause. Out-of-range indices
    /// are ignored.
    pub fn select_track(&mut self, library_index: usize) -> Result<()> {
        let Some(track_id) = self.library.get(library_index).map(|t| t.id.clone()) else {
            debug!(
                library_index,
                library_len = self.library.len(),
                "Select ignored: index out of range"
            );
            return Ok(());
        };

        if self.current_index == Some(library_index) {
            return self.toggle_play_pause();
        }

        self.search_term.clear();

        // Keep the queue pointer on manual jumps
        if self.queue.set_position_by_track_id(&track_id).is_some() {
            self.emit_queue_changed();
        }

        self.commit(Some(library_index), true)
    }

    /// Select a library track by id
    pub fn select_track_id(&mut self, track_id: &TrackId) -> Result<()> {
        match self.library.position_of(track_id) {
            Some(index) => self.select_track(index),
            None => {
                debug!(track_id = %track_id, "Select ignored: track not in library");
                Ok(())
            }
        }
    }

    /// Skip to the next track
    ///
    /// A non-empty queue always wins; otherwise the library is traversed,
    /// randomly when library shuffle is on.
    pub fn advance(&mut self) -> Result<()> {
        if let Some(track) = self.queue.advance().cloned() {
            self.emit_queue_changed();
            let index = self.resolve_in_library(&track);
            return self.navigate_to(index);
        }

        let len = self.library.len();
        if len == 0 {
            debug!("Advance ignored: library is empty");
            return Ok(());
        }

        let next = match self.shuffle {
            ShuffleMode::Random => self.random_library_index(len),
            ShuffleMode::Off => self.current_index.map_or(0, |index| (index + 1) % len),
        };

        self.navigate_to(next)
    }

    /// Go back one track
    ///
    /// Never randomized, for the queue or the library.
    pub fn retreat(&mut self) -> Result<()> {
        if let Some(track) = self.queue.retreat().cloned() {
            self.emit_queue_changed();
            let index = self.resolve_in_library(&track);
            return self.navigate_to(index);
        }

        let len = self.library.len();
        if len == 0 {
            debug!("Retreat ignored: library is empty");
            return Ok(());
        }

        let previous = self
            .current_index
            .map_or(len - 1, |index| (index + len - 1) % len);

        self.navigate_to(previous)
    }

    /// Handle the engine reaching the end of the bound source
    pub fn on_track_ended(&mut self) -> Result<()> {
        if self.repeat == RepeatMode::One && self.current_index.is_some() {
            debug!(library_index = ?self.current_index, "Repeat one: restarting track");
            return self.restart_in_place();
        }

        self.advance()
    }

    /// Map a queued track to its library slot, appending it if needed
    fn resolve_in_library(&mut self, track: &Track) -> usize {
        let before = self.library.len();
        let index = self.library.resolve(track);

        if self.library.len() > before {
            debug!(track_id = %track.id, library_index = index, "Queued track appended to library");
            self.pending_events.push(PlaybackEvent::LibraryChanged {
                length: self.library.len(),
            });
        }

        index
    }

    /// Random library index, never the current one unless it's the only track
    fn random_library_index(&mut self, len: usize) -> usize {
        if len == 1 {
            return 0;
        }

        match self.current_index {
            Some(current) if current < len => index_excluding(self.random.as_mut(), len, current),
            _ => self.random.index(len),
        }
    }

    fn navigate_to(&mut self, index: usize) -> Result<()> {
        if self.current_index == Some(index) {
            return self.restart_in_place();
        }

        self.commit(Some(index), true)
    }

    // ===== Playback Control =====

    /// Start or pause playback
    ///
    /// No-op when no track is loaded.
    pub fn set_playing(&mut self, playing: bool) -> Result<()> {
        if self.current_index.is_none() {
            debug!(playing, "Play state change ignored: no track loaded");
            return Ok(());
        }

        if playing == self.is_playing {
            return Ok(());
        }

        self.commit(self.current_index, playing)
    }

    /// Toggle play/pause
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        self.set_playing(!self.is_playing)
    }

    /// Set output volume (0.0-1.0, clamped)
    pub fn set_volume(&mut self, volume: f32) -> Result<()> {
        if !volume.is_finite() {
            return Err(PlaybackError::InvalidOperation(format!(
                "volume must be finite, got {volume}"
            )));
        }

        let applied = self.transport.set_volume(volume);
        self.pending_events
            .push(PlaybackEvent::VolumeChanged { volume: applied });

        self.engine.set_volume(applied)?;
        self.volume_synced = true;
        Ok(())
    }

    /// Seek to a fraction (0.0-1.0) of the current track
    ///
    /// Ignored until the engine has reported a finite, positive duration.
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Result<()> {
        let Some(target) = self.transport.seek_target(fraction) else {
            debug!(fraction, "Seek ignored: no valid duration");
            return Ok(());
        };

        self.engine.set_current_time(target)?;
        self.transport.set_position(target);
        Ok(())
    }

    /// Record an engine time update
    pub fn on_time_update(&mut self, current_secs: f64, duration_secs: f64) {
        self.transport.update(current_secs, duration_secs);
        self.emit_position_update();
    }

    /// Dispatch an engine event
    pub fn handle_engine_event(&mut self, event: EngineEvent) -> Result<()> {
        match event {
            EngineEvent::TimeUpdate {
                current_secs,
                duration_secs,
            } => {
                self.on_time_update(current_secs, duration_secs);
                Ok(())
            }
            EngineEvent::Ended => self.on_track_ended(),
        }
    }

    /// Dispatch a remote-control command from the now-playing surface
    pub fn handle_remote_command(&mut self, command: RemoteCommand) -> Result<()> {
        debug!(?command, "Remote command");

        match command {
            RemoteCommand::Play => self.set_playing(true),
            RemoteCommand::Pause => self.set_playing(false),
            RemoteCommand::Next => self.advance(),
            RemoteCommand::Previous => self.retreat(),
            RemoteCommand::Stop => {
                if self.current_index.is_none() {
                    return Ok(());
                }
                self.set_playing(false)?;
                self.engine.set_current_time(0.0)?;
                self.transport.rewind();
                Ok(())
            }
        }
    }

    // ===== Library =====

    /// Replace the library with a fresh catalog fetch
    ///
    /// The current track keeps playing if it is still present (its index is
    /// relocated); otherwise the session is unloaded.
    pub fn replace_library(&mut self, tracks: Vec<Track>) {
        let current_id = self.current_track().map(|t| t.id.clone());
        self.library.replace(tracks);

        info!(tracks = self.library.len(), "Library loaded");
        self.pending_events.push(PlaybackEvent::LibraryChanged {
            length: self.library.len(),
        });

        if let Some(id) = current_id {
            match self.library.position_of(&id) {
                Some(index) => self.current_index = Some(index),
                None => {
                    info!(track_id = %id, "Current track left the library, unloading");
                    self.unload();
                }
            }
        }
    }

    /// Append one track (e.g. a fresh upload), returning its index
    pub fn append_track(&mut self, track: Track) -> usize {
        let index = self.library.push(track);
        self.pending_events.push(PlaybackEvent::LibraryChanged {
            length: self.library.len(),
        });
        index
    }

    /// Tear the session down (logout, expired credentials)
    pub fn reset(&mut self) {
        self.unload();
        self.library.clear();
        self.queue.clear();
        self.search_term.clear();

        self.pending_events
            .push(PlaybackEvent::LibraryChanged { length: 0 });
        self.emit_queue_changed();
        info!("Playback session reset");
    }

    /// Stop the engine and forget the current track
    fn unload(&mut self) {
        let previous_state = self.state();

        if self.bound_source.is_some() {
            if self.is_playing {
                if let Err(e) = self.engine.pause() {
                    self.report_engine_failure("pause", &e);
                }
            }
            if let Err(e) = self.engine.unload() {
                self.report_engine_failure("unload", &e);
            }
        }

        self.bound_source = None;
        self.current_index = None;
        self.is_playing = false;
        self.transport.reset();

        if previous_state != PlaybackState::Idle {
            self.pending_events.push(PlaybackEvent::StateChanged {
                state: PlaybackState::Idle,
            });
            self.notify_play_state();
        }
    }

    // ===== Queue =====

    /// Add tracks to the queue
    ///
    /// `AddMode::Now` also loads the first inserted track immediately.
    pub fn queue_add<I>(&mut self, tracks: I, mode: AddMode) -> Result<()>
    where
        I: IntoIterator<Item = Track>,
    {
        let before = self.queue.len();
        self.queue.add(tracks, mode);
        if self.queue.len() == before {
            return Ok(());
        }
        self.emit_queue_changed();

        if mode == AddMode::Now {
            if let Some(track) = self.queue.current().cloned() {
                let index = self.resolve_in_library(&track);
                return self.navigate_to(index);
            }
        }

        Ok(())
    }

    /// Remove a track from the queue (the library is untouched)
    pub fn queue_remove(&mut self, track_id: &TrackId) -> Option<Track> {
        let removed = self.queue.remove(track_id);
        if removed.is_some() {
            self.emit_queue_changed();
        }
        removed
    }

    /// Move a queue entry
    pub fn queue_reorder(&mut self, from_index: usize, to_index: usize) -> Result<()> {
        self.queue.reorder(from_index, to_index)?;
        self.emit_queue_changed();
        Ok(())
    }

    /// Empty the queue
    pub fn queue_clear(&mut self) {
        self.queue.clear();
        self.emit_queue_changed();
    }

    /// Toggle queue shuffle, returning the new state
    pub fn toggle_queue_shuffle(&mut self) -> bool {
        let active = self.queue.toggle_shuffle();
        self.emit_queue_changed();
        active
    }

    /// Independent copy of the queue contents
    pub fn queue_snapshot(&self) -> Vec<Track> {
        self.queue.snapshot()
    }

    /// Queue contents around the current position
    pub fn queue_info(&self) -> QueueInfo {
        self.queue.info()
    }

    /// Read-only queue access
    pub fn queue(&self) -> &QueueSession {
        &self.queue
    }

    // ===== Shuffle & Repeat =====

    /// Set library shuffle mode
    pub fn set_shuffle(&mut self, mode: ShuffleMode) {
        self.shuffle = mode;
    }

    /// Flip library shuffle, returning the new mode
    pub fn toggle_shuffle(&mut self) -> ShuffleMode {
        self.shuffle = match self.shuffle {
            ShuffleMode::Off => ShuffleMode::Random,
            ShuffleMode::Random => ShuffleMode::Off,
        };
        self.shuffle
    }

    /// Get library shuffle mode
    pub fn shuffle(&self) -> ShuffleMode {
        self.shuffle
    }

    /// Set repeat mode
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
    }

    /// Flip repeat-one, returning the new mode
    pub fn toggle_repeat(&mut self) -> RepeatMode {
        self.repeat = match self.repeat {
            RepeatMode::Off => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        };
        self.repeat
    }

    /// Get repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    // ===== Search =====

    /// Set the library filter term
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Clear the library filter term
    pub fn clear_search(&mut self) {
        self.search_term.clear();
    }

    /// Current library filter term
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Library tracks matching the search term on title or artist
    pub fn filtered_library(&self, limit: usize) -> Vec<Track> {
        SubstringIndex::build(
            self.library.tracks(),
            &[SearchField::Title, SearchField::Artist],
        )
        .query(&self.search_term, limit)
    }

    // ===== State Queries =====

    /// Current controller state
    pub fn state(&self) -> PlaybackState {
        match (self.current_index, self.is_playing) {
            (None, _) => PlaybackState::Idle,
            (Some(_), false) => PlaybackState::Loaded,
            (Some(_), true) => PlaybackState::Playing,
        }
    }

    /// Authoritative library index
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Authoritative track
    pub fn current_track(&self) -> Option<&Track> {
        self.current_index.and_then(|index| self.library.get(index))
    }

    /// Whether playback is running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// The library
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Transport state (position, duration, volume)
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Source URL currently bound to the engine
    pub fn bound_source(&self) -> Option<&str> {
        self.bound_source.as_deref()
    }

    // ===== Synchronization =====

    /// Commit a new authoritative state, then push it out
    ///
    /// The commit itself never fails. A bind failure is returned after the
    /// surface has been updated; play/pause failures are only reported as
    /// events.
    fn commit(&mut self, index: Option<usize>, playing: bool) -> Result<()> {
        let previous_state = self.state();
        let previous_index = self.current_index;
        let previous_id = self.current_track().map(|t| t.id.to_string());
        let was_playing = self.is_playing;

        self.current_index = index;
        self.is_playing = playing && index.is_some();

        let track_changed = previous_index != self.current_index;
        let play_state_changed = was_playing != self.is_playing;
        if !track_changed && !play_state_changed {
            return Ok(());
        }

        let Some(track) = self.current_track().cloned() else {
            return Ok(());
        };

        let bound = self.bind_source(&track);

        if track_changed {
            self.transport.reset();
            info!(
                track_id = %track.id,
                title = %track.title,
                library_index = ?self.current_index,
                "Now playing"
            );
            self.pending_events.push(PlaybackEvent::TrackChanged {
                track_id: track.id.to_string(),
                library_index: self.current_index.unwrap_or_default(),
                previous_track_id: previous_id,
            });
            self.notify_start(&track);
        } else {
            self.notify_play_state();
        }

        if self.state() != previous_state {
            self.pending_events.push(PlaybackEvent::StateChanged {
                state: self.state(),
            });
        }

        if bound.is_ok() {
            self.sync_engine_play_state();
        }

        bound
    }

    /// Rewind the current track and make sure it plays
    fn restart_in_place(&mut self) -> Result<()> {
        let Some(track) = self.current_track().cloned() else {
            return Ok(());
        };

        let bound = self.bind_source(&track);
        let was_playing = self.is_playing;
        self.is_playing = true;
        self.transport.rewind();

        if bound.is_ok() {
            if let Err(e) = self.engine.set_current_time(0.0) {
                self.report_engine_failure("rewind", &e);
            }
            self.sync_engine_play_state();
        }

        if !was_playing {
            self.pending_events.push(PlaybackEvent::StateChanged {
                state: self.state(),
            });
            self.notify_play_state();
        }

        bound
    }

    /// Bind the track's source unless it is already bound
    fn bind_source(&mut self, track: &Track) -> Result<()> {
        if self.bound_source.as_deref() == Some(track.song_url.as_str()) {
            debug!(track_id = %track.id, "Source already bound, skipping reload");
            return Ok(());
        }

        debug!(track_id = %track.id, source_url = %track.song_url, "Binding source");

        match self.engine.bind(&track.song_url) {
            Ok(()) => {
                self.bound_source = Some(track.song_url.clone());
                self.sync_initial_volume();
                Ok(())
            }
            Err(e) => {
                self.bound_source = None;
                let error = PlaybackError::EngineBind {
                    source_url: track.song_url.clone(),
                    message: e.to_string(),
                };
                warn!(track_id = %track.id, error = %error, "Engine bind failed");
                self.pending_events.push(PlaybackEvent::Error {
                    message: error.to_string(),
                });
                Err(error)
            }
        }
    }

    fn sync_initial_volume(&mut self) {
        if self.volume_synced {
            return;
        }

        match self.engine.set_volume(self.transport.volume()) {
            Ok(()) => self.volume_synced = true,
            Err(e) => self.report_engine_failure("set_volume", &e),
        }
    }

    fn sync_engine_play_state(&mut self) {
        let (action, result) = if self.is_playing {
            ("play", self.engine.play())
        } else {
            ("pause", self.engine.pause())
        };

        if let Err(e) = result {
            self.report_engine_failure(action, &e);
        }
    }

    fn notify_start(&mut self, track: &Track) {
        if let Err(e) = self.surface.start(track, self.is_playing) {
            warn!(track_id = %track.id, error = %e, "Now-playing surface rejected track");
        }
    }

    fn notify_play_state(&mut self) {
        if let Err(e) = self.surface.update_play_state(self.is_playing) {
            warn!(is_playing = self.is_playing, error = %e, "Now-playing surface rejected play state");
        }
    }

    fn report_engine_failure(&mut self, action: &str, error: &PlaybackError) {
        warn!(action, error = %error, "Engine call failed");
        self.pending_events.push(PlaybackEvent::Error {
            message: format!("{action}: {error}"),
        });
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
            position: self.queue.position(),
        });
    }

    fn emit_position_update(&mut self) {
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            position_ms: (self.transport.position_secs() * 1000.0) as u64,
            duration_ms: self
                .transport
                .duration_secs()
                .map(|secs| (secs * 1000.0) as u64),
        });
    }
}
