//! User-curated play queue
//!
//! The queue is a flat ordered list with a position pointer:
//!
//! ```text
//!   [ a, b, (c), d, e ]      position = 2
//!          ^ history   ^ upcoming
//! ```
//!
//! Navigation wraps in both directions. Shuffle never permutes the list;
//! it only changes how `advance` picks the next position. The pre-shuffle
//! order is kept as a snapshot so turning shuffle off is deterministic.

use crate::error::{PlaybackError, Result};
use crate::random::{index_excluding, RandomSource, ThreadRandom};
use crate::types::{AddMode, QueueInfo};
use mellow_core::{Track, TrackId};
use std::fmt;
use tracing::debug;

/// Queue with a current position and shuffle state
///
/// Invariant: `position < tracks.len()` whenever the queue is non-empty,
/// and `position == 0` when it is empty.
pub struct QueueSession {
    /// Live order
    tracks: Vec<Track>,

    /// Index of the current entry
    position: usize,

    /// Whether `advance` picks randomly
    shuffle_active: bool,

    /// Order to restore when shuffle turns off
    saved_order: Vec<Track>,

    random: Box<dyn RandomSource>,
}

impl QueueSession {
    /// Create an empty queue using the thread RNG for shuffle
    pub fn new() -> Self {
        Self::with_random(Box::new(ThreadRandom))
    }

    /// Create an empty queue with an injected random source
    pub fn with_random(random: Box<dyn RandomSource>) -> Self {
        Self {
            tracks: Vec::new(),
            position: 0,
            shuffle_active: false,
            saved_order: Vec::new(),
            random,
        }
    }

    /// Add tracks according to `mode`
    ///
    /// List order is preserved. Pass `[track]` for a single track.
    pub fn add<I>(&mut self, tracks: I, mode: AddMode)
    where
        I: IntoIterator<Item = Track>,
    {
        let incoming: Vec<Track> = tracks.into_iter().collect();
        if incoming.is_empty() {
            return;
        }

        let count = incoming.len();
        let anchor = self.tracks.get(self.position).map(|t| t.id.clone());

        match mode {
            AddMode::End => {
                self.tracks.extend(incoming.iter().cloned());
            }
            AddMode::Next | AddMode::Now => {
                let at = if self.tracks.is_empty() {
                    0
                } else {
                    self.position + 1
                };
                self.tracks.splice(at..at, incoming.iter().cloned());

                if mode == AddMode::Now {
                    self.position = at;
                }
            }
        }

        if self.shuffle_active {
            self.mirror_into_saved_order(incoming, mode, anchor.as_ref());
        } else {
            self.saved_order.clone_from(&self.tracks);
        }

        debug!(
            added = count,
            ?mode,
            length = self.tracks.len(),
            position = self.position,
            "Queue add"
        );
    }

    /// Keep tracks added under shuffle so they survive the restore
    fn mirror_into_saved_order(&mut self, incoming: Vec<Track>, mode: AddMode, anchor: Option<&TrackId>) {
        let at = match (mode, anchor) {
            (AddMode::End, _) | (_, None) => self.saved_order.len(),
            (_, Some(id)) => self
                .saved_order
                .iter()
                .position(|t| &t.id == id)
                .map_or(self.saved_order.len(), |i| i + 1),
        };
        self.saved_order.splice(at..at, incoming);
    }

    /// Remove the first entry matching `track_id`
    ///
    /// Keeps `position` on the same logical track when an earlier entry is
    /// removed. Removing the current entry leaves `position` on whichever
    /// track slid into the slot, clamped to the new tail.
    pub fn remove(&mut self, track_id: &TrackId) -> Option<Track> {
        let index = self.tracks.iter().position(|t| &t.id == track_id)?;
        let removed = self.tracks.remove(index);

        if self.tracks.is_empty() {
            self.position = 0;
        } else if index < self.position {
            self.position -= 1;
        } else if index == self.position && self.position >= self.tracks.len() {
            self.position = self.tracks.len() - 1;
        }

        if let Some(saved) = self.saved_order.iter().position(|t| &t.id == track_id) {
            self.saved_order.remove(saved);
        }

        debug!(track_id = %track_id, position = self.position, "Queue remove");
        Some(removed)
    }

    /// Move to the next entry
    ///
    /// Shuffled: any index other than the current one, uniformly. A queue of
    /// one stays where it is. Otherwise wraps to the start after the tail.
    pub fn advance(&mut self) -> Option<&Track> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }

        if self.shuffle_active {
            if len > 1 {
                self.position = index_excluding(self.random.as_mut(), len, self.position);
            }
        } else {
            self.position = (self.position + 1) % len;
        }

        self.tracks.get(self.position)
    }

    /// Move to the previous entry
    ///
    /// Always linear, even while shuffled, so "previous" stays predictable.
    pub fn retreat(&mut self) -> Option<&Track> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }

        self.position = (self.position + len - 1) % len;
        self.tracks.get(self.position)
    }

    /// Jump to the first entry matching `track_id`
    pub fn set_position_by_track_id(&mut self, track_id: &TrackId) -> Option<&Track> {
        let index = self.tracks.iter().position(|t| &t.id == track_id)?;
        self.position = index;
        self.tracks.get(index)
    }

    /// Flip shuffle, returning the new state
    ///
    /// Turning off restores the pre-shuffle order and relocates `position` to
    /// wherever the current track sits in it (or 0 if it is gone).
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle_active = !self.shuffle_active;

        if self.shuffle_active {
            self.saved_order.clone_from(&self.tracks);
        } else {
            let current = self.current().map(|t| t.id.clone());
            self.tracks.clone_from(&self.saved_order);
            self.position = current
                .and_then(|id| self.tracks.iter().position(|t| t.id == id))
                .unwrap_or(0);
        }

        debug!(shuffle = self.shuffle_active, position = self.position, "Queue shuffle toggled");
        self.shuffle_active
    }

    /// Move one entry from `from_index` to `to_index`
    ///
    /// `position` keeps referencing the same logical track.
    pub fn reorder(&mut self, from_index: usize, to_index: usize) -> Result<()> {
        let len = self.tracks.len();
        for index in [from_index, to_index] {
            if index >= len {
                return Err(PlaybackError::IndexOutOfBounds { index, len });
            }
        }

        if from_index == to_index {
            return Ok(());
        }

        let track = self.tracks.remove(from_index);
        self.tracks.insert(to_index, track);

        if from_index == self.position {
            self.position = to_index;
        } else if from_index < self.position && to_index >= self.position {
            self.position -= 1;
        } else if from_index > self.position && to_index <= self.position {
            self.position += 1;
        }

        if !self.shuffle_active {
            self.saved_order.clone_from(&self.tracks);
        }

        Ok(())
    }

    /// Empty the queue
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.saved_order.clear();
        self.position = 0;
    }

    /// Independent copy of the contents
    pub fn snapshot(&self) -> Vec<Track> {
        self.tracks.clone()
    }

    /// Track at the current position
    pub fn current(&self) -> Option<&Track> {
        self.tracks.get(self.position)
    }

    /// Current position (0 when empty)
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of queued tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Check if queue shuffle is active
    pub fn is_shuffled(&self) -> bool {
        self.shuffle_active
    }

    /// Check whether a track is queued
    pub fn contains(&self, track_id: &TrackId) -> bool {
        self.tracks.iter().any(|t| &t.id == track_id)
    }

    /// Queue contents with neighbours of the current position
    pub fn info(&self) -> QueueInfo {
        let previous = self
            .position
            .checked_sub(1)
            .and_then(|i| self.tracks.get(i))
            .cloned();

        QueueInfo {
            tracks: self.snapshot(),
            position: self.position,
            current: self.current().cloned(),
            next: self.tracks.get(self.position + 1).cloned(),
            previous,
            shuffle_active: self.shuffle_active,
        }
    }
}

impl Default for QueueSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QueueSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueSession")
            .field("tracks", &self.tracks.iter().map(|t| t.id.as_str()).collect::<Vec<_>>())
            .field("position", &self.position)
            .field("shuffle_active", &self.shuffle_active)
            .finish_non_exhaustive()
    }
}
