/// Library domain type
use crate::error::{CoreError, Result};
use crate::types::{Track, TrackId};
use serde::{Deserialize, Serialize};

/// Ordered collection of every track available to the user
///
/// Populated by a catalog fetch and otherwise append-only, so indices stay
/// stable for the lifetime of a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Library {
    tracks: Vec<Track>,
}

impl Library {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog payload (JSON array of tracks)
    ///
    /// Rejects entries without an id or a playable source.
    pub fn from_json(json: &str) -> Result<Self> {
        let tracks: Vec<Track> = serde_json::from_str(json)?;

        if let Some((index, _)) = tracks
            .iter()
            .enumerate()
            .find(|(_, t)| t.id.as_str().is_empty() || t.song_url.is_empty())
        {
            return Err(CoreError::invalid_input(format!(
                "catalog entry {index} has no id or source URL"
            )));
        }

        Ok(Self { tracks })
    }

    /// Append a track, returning its index
    pub fn push(&mut self, track: Track) -> usize {
        self.tracks.push(track);
        self.tracks.len() - 1
    }

    /// Index of the first track with `id`
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    /// Index of `track`, appending it first if the library doesn't hold it yet
    pub fn resolve(&mut self, track: &Track) -> usize {
        match self.position_of(&track.id) {
            Some(index) => index,
            None => self.push(track.clone()),
        }
    }

    /// Get track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All tracks in library order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Iterate in library order
    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if library is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Replace the whole contents (fresh fetch)
    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
    }

    /// Remove every track
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Consume into the underlying tracks
    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }
}

impl From<Vec<Track>> for Library {
    fn from(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }
}

impl<'a> IntoIterator for &'a Library {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_track(id: &str) -> Track {
        Track::new(id, format!("Track {}", id), "Test Artist", format!("https://cdn/{}.mp3", id))
    }

    #[test]
    fn push_returns_index() {
        let mut library = Library::new();
        assert_eq!(library.push(create_test_track("a")), 0);
        assert_eq!(library.push(create_test_track("b")), 1);
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn resolve_existing_track_does_not_append() {
        let mut library = Library::from(vec![create_test_track("a"), create_test_track("b")]);
        let index = library.resolve(&create_test_track("b"));
        assert_eq!(index, 1);
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn resolve_missing_track_appends_once() {
        let mut library = Library::from(vec![create_test_track("a")]);
        let y = create_test_track("y");

        assert_eq!(library.resolve(&y), 1);
        assert_eq!(library.resolve(&y), 1);
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn from_json_reads_catalog_payload() {
        let library = Library::from_json(
            r#"[{"_id":"1","title":"A","artist":["X","Y"],"songUrl":"https://cdn/1.mp3"}]"#,
        )
        .unwrap();

        assert_eq!(library.len(), 1);
        assert_eq!(library.tracks()[0].artist_display(), "X, Y");
    }

    #[test]
    fn from_json_accepts_entries_with_both_ids() {
        let library = Library::from_json(
            r#"[{"_id":"1","id":"1","title":"A","artist":"X","songUrl":"https://cdn/1.mp3"}]"#,
        )
        .unwrap();

        assert_eq!(library.len(), 1);
        assert_eq!(library.tracks()[0].id, TrackId::new("1"));
    }

    #[test]
    fn from_json_treats_null_display_fields_as_empty() {
        let library = Library::from_json(
            r#"[
                {"_id":"1","title":null,"artist":null,"coverUrl":null,"songUrl":"https://cdn/1.mp3"},
                {"_id":"2","title":"B","artist":"Y","songUrl":"https://cdn/2.mp3","duration":null}
            ]"#,
        )
        .unwrap();

        assert_eq!(library.len(), 2);
        let first = &library.tracks()[0];
        assert_eq!(first.title, "");
        assert_eq!(first.artist_display(), "");
        assert!(first.cover_url.is_empty());
        assert!(library.tracks()[1].duration().is_none());
    }

    #[test]
    fn from_json_rejects_entries_without_id() {
        let result = Library::from_json(r#"[{"title":"A","songUrl":"https://cdn/1.mp3"}]"#);
        assert!(matches!(result, Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn from_json_rejects_unplayable_entries() {
        let result = Library::from_json(r#"[{"_id":"1","title":"A","songUrl":""}]"#);
        assert!(matches!(result, Err(CoreError::InvalidInput(_))));

        let result = Library::from_json("{not json");
        assert!(matches!(result, Err(CoreError::Serialization(_))));
    }

    #[test]
    fn position_of_missing() {
        let library = Library::from(vec![create_test_track("a")]);
        assert!(library.position_of(&TrackId::new("zzz")).is_none());
    }
}
