//! Library search
//!
//! The library filter treats search as a pure function: build an index over a
//! set of tracks once, then query it with a term and a result limit. The
//! bundled `SubstringIndex` does case-insensitive substring matching; fuzzier
//! implementations can sit behind the same `TrackIndex` trait.

use crate::types::Track;

/// Track field included in an index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    /// Track title
    Title,

    /// Artist display string
    Artist,
}

impl SearchField {
    fn extract(self, track: &Track) -> String {
        match self {
            Self::Title => track.title.clone(),
            Self::Artist => track.artist_display(),
        }
    }
}

/// Queryable track index
pub trait TrackIndex {
    /// Tracks matching `term`, in index order, at most `limit` of them
    fn query(&self, term: &str, limit: usize) -> Vec<Track>;
}

/// Case-insensitive substring index
#[derive(Debug, Clone, Default)]
pub struct SubstringIndex {
    entries: Vec<(Track, Vec<String>)>,
}

impl SubstringIndex {
    /// Build an index over `tracks` using the given fields
    pub fn build(tracks: &[Track], fields: &[SearchField]) -> Self {
        let entries = tracks
            .iter()
            .map(|track| {
                let haystacks = fields
                    .iter()
                    .map(|field| field.extract(track).to_lowercase())
                    .collect();
                (track.clone(), haystacks)
            })
            .collect();

        Self { entries }
    }

    /// Number of indexed tracks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TrackIndex for SubstringIndex {
    fn query(&self, term: &str, limit: usize) -> Vec<Track> {
        let needle = term.trim().to_lowercase();

        self.entries
            .iter()
            .filter(|(_, haystacks)| {
                needle.is_empty() || haystacks.iter().any(|h| h.contains(&needle))
            })
            .map(|(track, _)| track.clone())
            .take(limit)
            .collect()
    }
}
