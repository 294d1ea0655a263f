//! Mellow Player Core
//!
//! Platform-agnostic domain types, search and error handling for Mellow Player.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `ArtistCredit`, `Library`
//! - **Search**: `SubstringIndex` over track title/artist fields
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use mellow_core::{Library, SearchField, SubstringIndex, Track, TrackIndex};
//!
//! let mut library = Library::new();
//! library.push(Track::new("t1", "Tum Hi Ho", "Arijit Singh", "https://cdn/t1.mp3"));
//! library.push(Track::new("t2", "Kal Ho Naa Ho", "Sonu Nigam", "https://cdn/t2.mp3"));
//!
//! let index = SubstringIndex::build(library.tracks(), &[SearchField::Title, SearchField::Artist]);
//! let hits = index.query("arijit", 10);
//! assert_eq!(hits.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod search;
pub mod types;

pub use error::{CoreError, Result};
pub use search::{SearchField, SubstringIndex, TrackIndex};
pub use types::{ArtistCredit, Library, Track, TrackId};
