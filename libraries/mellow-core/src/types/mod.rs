//! Domain types

mod ids;
mod library;
mod track;

pub use ids::TrackId;
pub use library::Library;
pub use track::{ArtistCredit, Track};
