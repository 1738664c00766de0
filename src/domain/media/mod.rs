// Media domain module
// Contains the media entity, its relations, status and ordering rules

#![allow(clippy::module_inception)]

pub mod media;
pub mod ordering;
pub mod value_objects;

// Re-export main types for convenience
pub use media::{Category, Media, MediaType, Rating, Speaker, Tag};
pub use ordering::{MediaOrdering, OrderingError, SortDirection, SortField};
pub use value_objects::MediaStatus;
