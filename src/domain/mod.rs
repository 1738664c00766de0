// Domain layer module exports
// Entities, value objects and the repository port for the media catalog.
// Domain is independent of infrastructure concerns

pub mod errors;
pub mod media;
pub mod pagination;
pub mod repositories;

pub use errors::{CatalogError, CatalogResult};
