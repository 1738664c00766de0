// Repository implementations (data access layer)
// Adapters that implement the domain repository port

pub mod in_memory_media_repository;
pub mod postgres_media_repository;

pub use in_memory_media_repository::{CatalogEntry, InMemoryMediaRepository};
pub use postgres_media_repository::PostgresMediaRepository;
