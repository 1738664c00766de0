// Repository ports for the domain layer

pub mod media_repository;

pub use media_repository::MediaRepository;
