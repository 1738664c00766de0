//! Media Catalog Library
//!
//! Data access for a talk and video catalog: published listings, keyword
//! search, slug and relation lookups, visit counting and average ratings,
//! behind a repository port with PostgreSQL and in-memory adapters.

pub mod cli;
pub mod domain;
pub mod infrastructure;
