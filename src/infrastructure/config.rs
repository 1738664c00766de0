use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::domain::errors::{CatalogError, CatalogResult};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Runtime settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub page_size: u32,
}

impl Config {
    /// Loads `.env` (if present) and reads settings from the process environment
    ///
    /// # Variables
    /// * `DATABASE_URL` - required
    /// * `DATABASE_MAX_CONNECTIONS` - pool size, defaults to 5
    /// * `CATALOG_PAGE_SIZE` - default page size for listings, defaults to 10
    pub fn from_env() -> CatalogResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> CatalogResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| CatalogError::Config("DATABASE_URL must be set".to_string()))?;

        let max_connections =
            parse_positive(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let page_size = parse_positive(&lookup, "CATALOG_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;

        Ok(Self {
            database_url,
            max_connections,
            page_size,
        })
    }

    /// Opens a connection pool for the configured database
    pub async fn connect(&self) -> CatalogResult<PgPool> {
        tracing::info!(max_connections = self.max_connections, "Connecting to database...");
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.database_url)
            .await?;
        tracing::info!("Database connected successfully");

        Ok(pool)
    }
}

fn parse_positive<F>(lookup: &F, key: &str, default: u32) -> CatalogResult<u32>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(CatalogError::Config(format!(
                "{} must be a positive integer, got {:?}",
                key, raw
            ))),
        },
    }
}
