//! Storage module for the workout database and configuration.

pub mod body_parts;
pub mod config;
pub mod database;
pub mod exercises;
pub mod schema;
pub mod sessions;

pub use body_parts::SeedSummary;
pub use config::{AppConfig, ConfigError};
pub use database::{Database, DatabaseError, DATABASE_FILE_NAME};

/// Open the per-installation database named by `config`, creating the file
/// and schema if needed.
///
/// Failure here is `StorageUnavailable` and should stop startup.
pub fn initialize(config: &AppConfig) -> Result<Database, DatabaseError> {
    let path = config.database_path();
    let db = Database::open(&path)?;

    tracing::info!("Workout store ready at {}", path.display());
    Ok(db)
}
