//! Database connection, schema setup and error mapping using rusqlite.
//!
//! Entity operations live in sibling modules as further `impl Database`
//! blocks: body parts in `body_parts`, exercises in `exercises`, sessions
//! and set logs in `sessions`.

use crate::storage::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};
use chrono::NaiveDate;
use rusqlite::{ffi, Connection, ErrorCode, Result as SqliteResult};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Database file name inside the per-installation data directory.
pub const DATABASE_FILE_NAME: &str = "gym_tracker.sqlite3";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Database wrapper for SQLite operations.
///
/// The connection sits behind a mutex, so one `Database` can be shared
/// across threads (e.g. in an `Arc`). Every operation holds the lock for
/// its full duration.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at the given path.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DatabaseError::StorageUnavailable(format!("{}: {}", parent.display(), e))
                })?;
            }
        }

        let conn = Connection::open(path).map_err(|e| {
            DatabaseError::StorageUnavailable(format!("{}: {}", path.display(), e))
        })?;

        tracing::debug!("Opened database at {}", path.display());
        Self::from_connection(conn)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::StorageUnavailable(e.to_string()))?;

        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, DatabaseError> {
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.initialize()?;

        Ok(db)
    }

    /// Enable foreign keys and bring the schema up to date.
    fn initialize(&self) -> Result<(), DatabaseError> {
        let mut conn = self.conn();

        // Cascades and reference checks depend on this per-connection pragma
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| DatabaseError::StorageUnavailable(e.to_string()))?;

        conn.execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| DatabaseError::StorageUnavailable(e.to_string()))?;

        let current_version = get_schema_version(&conn)?;

        if current_version < CURRENT_VERSION {
            migrate(&mut conn, current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    pub fn schema_version(&self) -> Result<i32, DatabaseError> {
        get_schema_version(&self.conn())
    }

    /// Lock the connection.
    ///
    /// A panic while holding the lock cannot leave a half-applied statement
    /// behind, so a poisoned lock is recovered rather than propagated.
    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` inside one transaction on the locked connection.
    ///
    /// The lock is held until commit. An error from `f` drops the
    /// transaction, which rolls back every write it made.
    pub fn transaction<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, DatabaseError>,
    ) -> Result<T, DatabaseError> {
        let mut conn = self.conn();
        let tx = conn.transaction().map_err(query_failed)?;

        let value = f(&tx)?;

        tx.commit().map_err(query_failed)?;
        Ok(value)
    }
}

fn get_schema_version(conn: &Connection) -> Result<i32, DatabaseError> {
    let result: SqliteResult<i32> = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    );

    match result {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(DatabaseError::StorageUnavailable(e.to_string())),
    }
}

/// Run database migrations.
fn migrate(conn: &mut Connection, from_version: i32) -> Result<(), DatabaseError> {
    if from_version < 1 {
        let tx = conn
            .transaction()
            .map_err(|e| DatabaseError::StorageUnavailable(e.to_string()))?;

        tx.execute_batch(SCHEMA)
            .map_err(|e| DatabaseError::StorageUnavailable(e.to_string()))?;

        tx.execute(
            "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
            [CURRENT_VERSION],
        )
        .map_err(|e| DatabaseError::StorageUnavailable(e.to_string()))?;

        tx.commit()
            .map_err(|e| DatabaseError::StorageUnavailable(e.to_string()))?;

        tracing::info!("Database migrated to version {}", CURRENT_VERSION);
    }

    Ok(())
}

/// Constraint class of a failed write, from SQLite's extended result code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Constraint {
    Unique,
    PrimaryKey,
    ForeignKey,
    Check,
}

pub(crate) fn constraint_kind(err: &rusqlite::Error) -> Option<Constraint> {
    match err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            match e.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE => Some(Constraint::Unique),
                ffi::SQLITE_CONSTRAINT_PRIMARYKEY => Some(Constraint::PrimaryKey),
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(Constraint::ForeignKey),
                ffi::SQLITE_CONSTRAINT_CHECK => Some(Constraint::Check),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Catch-all mapping for driver failures.
pub(crate) fn query_failed(err: rusqlite::Error) -> DatabaseError {
    DatabaseError::StorageError(err.to_string())
}

pub(crate) fn date_to_sql(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn date_from_sql(value: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| DatabaseError::StorageError(format!("Invalid stored date {:?}: {}", value, e)))
}

/// Database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    #[error("Exercise {exercise_id} is already linked to muscle {muscle_id}")]
    DuplicateLink { exercise_id: i64, muscle_id: i64 },

    #[error("Set {set_number} already logged for exercise {exercise_id} in session {session_id}")]
    DuplicateSet {
        session_id: i64,
        exercise_id: i64,
        set_number: i64,
    },

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}
