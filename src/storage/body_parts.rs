//! Body-part reference data: idempotent seeding and listing.

use rusqlite::{params, Connection, OptionalExtension};

use crate::storage::database::{query_failed, Database, DatabaseError};
use crate::workouts::reference::BODY_PARTS;
use crate::workouts::types::BodyPart;

/// Outcome of a seeding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Rows written in this pass
    pub inserted: usize,
    /// Ids that were already present
    pub existing: usize,
    /// Inserts that failed and were skipped
    pub failed: usize,
}

impl Database {
    /// Insert the fixed body-part list, skipping ids already present.
    ///
    /// Safe to call on every start. Individual failures are logged and
    /// skipped, never returned.
    pub fn seed_reference_data(&self) -> SeedSummary {
        self.seed_body_parts(BODY_PARTS)
    }

    /// Seed an arbitrary `(id, name)` list with the same skip-on-conflict rules.
    pub fn seed_body_parts(&self, parts: &[(i64, &str)]) -> SeedSummary {
        let conn = self.conn();
        let mut summary = SeedSummary::default();

        for &(id, name) in parts {
            match seed_one(&conn, id, name) {
                Ok(true) => summary.inserted += 1,
                Ok(false) => {
                    tracing::debug!("Body part with id {} already exists", id);
                    summary.existing += 1;
                }
                Err(e) => {
                    tracing::warn!("Skipping body part {} ({}): {}", id, name, e);
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            inserted = summary.inserted,
            existing = summary.existing,
            failed = summary.failed,
            "Seeded body parts"
        );

        summary
    }

    /// List all body parts, ordered by id.
    pub fn list_body_parts(&self) -> Result<Vec<BodyPart>, DatabaseError> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT id, name FROM muscles ORDER BY id")
            .map_err(query_failed)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(BodyPart {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .map_err(query_failed)?;

        let mut parts = Vec::new();
        for row in rows {
            parts.push(row.map_err(query_failed)?);
        }

        Ok(parts)
    }

    /// Get a body part by id.
    pub fn get_body_part(&self, id: i64) -> Result<Option<BodyPart>, DatabaseError> {
        self.conn()
            .query_row(
                "SELECT id, name FROM muscles WHERE id = ?1",
                params![id],
                |row| {
                    Ok(BodyPart {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(query_failed)
    }
}

/// Returns `Ok(false)` when the id is already present.
fn seed_one(conn: &Connection, id: i64, name: &str) -> rusqlite::Result<bool> {
    let exists = conn
        .query_row("SELECT 1 FROM muscles WHERE id = ?1", params![id], |_| Ok(()))
        .optional()?
        .is_some();

    if exists {
        return Ok(false);
    }

    conn.execute(
        "INSERT INTO muscles (id, name) VALUES (?1, ?2)",
        params![id, name],
    )?;

    Ok(true)
}
