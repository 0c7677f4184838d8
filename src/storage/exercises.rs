//! Exercise CRUD and exercise-to-muscle links.

use rusqlite::{params, Connection, OptionalExtension};

use crate::storage::database::{constraint_kind, query_failed, Constraint, Database, DatabaseError};
use crate::workouts::types::{BodyPart, Exercise};

impl Database {
    // ========== Exercise Operations ==========

    /// Create an exercise and return its id.
    ///
    /// The name is trimmed before storing; an empty name is rejected.
    pub fn create_exercise(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<i64, DatabaseError> {
        insert_exercise(&self.conn(), name, description)
    }

    /// Get an exercise by id.
    pub fn get_exercise(&self, id: i64) -> Result<Option<Exercise>, DatabaseError> {
        self.conn()
            .query_row(
                "SELECT id, name, description FROM exercises WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Exercise {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        description: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(query_failed)
    }

    /// Get an exercise by its exact (trimmed) name.
    pub fn get_exercise_by_name(&self, name: &str) -> Result<Option<Exercise>, DatabaseError> {
        find_exercise_by_name(&self.conn(), name)
    }

    /// List all exercises in creation order.
    pub fn list_exercises(&self) -> Result<Vec<Exercise>, DatabaseError> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT id, name, description FROM exercises ORDER BY id")
            .map_err(query_failed)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(Exercise {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                })
            })
            .map_err(query_failed)?;

        let mut exercises = Vec::new();
        for row in rows {
            exercises.push(row.map_err(query_failed)?);
        }

        Ok(exercises)
    }

    /// Delete an exercise, its muscle links and every set logged for it.
    ///
    /// Returns whether a row was removed; a missing id is not an error.
    pub fn delete_exercise(&self, id: i64) -> Result<bool, DatabaseError> {
        let rows_affected = self
            .conn()
            .execute("DELETE FROM exercises WHERE id = ?1", params![id])
            .map_err(query_failed)?;

        if rows_affected == 0 {
            tracing::debug!("Delete of exercise {} matched nothing", id);
        }

        Ok(rows_affected > 0)
    }

    /// Count exercises in the database.
    pub fn count_exercises(&self) -> Result<usize, DatabaseError> {
        let count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM exercises", [], |row| row.get(0))
            .map_err(query_failed)?;

        Ok(count as usize)
    }

    // ========== Exercise-Muscle Links ==========

    /// Record that an exercise targets a body part.
    ///
    /// Re-linking an existing pair fails with `DuplicateLink`; callers that
    /// treat re-selection as harmless can match on it.
    pub fn link_exercise_to_muscle(
        &self,
        exercise_id: i64,
        muscle_id: i64,
    ) -> Result<(), DatabaseError> {
        insert_link(&self.conn(), exercise_id, muscle_id)
    }

    /// Names of exercises linked to a muscle, in exercise creation order.
    ///
    /// Unknown or unlinked muscles yield an empty list.
    pub fn list_exercises_by_muscle(&self, muscle_id: i64) -> Result<Vec<String>, DatabaseError> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT e.name FROM exercises e
                 JOIN exercise_muscles em ON em.exercise_id = e.id
                 WHERE em.muscle_id = ?1
                 ORDER BY e.id",
            )
            .map_err(query_failed)?;

        let rows = stmt
            .query_map(params![muscle_id], |row| row.get(0))
            .map_err(query_failed)?;

        let mut names = Vec::new();
        for row in rows {
            names.push(row.map_err(query_failed)?);
        }

        Ok(names)
    }

    /// Body parts an exercise is linked to, ordered by id.
    pub fn list_muscles_for_exercise(
        &self,
        exercise_id: i64,
    ) -> Result<Vec<BodyPart>, DatabaseError> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT m.id, m.name FROM muscles m
                 JOIN exercise_muscles em ON em.muscle_id = m.id
                 WHERE em.exercise_id = ?1
                 ORDER BY m.id",
            )
            .map_err(query_failed)?;

        let rows = stmt
            .query_map(params![exercise_id], |row| {
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
}

pub(crate) fn insert_exercise(
    conn: &Connection,
    name: &str,
    description: Option<&str>,
) -> Result<i64, DatabaseError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DatabaseError::InvalidValue(
            "exercise name must not be empty".to_string(),
        ));
    }

    conn.execute(
        "INSERT INTO exercises (name, description) VALUES (?1, ?2)",
        params![name, description],
    )
    .map_err(|e| match constraint_kind(&e) {
        Some(Constraint::Unique) => DatabaseError::DuplicateName(name.to_string()),
        _ => query_failed(e),
    })?;

    let id = conn.last_insert_rowid();
    tracing::debug!("Created exercise {} ({})", id, name);

    Ok(id)
}

pub(crate) fn find_exercise_by_name(
    conn: &Connection,
    name: &str,
) -> Result<Option<Exercise>, DatabaseError> {
    conn.query_row(
        "SELECT id, name, description FROM exercises WHERE name = ?1",
        params![name.trim()],
        |row| {
            Ok(Exercise {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
            })
        },
    )
    .optional()
    .map_err(query_failed)
}

pub(crate) fn insert_link(
    conn: &Connection,
    exercise_id: i64,
    muscle_id: i64,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO exercise_muscles (exercise_id, muscle_id) VALUES (?1, ?2)",
        params![exercise_id, muscle_id],
    )
    .map_err(|e| match constraint_kind(&e) {
        Some(Constraint::PrimaryKey | Constraint::Unique) => DatabaseError::DuplicateLink {
            exercise_id,
            muscle_id,
        },
        Some(Constraint::ForeignKey) => DatabaseError::ForeignKeyViolation(format!(
            "exercise {} or muscle {} does not exist",
            exercise_id, muscle_id
        )),
        _ => query_failed(e),
    })?;

    Ok(())
}
