//! Workout sessions and per-set logs.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::storage::database::{
    constraint_kind, date_from_sql, date_to_sql, query_failed, Constraint, Database,
    DatabaseError,
};
use crate::workouts::types::{LoggedSet, NewWorkoutLog, WorkoutLog, WorkoutSession};

impl Database {
    // ========== Workout Session Operations ==========

    /// Create a session for a calendar day and return its id.
    ///
    /// Sessions are never deduplicated by date here; reusing one for the
    /// same day is the caller's decision.
    pub fn create_workout_session(&self, date: NaiveDate) -> Result<i64, DatabaseError> {
        insert_session(&self.conn(), date)
    }

    /// Get a session by id.
    pub fn get_workout_session(&self, id: i64) -> Result<Option<WorkoutSession>, DatabaseError> {
        let row = self
            .conn()
            .query_row(
                "SELECT id, date FROM workout_sessions WHERE id = ?1",
                params![id],
                |row| {
                    Ok(SessionRow {
                        id: row.get(0)?,
                        date: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(query_failed)?;

        row.map(SessionRow::into_session).transpose()
    }

    /// Sessions filed under a date, oldest first.
    pub fn list_workout_sessions_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<WorkoutSession>, DatabaseError> {
        sessions_for_date(&self.conn(), date)
    }

    /// Delete a session and all sets logged in it.
    ///
    /// Returns whether a row was removed; a missing id is not an error.
    pub fn delete_workout_session(&self, id: i64) -> Result<bool, DatabaseError> {
        let rows_affected = self
            .conn()
            .execute("DELETE FROM workout_sessions WHERE id = ?1", params![id])
            .map_err(query_failed)?;

        if rows_affected == 0 {
            tracing::debug!("Delete of workout session {} matched nothing", id);
        }

        Ok(rows_affected > 0)
    }

    /// Count sessions in the database.
    pub fn count_workout_sessions(&self) -> Result<usize, DatabaseError> {
        let count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM workout_sessions", [], |row| row.get(0))
            .map_err(query_failed)?;

        Ok(count as usize)
    }

    // ========== Workout Log Operations ==========

    /// Record one set and return the log id.
    pub fn add_workout_log(
        &self,
        session_id: i64,
        exercise_id: i64,
        set_number: i64,
        reps: i64,
        weight: f64,
    ) -> Result<i64, DatabaseError> {
        self.insert_workout_log(&NewWorkoutLog {
            session_id,
            exercise_id,
            set_number,
            reps,
            weight,
        })
    }

    /// Record one set from a prepared value.
    pub fn insert_workout_log(&self, log: &NewWorkoutLog) -> Result<i64, DatabaseError> {
        insert_log(&self.conn(), log)
    }

    /// Next free set number for an exercise within a session (1 when none).
    pub fn next_set_number(&self, session_id: i64, exercise_id: i64) -> Result<i64, DatabaseError> {
        next_free_set_number(&self.conn(), session_id, exercise_id)
    }

    /// All sets of a session, grouped by exercise then set number.
    pub fn list_logs_for_session(&self, session_id: i64) -> Result<Vec<WorkoutLog>, DatabaseError> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT id, session_id, exercise_id, set_number, reps, weight
                 FROM workout_logs WHERE session_id = ?1
                 ORDER BY exercise_id, set_number",
            )
            .map_err(query_failed)?;

        let rows = stmt
            .query_map(params![session_id], |row| {
                Ok(WorkoutLog {
                    id: row.get(0)?,
                    session_id: row.get(1)?,
                    exercise_id: row.get(2)?,
                    set_number: row.get(3)?,
                    reps: row.get(4)?,
                    weight: row.get(5)?,
                })
            })
            .map_err(query_failed)?;

        let mut logs = Vec::new();
        for row in rows {
            logs.push(row.map_err(query_failed)?);
        }

        Ok(logs)
    }

    /// Every set logged on a date, across all of that day's sessions, in
    /// the order they were recorded.
    pub fn list_workout_logs_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<LoggedSet>, DatabaseError> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT e.name, l.set_number, l.reps, l.weight
                 FROM workout_logs l
                 JOIN workout_sessions s ON s.id = l.session_id
                 JOIN exercises e ON e.id = l.exercise_id
                 WHERE s.date = ?1
                 ORDER BY s.id, l.id",
            )
            .map_err(query_failed)?;

        let rows = stmt
            .query_map(params![date_to_sql(date)], |row| {
                Ok(LoggedSet {
                    exercise_name: row.get(0)?,
                    set_number: row.get(1)?,
                    reps: row.get(2)?,
                    weight: row.get(3)?,
                })
            })
            .map_err(query_failed)?;

        let mut sets = Vec::new();
        for row in rows {
            sets.push(row.map_err(query_failed)?);
        }

        Ok(sets)
    }

    /// Distinct days in `[from, to]` with at least one logged set, ascending.
    pub fn list_workout_dates(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<NaiveDate>, DatabaseError> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT DISTINCT s.date FROM workout_sessions s
                 JOIN workout_logs l ON l.session_id = s.id
                 WHERE s.date BETWEEN ?1 AND ?2
                 ORDER BY s.date",
            )
            .map_err(query_failed)?;

        let rows = stmt
            .query_map(params![date_to_sql(from), date_to_sql(to)], |row| {
                row.get::<_, String>(0)
            })
            .map_err(query_failed)?;

        let mut dates = Vec::new();
        for row in rows {
            dates.push(date_from_sql(&row.map_err(query_failed)?)?);
        }

        Ok(dates)
    }

    /// Count set logs in the database.
    pub fn count_workout_logs(&self) -> Result<usize, DatabaseError> {
        let count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM workout_logs", [], |row| row.get(0))
            .map_err(query_failed)?;

        Ok(count as usize)
    }
}

pub(crate) fn insert_session(conn: &Connection, date: NaiveDate) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO workout_sessions (date) VALUES (?1)",
        params![date_to_sql(date)],
    )
    .map_err(query_failed)?;

    let id = conn.last_insert_rowid();
    tracing::debug!("Created workout session {} for {}", id, date);

    Ok(id)
}

pub(crate) fn sessions_for_date(
    conn: &Connection,
    date: NaiveDate,
) -> Result<Vec<WorkoutSession>, DatabaseError> {
    let mut stmt = conn
        .prepare("SELECT id, date FROM workout_sessions WHERE date = ?1 ORDER BY id")
        .map_err(query_failed)?;

    let rows = stmt
        .query_map(params![date_to_sql(date)], |row| {
            Ok(SessionRow {
                id: row.get(0)?,
                date: row.get(1)?,
            })
        })
        .map_err(query_failed)?;

    let mut sessions = Vec::new();
    for row in rows {
        sessions.push(row.map_err(query_failed)?.into_session()?);
    }

    Ok(sessions)
}

pub(crate) fn insert_log(conn: &Connection, log: &NewWorkoutLog) -> Result<i64, DatabaseError> {
    log.validate().map_err(DatabaseError::InvalidValue)?;

    conn.execute(
        "INSERT INTO workout_logs (session_id, exercise_id, set_number, reps, weight)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            log.session_id,
            log.exercise_id,
            log.set_number,
            log.reps,
            log.weight
        ],
    )
    .map_err(|e| match constraint_kind(&e) {
        Some(Constraint::ForeignKey) => DatabaseError::ForeignKeyViolation(format!(
            "session {} or exercise {} does not exist",
            log.session_id, log.exercise_id
        )),
        Some(Constraint::Unique) => DatabaseError::DuplicateSet {
            session_id: log.session_id,
            exercise_id: log.exercise_id,
            set_number: log.set_number,
        },
        Some(Constraint::Check) => DatabaseError::InvalidValue(e.to_string()),
        _ => query_failed(e),
    })?;

    Ok(conn.last_insert_rowid())
}

pub(crate) fn next_free_set_number(
    conn: &Connection,
    session_id: i64,
    exercise_id: i64,
) -> Result<i64, DatabaseError> {
    let max: Option<i64> = conn
        .query_row(
            "SELECT MAX(set_number) FROM workout_logs
             WHERE session_id = ?1 AND exercise_id = ?2",
            params![session_id, exercise_id],
            |row| row.get(0),
        )
        .map_err(query_failed)?;

    Ok(max.map_or(1, |n| n + 1))
}

/// Intermediate struct for reading session rows from database.
struct SessionRow {
    id: i64,
    date: String,
}

impl SessionRow {
    fn into_session(self) -> Result<WorkoutSession, DatabaseError> {
        Ok(WorkoutSession {
            id: self.id,
            date: date_from_sql(&self.date)?,
        })
    }
}
