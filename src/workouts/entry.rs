//! Exercise entry submission.
//!
//! Turns one "log exercise" form (exercise, targeted body parts, sets, reps,
//! weight) into store calls. Session reuse lives here rather than in the
//! store: the first session already filed under the date is appended to,
//! and a new one is created only when the day has none.

use chrono::NaiveDate;

use crate::storage::database::{Database, DatabaseError};
use crate::storage::exercises::{find_exercise_by_name, insert_exercise, insert_link};
use crate::storage::sessions::{
    insert_log, insert_session, next_free_set_number, sessions_for_date,
};
use crate::workouts::types::NewWorkoutLog;

/// Upper bound for the set counter.
pub const MAX_SETS: i64 = 100;
/// Upper bound for the rep counter.
pub const MAX_REPS: i64 = 100;
/// Upper bound for the weight selector, in kilograms.
pub const MAX_WEIGHT_KG: f64 = 500.0;

/// One submitted exercise entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseEntry {
    /// Exercise name; created if unknown
    pub exercise: String,
    /// Description used only when the exercise is created
    pub description: Option<String>,
    /// Body-part ids the exercise targets
    pub body_parts: Vec<i64>,
    /// Number of identical sets to record
    pub sets: i64,
    /// Reps per set
    pub reps: i64,
    /// Weight per set in kilograms
    pub weight_kg: f64,
}

impl ExerciseEntry {
    pub fn new(exercise: impl Into<String>, sets: i64, reps: i64, weight_kg: f64) -> Self {
        Self {
            exercise: exercise.into(),
            description: None,
            body_parts: Vec::new(),
            sets,
            reps,
            weight_kg,
        }
    }

    pub fn with_body_parts(mut self, body_parts: impl IntoIterator<Item = i64>) -> Self {
        self.body_parts = body_parts.into_iter().collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check the entry against the form's input ranges.
    pub fn validate(&self) -> Result<(), DatabaseError> {
        if self.exercise.trim().is_empty() {
            return Err(DatabaseError::InvalidValue(
                "exercise name must not be empty".to_string(),
            ));
        }
        if !(1..=MAX_SETS).contains(&self.sets) {
            return Err(DatabaseError::InvalidValue(format!(
                "sets must be between 1 and {}, got {}",
                MAX_SETS, self.sets
            )));
        }
        if !(1..=MAX_REPS).contains(&self.reps) {
            return Err(DatabaseError::InvalidValue(format!(
                "reps must be between 1 and {}, got {}",
                MAX_REPS, self.reps
            )));
        }
        if !(0.0..=MAX_WEIGHT_KG).contains(&self.weight_kg) {
            return Err(DatabaseError::InvalidValue(format!(
                "weight must be between 0 and {} kg, got {}",
                MAX_WEIGHT_KG, self.weight_kg
            )));
        }
        Ok(())
    }
}

/// What a submission wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReceipt {
    pub session_id: i64,
    pub exercise_id: i64,
    pub created_exercise: bool,
    pub created_session: bool,
    /// Ids of the inserted set logs, in set order
    pub log_ids: Vec<i64>,
    /// Set number of the first inserted set
    pub first_set_number: i64,
}

/// Record an entry for `date`, creating the exercise and session as needed.
///
/// Everything runs in one transaction on the locked connection, so
/// concurrent submissions for the same day serialize and a failure part way
/// through leaves no exercise, link, session or set behind.
pub fn submit_entry(
    db: &Database,
    date: NaiveDate,
    entry: &ExerciseEntry,
) -> Result<EntryReceipt, DatabaseError> {
    entry.validate()?;

    let receipt = db.transaction(|conn| {
        let existing = find_exercise_by_name(conn, &entry.exercise)?;
        let (exercise_id, created_exercise) = match existing {
            Some(exercise) => (exercise.id, false),
            None => (
                insert_exercise(conn, &entry.exercise, entry.description.as_deref())?,
                true,
            ),
        };

        for &muscle_id in &entry.body_parts {
            match insert_link(conn, exercise_id, muscle_id) {
                Ok(()) | Err(DatabaseError::DuplicateLink { .. }) => {}
                Err(e) => return Err(e),
            }
        }

        let (session_id, created_session) = match sessions_for_date(conn, date)?.first() {
            Some(session) => (session.id, false),
            None => (insert_session(conn, date)?, true),
        };

        let first_set_number = next_free_set_number(conn, session_id, exercise_id)?;
        let mut log_ids = Vec::with_capacity(entry.sets as usize);
        for offset in 0..entry.sets {
            log_ids.push(insert_log(
                conn,
                &NewWorkoutLog {
                    session_id,
                    exercise_id,
                    set_number: first_set_number + offset,
                    reps: entry.reps,
                    weight: entry.weight_kg,
                },
            )?);
        }

        Ok(EntryReceipt {
            session_id,
            exercise_id,
            created_exercise,
            created_session,
            log_ids,
            first_set_number,
        })
    })?;

    tracing::info!(
        session_id = receipt.session_id,
        exercise_id = receipt.exercise_id,
        sets = entry.sets,
        "Logged {} on {}",
        entry.exercise.trim(),
        date
    );

    Ok(receipt)
}
