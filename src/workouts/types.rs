//! Workout domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A body part / muscle an exercise can target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyPart {
    /// Stable identifier assigned by the application
    pub id: i64,
    /// Display name (unique)
    pub name: String,
}

impl BodyPart {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for BodyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A named, user-created movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Store-assigned identifier
    pub id: i64,
    /// Exercise name (unique)
    pub name: String,
    /// Optional free-form description
    pub description: Option<String>,
}

/// One workout occasion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSession {
    /// Store-assigned identifier
    pub id: i64,
    /// Calendar day of the workout
    pub date: NaiveDate,
}

/// One recorded set within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLog {
    pub id: i64,
    pub session_id: i64,
    pub exercise_id: i64,
    /// 1-based set number, unique per (session, exercise)
    pub set_number: i64,
    pub reps: i64,
    /// Weight in kilograms
    pub weight: f64,
}

/// Input for a single set insert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewWorkoutLog {
    pub session_id: i64,
    pub exercise_id: i64,
    pub set_number: i64,
    pub reps: i64,
    pub weight: f64,
}

impl NewWorkoutLog {
    /// Check the per-set domain constraints.
    pub fn validate(&self) -> Result<(), String> {
        if self.set_number <= 0 {
            return Err(format!("set number must be positive, got {}", self.set_number));
        }
        if self.reps <= 0 {
            return Err(format!("reps must be positive, got {}", self.reps));
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(format!("weight must be a non-negative number, got {}", self.weight));
        }
        Ok(())
    }
}

/// A set joined with its exercise name, as shown for a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedSet {
    pub exercise_name: String,
    pub set_number: i64,
    pub reps: i64,
    pub weight: f64,
}

impl std::fmt::Display for LoggedSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} #{}: {:.1}kg x {} reps",
            self.exercise_name, self.set_number, self.weight, self.reps
        )
    }
}

/// Convert a timestamp to the calendar day a session is filed under.
pub fn session_date<Tz: chrono::TimeZone>(at: &chrono::DateTime<Tz>) -> NaiveDate {
    at.date_naive()
}
