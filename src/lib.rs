//! Gym Tracker - local workout logging store
//!
//! SQLite persistence for a mobile workout log: fixed body-part reference
//! data, user-created exercises and their targeted body parts, dated
//! workout sessions, and per-set logs. The presentation layer opens one
//! [`Database`] at startup, seeds reference data, and passes the handle to
//! whatever needs it.

pub mod logging;
pub mod storage;
pub mod workouts;

// Re-export commonly used types
pub use storage::{initialize, AppConfig, Database, DatabaseError, SeedSummary};
pub use workouts::{submit_entry, BodyPart, Exercise, ExerciseEntry, LoggedSet, WorkoutSession};
