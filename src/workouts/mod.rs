//! Workout domain: entity types, fixed reference data, entry submission.

pub mod entry;
pub mod reference;
pub mod types;

pub use entry::{submit_entry, EntryReceipt, ExerciseEntry};
pub use reference::{BODY_PARTS, SUGGESTED_EXERCISES};
pub use types::{
    session_date, BodyPart, Exercise, LoggedSet, NewWorkoutLog, WorkoutLog, WorkoutSession,
};
