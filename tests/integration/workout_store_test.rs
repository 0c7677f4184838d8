//! Integration tests for the workout store's public contract.

use chrono::NaiveDate;
use gym_tracker::workouts::{submit_entry, ExerciseEntry, LoggedSet, SUGGESTED_EXERCISES};
use gym_tracker::{Database, DatabaseError};
use std::sync::{Arc, Barrier};
use std::thread;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seeded() -> Database {
    let db = Database::open_in_memory().expect("Failed to create database");
    db.seed_reference_data();
    db
}

#[test]
fn test_bench_press_scenario() {
    let db = seeded();

    let bench = db.create_exercise("Bench Press", None).unwrap();
    db.link_exercise_to_muscle(bench, 1).unwrap();
    db.link_exercise_to_muscle(bench, 3).unwrap();

    assert_eq!(db.get_body_part(1).unwrap().unwrap().name, "Chest");
    assert_eq!(db.get_body_part(3).unwrap().unwrap().name, "Shoulders");
    assert_eq!(db.list_exercises_by_muscle(1).unwrap(), vec!["Bench Press"]);

    let session = db.create_workout_session(day(2024, 11, 29)).unwrap();
    db.add_workout_log(session, bench, 1, 8, 60.0).unwrap();

    assert_eq!(
        db.list_workout_logs_for_date(day(2024, 11, 29)).unwrap(),
        vec![LoggedSet {
            exercise_name: "Bench Press".to_string(),
            set_number: 1,
            reps: 8,
            weight: 60.0,
        }]
    );
}

#[test]
fn test_seed_many_times_same_rows() {
    let db = Database::open_in_memory().unwrap();
    db.seed_reference_data();
    let once = db.list_body_parts().unwrap();

    for _ in 0..5 {
        db.seed_reference_data();
    }

    assert_eq!(db.list_body_parts().unwrap(), once);
}

#[test]
fn test_delete_exercise_removes_dependents() {
    let db = seeded();
    let bench = db.create_exercise("Bench Press", None).unwrap();
    db.link_exercise_to_muscle(bench, 1).unwrap();
    let session = db.create_workout_session(day(2024, 11, 29)).unwrap();
    db.add_workout_log(session, bench, 1, 8, 60.0).unwrap();
    db.add_workout_log(session, bench, 2, 8, 60.0).unwrap();

    db.delete_exercise(bench).unwrap();

    assert!(db.list_exercises_by_muscle(1).unwrap().is_empty());
    assert!(db.list_muscles_for_exercise(bench).unwrap().is_empty());
    assert!(db.list_logs_for_session(session).unwrap().is_empty());
    assert!(db
        .list_workout_logs_for_date(day(2024, 11, 29))
        .unwrap()
        .is_empty());
    // Sessions are not owned by the exercise
    assert!(db.get_workout_session(session).unwrap().is_some());
}

#[test]
fn test_boundaries_on_log_values() {
    let db = seeded();
    let pushup = db.create_exercise("Push-up", None).unwrap();
    let session = db.create_workout_session(day(2024, 11, 29)).unwrap();

    assert!(matches!(
        db.add_workout_log(session, pushup, 1, 0, 0.0),
        Err(DatabaseError::InvalidValue(_))
    ));
    assert!(matches!(
        db.add_workout_log(session, pushup, 1, 10, -1.0),
        Err(DatabaseError::InvalidValue(_))
    ));
    db.add_workout_log(session, pushup, 1, 10, 0.0).unwrap();
}

#[test]
fn test_missing_parents_insert_nothing() {
    let db = seeded();
    let squat = db.create_exercise("Squat", None).unwrap();
    let session = db.create_workout_session(day(2024, 11, 29)).unwrap();

    assert!(matches!(
        db.add_workout_log(9_999, squat, 1, 5, 100.0),
        Err(DatabaseError::ForeignKeyViolation(_))
    ));
    assert!(matches!(
        db.add_workout_log(session, 9_999, 1, 5, 100.0),
        Err(DatabaseError::ForeignKeyViolation(_))
    ));
    assert_eq!(db.count_workout_logs().unwrap(), 0);
}

#[test]
fn test_logs_for_date_span_sessions() {
    let db = seeded();
    let squat = db.create_exercise("Squat", None).unwrap();
    let deadlift = db.create_exercise("Deadlift", None).unwrap();

    let morning = db.create_workout_session(day(2024, 11, 29)).unwrap();
    let evening = db.create_workout_session(day(2024, 11, 29)).unwrap();
    db.add_workout_log(morning, squat, 1, 5, 100.0).unwrap();
    db.add_workout_log(evening, deadlift, 1, 3, 140.0).unwrap();

    let names: Vec<String> = db
        .list_workout_logs_for_date(day(2024, 11, 29))
        .unwrap()
        .into_iter()
        .map(|s| s.exercise_name)
        .collect();
    assert_eq!(names, vec!["Squat", "Deadlift"]);
}

#[test]
fn test_suggestion_becomes_exercise_when_logged() {
    let db = seeded();
    assert!(db.list_exercises().unwrap().is_empty());

    let entry = ExerciseEntry::new(SUGGESTED_EXERCISES[2], 3, 5, 80.0).with_body_parts([6, 16]);
    submit_entry(&db, day(2024, 12, 2), &entry).unwrap();

    let exercises = db.list_exercises().unwrap();
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0].name, "Squat");
    assert_eq!(
        db.list_workout_dates(day(2024, 12, 1), day(2024, 12, 7))
            .unwrap(),
        vec![day(2024, 12, 2)]
    );
}

#[test]
fn test_shared_handle_across_threads() {
    let db = Arc::new(seeded());
    let bench = db.create_exercise("Bench Press", None).unwrap();
    let session = db.create_workout_session(day(2024, 11, 29)).unwrap();

    let handles: Vec<_> = (1..=8)
        .map(|set_number| {
            let db = Arc::clone(&db);
            thread::spawn(move || db.add_workout_log(session, bench, set_number, 8, 60.0))
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    assert_eq!(db.list_logs_for_session(session).unwrap().len(), 8);
}

#[test]
fn test_concurrent_submits_share_one_session() {
    for _ in 0..50 {
        let db = Arc::new(seeded());
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let db = Arc::clone(&db);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    submit_entry(
                        &db,
                        day(2024, 11, 29),
                        &ExerciseEntry::new("Squat", 3, 5, 100.0).with_body_parts([6]),
                    )
                })
            })
            .collect();

        let receipts: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap().expect("submit failed"))
            .collect();

        assert_eq!(receipts[0].session_id, receipts[1].session_id);
        assert_eq!(receipts.iter().filter(|r| r.created_session).count(), 1);
        assert_eq!(receipts.iter().filter(|r| r.created_exercise).count(), 1);

        assert_eq!(db.list_workout_sessions_for_date(day(2024, 11, 29)).unwrap().len(), 1);
        assert_eq!(db.count_exercises().unwrap(), 1);

        let numbers: Vec<i64> = db
            .list_workout_logs_for_date(day(2024, 11, 29))
            .unwrap()
            .iter()
            .map(|s| s.set_number)
            .collect();
        assert_eq!(numbers, (1..=6).collect::<Vec<_>>());
    }
}
