//! Integration tests for opening the on-disk store.

use gym_tracker::storage::config::{load_config_from, save_config_to};
use gym_tracker::{initialize, AppConfig, Database, DatabaseError};

fn config_in(dir: &std::path::Path) -> AppConfig {
    AppConfig {
        data_dir: Some(dir.join("data")),
        ..Default::default()
    }
}

#[test]
fn test_initialize_creates_file_and_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let db = initialize(&config).expect("Failed to initialize store");
    db.seed_reference_data();

    assert!(config.database_path().exists());
    assert_eq!(db.list_body_parts().unwrap().len(), 17);
}

#[test]
fn test_data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    {
        let db = initialize(&config).unwrap();
        db.seed_reference_data();
        let id = db.create_exercise("Bench Press", None).unwrap();
        db.link_exercise_to_muscle(id, 1).unwrap();
    }

    let db = initialize(&config).unwrap();
    let summary = db.seed_reference_data();
    assert_eq!(summary.inserted, 0);
    assert_eq!(summary.existing, 17);
    assert_eq!(summary.failed, 0);
    assert_eq!(db.list_exercises_by_muscle(1).unwrap(), vec!["Bench Press"]);
}

#[test]
fn test_unopenable_location_is_storage_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"file").unwrap();

    let result = Database::open(&blocker.join("nested").join("gym_tracker.sqlite3"));
    assert!(matches!(result, Err(DatabaseError::StorageUnavailable(_))));
}

#[test]
fn test_config_file_selects_database() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let config = AppConfig {
        data_dir: Some(dir.path().to_path_buf()),
        database_file: "fitnessDB.sqlite3".to_string(),
        log_level: "debug".to_string(),
    };
    save_config_to(&config_path, &config).unwrap();

    let loaded = load_config_from(&config_path).unwrap();
    initialize(&loaded).unwrap();

    assert!(dir.path().join("fitnessDB.sqlite3").exists());
}
