//! Integration test modules.

mod initialize_test;
mod workout_store_test;
