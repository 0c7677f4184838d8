//! Fixed reference data.

/// Body parts seeded at startup, keyed by stable id.
///
/// Id 15 is unassigned. Names must stay unique; the store rejects repeats.
pub const BODY_PARTS: &[(i64, &str)] = &[
    (1, "Chest"),
    (2, "Biceps"),
    (3, "Shoulders"),
    (4, "Traps"),
    (5, "Forearms"),
    (6, "Quads"),
    (7, "Abs"),
    (8, "Oblique"),
    (9, "Leg"),
    (10, "Lats"),
    (11, "Upper Back"),
    (12, "Lower Back"),
    (13, "Mid Traps"),
    (14, "Triceps"),
    (16, "Glutes"),
    (17, "Hamstring"),
    (18, "Calves"),
];

/// Exercise names offered as chips before anything has been saved.
/// Not persisted until the user logs one of them.
pub const SUGGESTED_EXERCISES: &[&str] = &["Push-up", "Pull-up", "Squat", "Deadlift", "Bench Press"];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_body_part_ids_are_unique() {
        let ids: HashSet<i64> = BODY_PARTS.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids.len(), BODY_PARTS.len());
        assert_eq!(BODY_PARTS.len(), 17);
        assert!(!ids.contains(&15));
    }

    #[test]
    fn test_body_part_names_are_unique() {
        let names: HashSet<&str> = BODY_PARTS.iter().map(|(_, name)| *name).collect();
        assert_eq!(names.len(), BODY_PARTS.len());
    }
}
