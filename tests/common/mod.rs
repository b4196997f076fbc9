use klassenbuch::manager::AttendanceManager;
use klassenbuch::recorder::AttendanceEntry;

/// Opens a fresh in-memory database with the schema and seeded statuses.
pub fn empty_manager() -> AttendanceManager {
    let mut manager = AttendanceManager::connect_to(":memory:").expect("open in-memory sqlite");
    manager.initialize_schema().expect("create schema");
    manager.seed_statuses().expect("seed statuses");
    manager
}

/// Looks up a seeded status id by label.
pub fn status_id(manager: &mut AttendanceManager, label: &str) -> i32 {
    manager
        .get_statuses()
        .expect("load statuses")
        .into_iter()
        .find(|status| status.label == label)
        .unwrap_or_else(|| panic!("status {label} not seeded"))
        .id
}

pub fn entry(
    student_id: i32,
    status_id: i32,
    arrival: Option<&str>,
    comment: Option<&str>,
) -> AttendanceEntry {
    AttendanceEntry {
        student_id,
        status_id,
        arrival_time: arrival.map(str::to_string),
        comment: comment.map(str::to_string),
    }
}
