//! Per-student attendance aggregation.

use crate::models::{AttendanceRecord, StatusCategory, StatusKind, Student};

/// Aggregate attendance summary for one student.
///
/// `student` is `None` when no records exist; callers treat that as the
/// no-data signal rather than an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StudentStatistics {
    pub student: Option<Student>,
    /// Share of Present records over all records, in percent. Unrounded;
    /// rounding is a presentation concern.
    pub attendance_rate: f64,
    pub excused: usize,
    pub unexcused: usize,
    pub sick: usize,
    /// Records whose comment mentions "verspätung", case-insensitively.
    /// Counted across all status categories.
    pub late: usize,
}

/// Computes the all-time summary from a student's full attendance history.
///
/// One pass over the records: bucket by status kind, count lateness notes in
/// comments. An empty history yields the all-zero summary with no student.
pub fn compute(
    student: Option<Student>,
    history: &[(AttendanceRecord, StatusCategory)],
) -> StudentStatistics {
    let total = history.len();
    if total == 0 {
        return StudentStatistics::default();
    }

    let mut present = 0usize;
    let mut excused = 0usize;
    let mut unexcused = 0usize;
    let mut sick = 0usize;
    let mut late = 0usize;

    for (record, status) in history {
        match status.kind() {
            StatusKind::Present => present += 1,
            StatusKind::Excused => excused += 1,
            StatusKind::Unexcused => unexcused += 1,
            StatusKind::Sick => sick += 1,
            StatusKind::Other => {}
        }
        let comment = record.comment.as_deref().unwrap_or("");
        if comment.to_lowercase().contains("verspätung") {
            late += 1;
        }
    }

    StudentStatistics {
        student,
        attendance_rate: present as f64 / total as f64 * 100.0,
        excused,
        unexcused,
        sick,
        late,
    }
}
