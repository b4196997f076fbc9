use crate::schema::{attendance, groups, statuses, students};
use chrono::NaiveDate;
use diesel::prelude::*;

/// A cohort of students tracked together, e.g. a class.
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = groups)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Group {
    pub id: i32,
    pub label: String,
}

#[derive(Insertable)]
#[diesel(table_name = groups)]
pub struct NewGroup<'a> {
    pub label: &'a str,
}

#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Student {
    pub id: i32,
    pub last_name: String,
    pub first_name: String,
    pub group_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = students)]
pub struct NewStudent<'a> {
    pub last_name: &'a str,
    pub first_name: &'a str,
    pub group_id: i32,
}

/// A named attendance outcome from the lookup table. Labels are free text;
/// the canonical rows are "Anwesend", "Entschuldigt", "Unentschuldigt" and
/// "Krank", but more can be added administratively.
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = statuses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StatusCategory {
    pub id: i32,
    pub label: String,
}

#[derive(Insertable)]
#[diesel(table_name = statuses)]
pub struct NewStatusCategory<'a> {
    pub label: &'a str,
}

impl StatusCategory {
    pub fn kind(&self) -> StatusKind {
        StatusKind::from_label(&self.label)
    }
}

/// Closed set of attendance outcomes behind the free-text labels.
///
/// Aggregation buckets by kind instead of matching raw strings all over the
/// place. Labels outside the canonical four map to [`StatusKind::Other`] and
/// stay out of the named buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Present,
    Excused,
    Unexcused,
    Sick,
    Other,
}

impl StatusKind {
    /// Maps a stored label to its kind. The match is exact, no normalization.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Anwesend" => StatusKind::Present,
            "Entschuldigt" => StatusKind::Excused,
            "Unentschuldigt" => StatusKind::Unexcused,
            "Krank" => StatusKind::Sick,
            _ => StatusKind::Other,
        }
    }
}

/// One (student, date) attendance entry with status and optional comment.
///
/// The application keeps at most one record per student and date by looking
/// up before writing; there is no uniqueness constraint in the schema.
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = attendance)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AttendanceRecord {
    pub id: i32,
    pub student_id: i32,
    pub date: NaiveDate,
    pub status_id: i32,
    pub comment: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = attendance)]
pub struct NewAttendanceRecord<'a> {
    pub student_id: i32,
    pub date: NaiveDate,
    pub status_id: i32,
    pub comment: Option<&'a str>,
}
