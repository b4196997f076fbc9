//! The manager for recording, modifying, and retrieving attendance data.

use crate::error::{Error, Result};
use crate::models::{
    AttendanceRecord, Group, NewAttendanceRecord, NewGroup, NewStatusCategory, NewStudent,
    StatusCategory, Student,
};
use crate::recorder::{self, AttendanceEntry};
use crate::schema;
use crate::statistics::{self, StudentStatistics};
use chrono::{Local, NaiveDate};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use dotenvy::dotenv;
use std::env;
use tracing::{debug, info};

/// The labels the status lookup table starts out with.
const DEFAULT_STATUS_LABELS: [&str; 4] = ["Anwesend", "Entschuldigt", "Unentschuldigt", "Krank"];

/// The schema, created in code on `init`.
///
/// There is intentionally no UNIQUE(student_id, date) constraint: one record
/// per student and day is enforced by looking up before writing.
const SCHEMA_DDL: &str = "
    CREATE TABLE IF NOT EXISTS groups (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        label TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS students (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        last_name TEXT NOT NULL,
        first_name TEXT NOT NULL,
        group_id INTEGER NOT NULL REFERENCES groups(id)
    );
    CREATE TABLE IF NOT EXISTS statuses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        label TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS attendance (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id INTEGER NOT NULL REFERENCES students(id),
        date DATE NOT NULL,
        status_id INTEGER NOT NULL REFERENCES statuses(id),
        comment TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_students_group ON students(group_id);
    CREATE INDEX IF NOT EXISTS idx_attendance_student_date ON attendance(student_id, date);
";

/// The manager for all attendance data, owning the `sqlite3` connection.
pub struct AttendanceManager {
    db: SqliteConnection,
}

impl AttendanceManager {
    /// Connects to the `sqlite3` instance located at the `DATABASE_URL`
    /// environment variable (a `.env` file is honored).
    pub fn connect() -> Result<Self> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").map_err(|_| Error::MissingDatabaseUrl)?;
        Self::connect_to(&database_url)
    }

    /// Connects to the `sqlite3` instance at the given location.
    pub fn connect_to(database_url: &str) -> Result<Self> {
        let mut db = SqliteConnection::establish(database_url)?;
        db.batch_execute("PRAGMA foreign_keys = ON;")?;
        Ok(Self { db })
    }

    /// Creates the schema if it does not exist yet.
    pub fn initialize_schema(&mut self) -> Result<()> {
        self.db.batch_execute(SCHEMA_DDL)?;
        Ok(())
    }

    /// Seeds the status lookup table with the canonical labels. Does nothing
    /// if any statuses exist already, so running `init` twice is harmless.
    pub fn seed_statuses(&mut self) -> Result<Vec<StatusCategory>> {
        let existing: i64 = schema::statuses::table.count().get_result(&mut self.db)?;
        if existing == 0 {
            let rows: Vec<NewStatusCategory> = DEFAULT_STATUS_LABELS
                .iter()
                .map(|&label| NewStatusCategory { label })
                .collect();
            diesel::insert_into(schema::statuses::table)
                .values(rows)
                .execute(&mut self.db)?;
            info!("status table seeded");
        }
        self.get_statuses()
    }

    /// Retrieves all groups.
    pub fn get_groups(&mut self) -> Result<Vec<Group>> {
        use schema::groups::dsl::*;

        Ok(groups
            .order_by(id)
            .select(Group::as_select())
            .load(&mut self.db)?)
    }

    /// Retrieves a specific group.
    pub fn get_group(&mut self, group: i32) -> Result<Group> {
        group_by_id(&mut self.db, group)
    }

    /// Retrieves the group with the given label, creating it if necessary.
    pub fn find_or_create_group(&mut self, group_label: &str) -> Result<Group> {
        use schema::groups::dsl::*;

        let found = groups
            .filter(label.eq(group_label))
            .select(Group::as_select())
            .first(&mut self.db)
            .optional()?;
        if let Some(found) = found {
            return Ok(found);
        }

        Ok(diesel::insert_into(schema::groups::table)
            .values(NewGroup { label: group_label })
            .returning(Group::as_returning())
            .get_result(&mut self.db)?)
    }

    /// Retrieves a specific student.
    pub fn get_student(&mut self, student: i32) -> Result<Student> {
        student_by_id(&mut self.db, student)
    }

    /// Retrieves all students of a group, ordered by name.
    pub fn get_students_in_group(&mut self, group: i32) -> Result<Vec<Student>> {
        use schema::students::dsl::*;

        Ok(students
            .filter(group_id.eq(group))
            .order_by((last_name, first_name))
            .select(Student::as_select())
            .load(&mut self.db)?)
    }

    /// Retrieves the whole roster together with each student's group.
    pub fn roster(&mut self) -> Result<Vec<(Student, Group)>> {
        Ok(schema::students::table
            .inner_join(schema::groups::table)
            .order_by((
                schema::students::last_name.asc(),
                schema::students::first_name.asc(),
            ))
            .select((Student::as_select(), Group::as_select()))
            .load(&mut self.db)?)
    }

    /// Inserts a student into the given group.
    pub fn add_student(&mut self, last: &str, first: &str, group: i32) -> Result<Student> {
        let row = NewStudent {
            last_name: last,
            first_name: first,
            group_id: group,
        };
        Ok(diesel::insert_into(schema::students::table)
            .values(row)
            .returning(Student::as_returning())
            .get_result(&mut self.db)?)
    }

    /// Removes and returns a student from the roster.
    pub fn delete_student(&mut self, student: i32) -> Result<Student> {
        use schema::students::dsl::*;

        diesel::delete(students.filter(id.eq(student)))
            .returning(Student::as_returning())
            .get_result(&mut self.db)
            .optional()?
            .ok_or(Error::StudentNotFound(student))
    }

    /// Retrieves all status categories.
    pub fn get_statuses(&mut self) -> Result<Vec<StatusCategory>> {
        use schema::statuses::dsl::*;

        Ok(statuses
            .order_by(id)
            .select(StatusCategory::as_select())
            .load(&mut self.db)?)
    }

    /// Retrieves a specific status category.
    pub fn get_status(&mut self, status: i32) -> Result<StatusCategory> {
        status_by_id(&mut self.db, status)
    }

    /// Looks up the attendance record of a student for one day, if any.
    pub fn find_record_for_day(
        &mut self,
        student: i32,
        day: NaiveDate,
    ) -> Result<Option<AttendanceRecord>> {
        record_for_day(&mut self.db, student, day)
    }

    /// Retrieves a student's full attendance history, oldest first.
    pub fn records_for_student(&mut self, student: i32) -> Result<Vec<AttendanceRecord>> {
        use schema::attendance::dsl::*;

        Ok(attendance
            .filter(student_id.eq(student))
            .order_by(date)
            .select(AttendanceRecord::as_select())
            .load(&mut self.db)?)
    }

    /// Retrieves a group's records in the given date range (inclusive),
    /// joined with student and status for display.
    pub fn records_for_group_between(
        &mut self,
        group: i32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<(AttendanceRecord, Student, StatusCategory)>> {
        group_by_id(&mut self.db, group)?;

        Ok(schema::attendance::table
            .inner_join(schema::students::table)
            .inner_join(schema::statuses::table)
            .filter(schema::students::group_id.eq(group))
            .filter(schema::attendance::date.between(from, to))
            .order_by((
                schema::attendance::date.asc(),
                schema::students::last_name.asc(),
            ))
            .select((
                AttendanceRecord::as_select(),
                Student::as_select(),
                StatusCategory::as_select(),
            ))
            .load(&mut self.db)?)
    }

    /// Records today's submitted entries. See [`Self::record_for_date`].
    pub fn record_today(&mut self, entries: &[AttendanceEntry]) -> Result<Option<i32>> {
        self.record_for_date(Local::now().date_naive(), entries)
    }

    /// Records one day's submitted entries in a single transaction.
    ///
    /// Per entry: resolve student and status, compute the lateness note from
    /// the arrival time, then update the existing record for (student, day)
    /// in place or insert a new one. The first bad entry rolls back the whole
    /// batch; there are no partial writes.
    ///
    /// Returns the group of the last processed entry's student, which callers
    /// use to navigate back to the group they were recording for. `None` for
    /// an empty batch.
    pub fn record_for_date(
        &mut self,
        day: NaiveDate,
        entries: &[AttendanceEntry],
    ) -> Result<Option<i32>> {
        debug!(count = entries.len(), %day, "recording attendance batch");

        let group = self.db.transaction::<_, Error, _>(|conn| {
            let mut last_group = None;
            for entry in entries {
                let student = student_by_id(conn, entry.student_id)?;
                let status = status_by_id(conn, entry.status_id)?;
                let comment = recorder::resolve_comment(entry)?;
                last_group = Some(student.group_id);

                match record_for_day(conn, student.id, day)? {
                    Some(existing) => {
                        diesel::update(
                            schema::attendance::table
                                .filter(schema::attendance::id.eq(existing.id)),
                        )
                        .set((
                            schema::attendance::status_id.eq(status.id),
                            schema::attendance::comment.eq(comment.as_deref()),
                        ))
                        .execute(conn)?;
                    }
                    None => {
                        let record = NewAttendanceRecord {
                            student_id: student.id,
                            date: day,
                            status_id: status.id,
                            comment: comment.as_deref(),
                        };
                        diesel::insert_into(schema::attendance::table)
                            .values(record)
                            .execute(conn)?;
                    }
                }
            }
            Ok(last_group)
        })?;

        info!(count = entries.len(), ?group, "attendance batch stored");
        Ok(group)
    }

    /// Loads a student's full history and computes the aggregate summary.
    ///
    /// A student without records (or an unknown id) yields the all-zero
    /// summary with no student attached.
    pub fn statistics_for_student(&mut self, student: i32) -> Result<StudentStatistics> {
        let history: Vec<(AttendanceRecord, StatusCategory)> = schema::attendance::table
            .inner_join(schema::statuses::table)
            .filter(schema::attendance::student_id.eq(student))
            .order_by(schema::attendance::date.asc())
            .select((AttendanceRecord::as_select(), StatusCategory::as_select()))
            .load(&mut self.db)?;

        let owner = if history.is_empty() {
            None
        } else {
            Some(student_by_id(&mut self.db, student)?)
        };

        Ok(statistics::compute(owner, &history))
    }
}

/// Parses a `YYYY-MM` month into its first and last day.
pub fn month_bounds(month: &str) -> Result<(NaiveDate, NaiveDate)> {
    let invalid = || Error::InvalidMonth(month.to_string());

    let (year_part, month_part) = month.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year_part.parse().map_err(|_| invalid())?;
    let month_num: u32 = month_part.parse().map_err(|_| invalid())?;

    let first = NaiveDate::from_ymd_opt(year, month_num, 1).ok_or_else(invalid)?;
    let next_month = if month_num == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month_num + 1, 1)
    }
    .ok_or_else(invalid)?;
    let last = next_month.pred_opt().ok_or_else(invalid)?;

    Ok((first, last))
}

fn group_by_id(conn: &mut SqliteConnection, group: i32) -> Result<Group> {
    use schema::groups::dsl::*;

    groups
        .filter(id.eq(group))
        .select(Group::as_select())
        .first(conn)
        .optional()?
        .ok_or(Error::GroupNotFound(group))
}

fn student_by_id(conn: &mut SqliteConnection, student: i32) -> Result<Student> {
    use schema::students::dsl::*;

    students
        .filter(id.eq(student))
        .select(Student::as_select())
        .first(conn)
        .optional()?
        .ok_or(Error::StudentNotFound(student))
}

fn status_by_id(conn: &mut SqliteConnection, status: i32) -> Result<StatusCategory> {
    use schema::statuses::dsl::*;

    statuses
        .filter(id.eq(status))
        .select(StatusCategory::as_select())
        .first(conn)
        .optional()?
        .ok_or(Error::StatusNotFound(status))
}

fn record_for_day(
    conn: &mut SqliteConnection,
    student: i32,
    day: NaiveDate,
) -> Result<Option<AttendanceRecord>> {
    use schema::attendance::dsl::*;

    Ok(attendance
        .filter(student_id.eq(student).and(date.eq(day)))
        .select(AttendanceRecord::as_select())
        .first(conn)
        .optional()?)
}
