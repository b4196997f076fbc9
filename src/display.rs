use crate::error::Result;
use crate::manager::{AttendanceManager, month_bounds};
use chrono::{Local, NaiveDate};
use tabled::{Table, Tabled, settings::Style};

/// Pretty prints all groups.
pub fn show_groups(manager: &mut AttendanceManager) -> Result<()> {
    #[derive(Tabled)]
    struct GroupRow {
        id: i32,
        label: String,
    }

    let rows: Vec<GroupRow> = manager
        .get_groups()?
        .into_iter()
        .map(|group| GroupRow {
            id: group.id,
            label: group.label,
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("Groups:\n{table}");

    Ok(())
}

/// Pretty prints all status categories.
pub fn show_statuses(manager: &mut AttendanceManager) -> Result<()> {
    #[derive(Tabled)]
    struct StatusRow {
        id: i32,
        label: String,
    }

    let rows: Vec<StatusRow> = manager
        .get_statuses()?
        .into_iter()
        .map(|status| StatusRow {
            id: status.id,
            label: status.label,
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("Status categories:\n{table}");

    Ok(())
}

/// Pretty prints the students of a group.
pub fn show_roster(manager: &mut AttendanceManager, group_id: i32) -> Result<()> {
    #[derive(Tabled)]
    struct StudentRow {
        id: i32,
        last_name: String,
        first_name: String,
    }

    let group = manager.get_group(group_id)?;
    let rows: Vec<StudentRow> = manager
        .get_students_in_group(group_id)?
        .into_iter()
        .map(|student| StudentRow {
            id: student.id,
            last_name: student.last_name,
            first_name: student.first_name,
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("Roster of group {}:\n{table}", group.label);

    Ok(())
}

/// Pretty prints a group's attendance records for one month.
///
/// `month` is `YYYY-MM`; when absent the current month is shown.
pub fn show_month_sheet(
    manager: &mut AttendanceManager,
    group_id: i32,
    month: Option<&str>,
) -> Result<()> {
    #[derive(Tabled)]
    struct SheetRow {
        date: NaiveDate,
        student: String,
        status: String,
        comment: String,
    }

    let month = match month {
        Some(month) => month.to_string(),
        None => Local::now().date_naive().format("%Y-%m").to_string(),
    };
    let (from, to) = month_bounds(&month)?;

    let group = manager.get_group(group_id)?;
    let rows: Vec<SheetRow> = manager
        .records_for_group_between(group_id, from, to)?
        .into_iter()
        .map(|(record, student, status)| SheetRow {
            date: record.date,
            student: format!("{} {}", student.first_name, student.last_name),
            status: status.label,
            comment: record.comment.unwrap_or_default(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("Attendance of group {} in {month}:\n{table}", group.label);

    Ok(())
}

/// Pretty prints the aggregate statistics of one student.
pub fn show_student_statistics(manager: &mut AttendanceManager, student_id: i32) -> Result<()> {
    #[derive(Tabled)]
    struct StatsRow {
        student: String,
        attendance: String,
        excused: usize,
        unexcused: usize,
        sick: usize,
        late: usize,
    }

    let stats = manager.statistics_for_student(student_id)?;
    let Some(student) = &stats.student else {
        println!("No attendance recorded for student {student_id}.");
        return Ok(());
    };

    let row = StatsRow {
        student: format!("{} {}", student.first_name, student.last_name),
        attendance: format!("{:.1} %", stats.attendance_rate),
        excused: stats.excused,
        unexcused: stats.unexcused,
        sick: stats.sick,
        late: stats.late,
    };

    let mut table = Table::new(vec![row]);
    table.with(Style::modern());
    println!("Statistics:\n{table}");

    Ok(())
}
