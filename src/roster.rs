//! CSV roster import and synchronization.
//!
//! Roster files carry one student per line with a
//! `last_name,first_name,group` header. Groups are created on demand by
//! label.

use crate::error::Result;
use crate::manager::AttendanceManager;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// One line of a roster CSV.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RosterRow {
    pub last_name: String,
    pub first_name: String,
    pub group: String,
}

/// Reads a roster CSV from disk.
pub fn load_roster(path: &Path) -> Result<Vec<RosterRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        let row: RosterRow = row?;
        rows.push(row);
    }
    Ok(rows)
}

/// Inserts every roster row, creating groups on demand.
pub fn import_roster(manager: &mut AttendanceManager, rows: &[RosterRow]) -> Result<usize> {
    for row in rows {
        let group = manager.find_or_create_group(&row.group)?;
        manager.add_student(&row.last_name, &row.first_name, group.id)?;
    }
    info!(count = rows.len(), "roster imported");
    Ok(rows.len())
}

/// Brings the stored roster in line with the CSV: students missing from the
/// file are removed, new ones are added. Returns `(added, removed)`.
pub fn sync_roster(manager: &mut AttendanceManager, rows: &[RosterRow]) -> Result<(usize, usize)> {
    let current: Vec<(RosterRow, i32)> = manager
        .roster()?
        .into_iter()
        .map(|(student, group)| {
            let row = RosterRow {
                last_name: student.last_name,
                first_name: student.first_name,
                group: group.label,
            };
            (row, student.id)
        })
        .collect();

    let mut removed = 0;
    for (row, student_id) in &current {
        if !rows.contains(row) {
            manager.delete_student(*student_id)?;
            removed += 1;
        }
    }

    let mut added = 0;
    for row in rows {
        if !current.iter().any(|(existing, _)| existing == row) {
            let group = manager.find_or_create_group(&row.group)?;
            manager.add_student(&row.last_name, &row.first_name, group.id)?;
            added += 1;
        }
    }

    info!(added, removed, "roster synchronized");
    Ok((added, removed))
}
