use anyhow::Result;
use clap::Parser;
use klassenbuch::cli::{Cli, Command};
use klassenbuch::recorder::AttendanceEntry;
use klassenbuch::{display, roster};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut manager = klassenbuch::create_default_manager()?;

    match cli.command {
        Command::Init => {
            manager.initialize_schema()?;
            let statuses = manager.seed_statuses()?;
            println!("Database initialized with {} status categories.", statuses.len());
        }
        Command::ImportRoster { file } => {
            let rows = roster::load_roster(&file)?;
            let count = roster::import_roster(&mut manager, &rows)?;
            println!("Imported {count} students.");
        }
        Command::SyncRoster { file } => {
            let rows = roster::load_roster(&file)?;
            let (added, removed) = roster::sync_roster(&mut manager, &rows)?;
            println!("Roster synchronized: {added} added, {removed} removed.");
        }
        Command::Groups => display::show_groups(&mut manager)?,
        Command::Statuses => display::show_statuses(&mut manager)?,
        Command::Roster { group_id } => display::show_roster(&mut manager, group_id)?,
        Command::Record { file } => {
            let entries = load_entries(&file)?;
            match manager.record_today(&entries)? {
                Some(group_id) => {
                    println!("Recorded {} entries for group {group_id}.", entries.len());
                }
                None => println!("Nothing to record."),
            }
        }
        Command::Sheet { group_id, month } => {
            display::show_month_sheet(&mut manager, group_id, month.as_deref())?;
        }
        Command::Stats { student_id } => {
            display::show_student_statistics(&mut manager, student_id)?;
        }
    }

    Ok(())
}

/// Reads a day's submitted entries from a CSV with a
/// `student_id,status_id,arrival_time,comment` header. Empty arrival and
/// comment fields are treated as absent.
fn load_entries(path: &Path) -> Result<Vec<AttendanceEntry>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut entries = Vec::new();
    for entry in reader.deserialize() {
        let entry: AttendanceEntry = entry?;
        entries.push(entry);
    }
    Ok(entries)
}
