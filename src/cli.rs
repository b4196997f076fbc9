//! This module contains the command-line interface [`Cli`] parser for the
//! classroom attendance tracker.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The command line configuration struct, where the command-line interface
/// parser is automatically derived by [`clap::Parser`].
#[derive(Parser, Debug)]
#[command(about = "Classroom attendance tracking over a sqlite database")]
pub struct Cli {
    /// The different commands available for managing attendance records.
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database schema and seed the status categories.
    Init,

    /// Import a roster CSV (`last_name,first_name,group`) into the database.
    ImportRoster { file: PathBuf },

    /// Synchronize the stored roster with a roster CSV, adding new students
    /// and removing dropped ones.
    SyncRoster { file: PathBuf },

    /// List all groups.
    Groups,

    /// List all status categories.
    Statuses,

    /// Show the students of a group.
    Roster { group_id: i32 },

    /// Record today's attendance from a CSV of entries
    /// (`student_id,status_id,arrival_time,comment`).
    Record { file: PathBuf },

    /// Show a group's attendance sheet for a month.
    Sheet {
        group_id: i32,

        /// Month as `YYYY-MM`; defaults to the current month.
        #[arg(long)]
        month: Option<String>,
    },

    /// Show aggregate attendance statistics for a student.
    Stats { student_id: i32 },
}
