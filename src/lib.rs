use anyhow::Result;
use config::Config;

pub mod cli;
pub mod display;
pub mod error;
pub mod manager;
pub mod models;
pub mod recorder;
pub mod roster;
pub mod schema;
pub mod statistics;

use crate::manager::AttendanceManager;

/// Creates a manager from the optional `config.toml` (key `database.url`),
/// falling back to the `DATABASE_URL` environment variable.
pub fn create_default_manager() -> Result<AttendanceManager> {
    let settings = Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .build()?;

    let manager = match settings.get_string("database.url") {
        Ok(database_url) => AttendanceManager::connect_to(&database_url)?,
        Err(_) => AttendanceManager::connect()?,
    };

    Ok(manager)
}
