use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong below the command-line layer.
///
/// Lookup and format failures are caller-input problems and abort the
/// operation that hit them; nothing here is retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("group {0} not found")]
    GroupNotFound(i32),

    #[error("student {0} not found")]
    StudentNotFound(i32),

    #[error("status {0} not found")]
    StatusNotFound(i32),

    #[error("invalid arrival time {0:?}, expected HH:MM")]
    InvalidArrivalTime(String),

    #[error("invalid month {0:?}, expected YYYY-MM")]
    InvalidMonth(String),

    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Database(#[from] diesel::result::Error),

    #[error(transparent)]
    Connection(#[from] diesel::ConnectionError),
}
