//! Typed error type for the db crate.

use std::fmt;

use sqlx::error::ErrorKind;
use thiserror::Error;

pub use sqlx::Error as SqlxError;

/// Which schedule write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleAction {
    Add,
    Delete,
}

impl fmt::Display for ScheduleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A schedule write failed. Already logged at the point of failure.
    #[error("failed to {action} schedule for artist {artist_id}: {source}")]
    Schedule {
        action: ScheduleAction,
        artist_id: i32,
        #[source]
        source: sqlx::Error,
    },
}

impl DbError {
    /// The underlying sqlx error, if any.
    pub fn sqlx(&self) -> Option<&sqlx::Error> {
        match self {
            Self::Sqlx(e) | Self::Schedule { source: e, .. } => Some(e),
            Self::Migration(_) => None,
        }
    }

    /// The store could not be reached or the connection broke mid-call.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self.sqlx(),
            Some(
                sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::Protocol(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
            )
        )
    }

    /// The store rejected the statement because of a schema constraint,
    /// e.g. a schedule row referencing an artist that does not exist.
    pub fn is_constraint_violation(&self) -> bool {
        match self.sqlx() {
            Some(sqlx::Error::Database(e)) => matches!(
                e.kind(),
                ErrorKind::ForeignKeyViolation
                    | ErrorKind::UniqueViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ),
            _ => false,
        }
    }
}
