//! SQLite storage handle bootstrap.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the blog post store.
//! - Apply the schema bootstrap before any repository touches the connection.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Repositories must not read/write data before the bootstrap succeeds.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or bootstrapping the blog store.
#[derive(Debug)]
pub enum DbError {
    /// SQLite rejected a statement or pragma.
    Store(rusqlite::Error),
    /// The file was stamped by a build with a newer schema than this one.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "blog store error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "blog store schema version {found} is newer than this build supports ({supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Self::Store(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Store(err)
    }
}
