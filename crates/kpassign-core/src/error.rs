//! Error types for opening the database and assigning entries.

use keepass::error::DatabaseOpenError;
use std::io;
use thiserror::Error;

/// Why a database could not be unlocked.
#[derive(Debug, Error)]
pub enum UnlockError {
    /// The file is not there (possibly removed after an existence check).
    #[error("database file not found")]
    NotFound,
    /// The OS refused the file, or the key did not decrypt it.
    #[error("could not read or decrypt database: {0}")]
    InvalidPassword(String),
    /// The file was readable but is not a database we can open.
    #[error("failed to open database: {0}")]
    Other(String),
}

impl UnlockError {
    pub(crate) fn from_io(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            _ => Self::InvalidPassword(err.to_string()),
        }
    }
}

impl From<DatabaseOpenError> for UnlockError {
    fn from(err: DatabaseOpenError) -> Self {
        match err {
            DatabaseOpenError::Io(e) => Self::from_io(e),
            DatabaseOpenError::Key(e) => Self::InvalidPassword(e.to_string()),
            other => Self::Other(other.to_string()),
        }
    }
}

/// Why an entry could not be assigned to a group.
#[derive(Debug, Error)]
pub enum AssignError {
    #[error("no group named '{0}'")]
    GroupNotFound(String),
    #[error("{count} groups are named '{name}'")]
    AmbiguousGroup { name: String, count: usize },
    #[error("no entry at '{0}'")]
    EntryNotFound(String),
    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepass::error::DatabaseKeyError;

    #[test]
    fn missing_file_is_not_found() {
        let err = UnlockError::from(DatabaseOpenError::Io(io::Error::from(
            io::ErrorKind::NotFound,
        )));
        assert!(matches!(err, UnlockError::NotFound));
    }

    #[test]
    fn os_failures_count_as_bad_password() {
        let err = UnlockError::from_io(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, UnlockError::InvalidPassword(_)));
    }

    #[test]
    fn wrong_key_counts_as_bad_password() {
        let err = UnlockError::from(DatabaseOpenError::Key(DatabaseKeyError::IncorrectKey));
        assert!(matches!(err, UnlockError::InvalidPassword(_)));
    }

    #[test]
    fn unsupported_file_is_other() {
        let err = UnlockError::from(DatabaseOpenError::UnsupportedVersion);
        assert!(matches!(err, UnlockError::Other(_)));
    }
}
