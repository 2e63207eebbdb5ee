use std::path::PathBuf;

use thiserror::Error;

use crate::record::RecordId;

/// Error type for repository operations.
///
/// The first three variants are the recoverable domain failures; callers are
/// expected to match on them, report, and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// A record with this id is already stored. The stored record is untouched.
    #[error("{collection}: record with id {id} already exists")]
    DuplicateKey {
        collection: &'static str,
        id: RecordId,
    },
    /// No record with this id is stored.
    #[error("{collection}: record with id {id} not found")]
    NotFound {
        collection: &'static str,
        id: RecordId,
    },
    /// The requested quantity is negative or out of range.
    #[error("{collection}: invalid quantity {attempted} for record {id}, quantity cannot be negative")]
    InvalidValue {
        collection: &'static str,
        id: RecordId,
        attempted: i64,
    },
    #[error("repository lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

/// Discriminant of [`RepositoryError`], for callers that branch by kind only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DuplicateKey,
    NotFound,
    InvalidValue,
    LockPoisoned,
}

impl RepositoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepositoryError::DuplicateKey { .. } => ErrorKind::DuplicateKey,
            RepositoryError::NotFound { .. } => ErrorKind::NotFound,
            RepositoryError::InvalidValue { .. } => ErrorKind::InvalidValue,
            RepositoryError::LockPoisoned(_) => ErrorKind::LockPoisoned,
        }
    }

    /// The offending record id, if the error concerns a single record.
    pub fn id(&self) -> Option<RecordId> {
        match self {
            RepositoryError::DuplicateKey { id, .. }
            | RepositoryError::NotFound { id, .. }
            | RepositoryError::InvalidValue { id, .. } => Some(*id),
            RepositoryError::LockPoisoned(_) => None,
        }
    }
}

/// Error type for serializing, deserializing and storing record sequences.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("encode error: {0}")]
    Encode(String),
    /// Persisted content could not be parsed back into records.
    #[error("decode error: {0}")]
    Decode(String),
    /// Persisted content parsed but violates repository invariants.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PersistenceError::Io {
            path: path.into(),
            source,
        }
    }
}
