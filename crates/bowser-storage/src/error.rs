//! Storage error types

use rusqlite::ffi;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    /// Any non-success status returned by the SQLite engine.
    #[error("Engine error {code}: {message}")]
    Engine { code: i32, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub fn engine(code: i32, message: impl Into<String>) -> Self {
        StorageError::Engine {
            code,
            message: message.into(),
        }
    }

    /// Generic `SQLITE_ERROR` for failures that carry no engine status.
    pub fn other(message: impl Into<String>) -> Self {
        StorageError::engine(ffi::SQLITE_ERROR, message)
    }

    /// Result code as reported by the engine (extended when available).
    pub fn code(&self) -> Option<i32> {
        match self {
            StorageError::Engine { code, .. } => Some(*code),
            StorageError::Io(_) => None,
        }
    }

    /// Primary result code, i.e. the low byte of an extended code.
    pub fn primary_code(&self) -> Option<i32> {
        self.code().map(|code| code & 0xff)
    }

    /// Busy or locked: the operation could succeed if retried later.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.primary_code(),
            Some(ffi::SQLITE_BUSY) | Some(ffi::SQLITE_LOCKED)
        )
    }

    pub fn is_constraint_violation(&self) -> bool {
        self.primary_code() == Some(ffi::SQLITE_CONSTRAINT)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, msg) => {
                let message = msg.unwrap_or_else(|| e.to_string());
                StorageError::engine(e.extended_code, message)
            }
            rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::IntegralValueOutOfRange(..) => {
                StorageError::engine(ffi::SQLITE_MISMATCH, err.to_string())
            }
            other => StorageError::other(other.to_string()),
        }
    }
}
