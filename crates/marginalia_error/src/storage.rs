//! Storage engine error types.

use crate::ValidationError;

/// Storage error conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageErrorKind {
    /// Connection failed
    Connection(String),
    /// Connection pool failure
    Pool(String),
    /// Query execution failed
    Query(String),
    /// Migration error
    Migration(String),
    /// Record not found
    NotFound,
    /// Write rejected before reaching storage
    Validation(ValidationError),
}

impl std::fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageErrorKind::Connection(msg) => write!(f, "Storage connection error: {}", msg),
            StorageErrorKind::Pool(msg) => write!(f, "Storage pool error: {}", msg),
            StorageErrorKind::Query(msg) => write!(f, "Storage query error: {}", msg),
            StorageErrorKind::Migration(msg) => write!(f, "Migration error: {}", msg),
            StorageErrorKind::NotFound => write!(f, "Record not found"),
            StorageErrorKind::Validation(err) => write!(f, "{}", err),
        }
    }
}

/// Storage error with source location tracking.
#[derive(Debug, Clone)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new StorageError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether this error carries a validation failure.
    pub fn validation(&self) -> Option<&ValidationError> {
        match &self.kind {
            StorageErrorKind::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Storage Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for StorageError {}

impl From<ValidationError> for StorageError {
    #[track_caller]
    fn from(err: ValidationError) -> Self {
        StorageError::new(StorageErrorKind::Validation(err))
    }
}

/// Result type for storage engine operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

// Diesel error conversions (only available with storage feature)
#[cfg(feature = "storage")]
impl From<diesel::result::Error> for StorageError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => StorageError::new(StorageErrorKind::NotFound),
            _ => StorageError::new(StorageErrorKind::Query(err.to_string())),
        }
    }
}

#[cfg(feature = "storage")]
impl From<diesel::ConnectionError> for StorageError {
    fn from(err: diesel::ConnectionError) -> Self {
        StorageError::new(StorageErrorKind::Connection(err.to_string()))
    }
}

#[cfg(feature = "storage")]
impl From<diesel::r2d2::PoolError> for StorageError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        StorageError::new(StorageErrorKind::Pool(err.to_string()))
    }
}
