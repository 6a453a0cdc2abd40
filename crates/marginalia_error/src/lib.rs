//! Error types for the Marginalia reading diary bot.
//!
//! This crate provides the foundation error types used throughout the
//! Marginalia ecosystem. Each concern carries its own kind enum plus a
//! wrapper struct that records the source location where the error was
//! raised.

mod config;
mod session;
mod storage;
mod transport;
mod validation;

pub use config::ConfigError;
pub use session::{StaleSessionError, StaleSessionErrorKind};
pub use storage::{StorageError, StorageErrorKind, StorageResult};
pub use transport::TransportError;
pub use validation::{ValidationError, ValidationErrorKind};

/// Crate-level error variants.
///
/// Aggregates the per-concern errors raised by the Marginalia crates.
#[derive(Debug, derive_more::From)]
pub enum MarginaliaErrorKind {
    /// Bad or missing user input
    Validation(ValidationError),
    /// Correlation token not found, already consumed, or label mismatch
    StaleSession(StaleSessionError),
    /// Storage engine failure
    Storage(StorageError),
    /// Delivery channel failure
    Transport(TransportError),
    /// Configuration error
    Config(ConfigError),
}

impl std::fmt::Display for MarginaliaErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarginaliaErrorKind::Validation(e) => write!(f, "{}", e),
            MarginaliaErrorKind::StaleSession(e) => write!(f, "{}", e),
            MarginaliaErrorKind::Storage(e) => write!(f, "{}", e),
            MarginaliaErrorKind::Transport(e) => write!(f, "{}", e),
            MarginaliaErrorKind::Config(e) => write!(f, "{}", e),
        }
    }
}

/// Marginalia error with kind discrimination.
#[derive(Debug)]
pub struct MarginaliaError(Box<MarginaliaErrorKind>);

impl MarginaliaError {
    /// Create a new error from a kind.
    pub fn new(kind: MarginaliaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MarginaliaErrorKind {
        &self.0
    }
}

impl std::fmt::Display for MarginaliaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Marginalia Error: {}", self.0)
    }
}

impl std::error::Error for MarginaliaError {}

// Generic From implementation for any type that converts to MarginaliaErrorKind
impl<T> From<T> for MarginaliaError
where
    T: Into<MarginaliaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Marginalia operations.
pub type MarginaliaResult<T> = std::result::Result<T, MarginaliaError>;
