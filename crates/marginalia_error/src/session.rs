//! Stale session error types.

/// Stale session error conditions.
///
/// Raised when an interaction cannot be correlated with an open workflow:
/// the token was never issued, already consumed, expired, belongs to a
/// different user, or carries the wrong workflow label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StaleSessionErrorKind {
    /// No open session for this correlation token
    UnknownToken(i64),
    /// The session belongs to a different user
    ForeignSession(i64),
    /// Confirm click carried a label that does not match the open workflow
    LabelMismatch {
        /// Label of the open workflow
        expected: String,
        /// Label carried by the interaction
        actual: String,
    },
    /// The session is not at the step this interaction targets
    UnexpectedStep(String),
    /// Callback payload could not be decoded
    MalformedPayload(String),
    /// An entity referenced by the session no longer exists
    VanishedEntity(String),
}

impl std::fmt::Display for StaleSessionErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StaleSessionErrorKind::UnknownToken(token) => {
                write!(f, "No open session for token {}", token)
            }
            StaleSessionErrorKind::ForeignSession(token) => {
                write!(f, "Session {} belongs to a different user", token)
            }
            StaleSessionErrorKind::LabelMismatch { expected, actual } => {
                write!(
                    f,
                    "Workflow label mismatch: expected `{}`, got `{}`",
                    expected, actual
                )
            }
            StaleSessionErrorKind::UnexpectedStep(step) => {
                write!(f, "Interaction does not match the current step `{}`", step)
            }
            StaleSessionErrorKind::MalformedPayload(msg) => {
                write!(f, "Malformed callback payload: {}", msg)
            }
            StaleSessionErrorKind::VanishedEntity(what) => {
                write!(f, "Referenced {} no longer exists", what)
            }
        }
    }
}

/// Stale session error with source location tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleSessionError {
    /// The kind of error that occurred
    pub kind: StaleSessionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StaleSessionError {
    /// Create a new StaleSessionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StaleSessionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for StaleSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stale Session: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for StaleSessionError {}
