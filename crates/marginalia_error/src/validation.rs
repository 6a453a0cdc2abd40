//! Validation error types for user-supplied input.

/// Validation error conditions.
///
/// Raised for bad or missing user input before anything reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// Author name is empty
    EmptyAuthorName,
    /// Story title is empty
    EmptyStoryTitle,
    /// Review text is empty
    EmptyReviewText,
    /// Rank outside the closed interval [0, 5]
    RankOutOfRange(i32),
    /// A review already exists for this story
    DuplicateReview,
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationErrorKind::EmptyAuthorName => write!(f, "Author name must not be empty"),
            ValidationErrorKind::EmptyStoryTitle => write!(f, "Story title must not be empty"),
            ValidationErrorKind::EmptyReviewText => write!(f, "Review text must not be empty"),
            ValidationErrorKind::RankOutOfRange(rank) => {
                write!(f, "Rank {} is outside the allowed range 0-5", rank)
            }
            ValidationErrorKind::DuplicateReview => {
                write!(f, "A review for this story already exists")
            }
        }
    }
}

/// Validation error with source location tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Validation Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for ValidationError {}
