//! Error values shared across the domain boundary
//!
//! Kept dependency-free: `Display` and `Error` are implemented by hand.

use std::fmt;

/// A required selection was missing; detected before any remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// No course selected
    MissingCourse,
    /// No specialty selected
    MissingSpecialty,
    /// No subject selected
    MissingSubject,
    /// No relationship identifier supplied
    MissingRelationship,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ValidationError::MissingCourse => "a course must be selected",
            ValidationError::MissingSpecialty => "a specialty must be selected",
            ValidationError::MissingSubject => "a subject must be selected",
            ValidationError::MissingRelationship => "a relationship identifier is required",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ValidationError {}

/// Failure reported by the remote learning-matrix API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The remote side reported the relationship triple already exists
    Duplicate(String),
    /// The remote side rejected the request payload
    Validation(String),
    /// The target record does not exist (anymore)
    NotFound(String),
    /// Any other server-reported failure; message passed through
    Remote(String),
    /// Transport failure, no server response
    Network(String),
}

impl ApiError {
    /// The message carried by the error
    pub fn message(&self) -> &str {
        match self {
            ApiError::Duplicate(m)
            | ApiError::Validation(m)
            | ApiError::NotFound(m)
            | ApiError::Remote(m)
            | ApiError::Network(m) => m,
        }
    }

    /// Case-insensitive check for any of `markers` in the error message
    ///
    /// # Examples
    ///
    /// ```
    /// use syllabus_domain::ApiError;
    ///
    /// let err = ApiError::Remote("Relationship Already Exists".to_string());
    /// assert!(err.message_contains_any(&["already exist"]));
    /// assert!(!err.message_contains_any(&["not found"]));
    /// ```
    pub fn message_contains_any<S: AsRef<str>>(&self, markers: &[S]) -> bool {
        let haystack = self.message().to_lowercase();
        markers
            .iter()
            .map(|m| m.as_ref().trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .any(|m| haystack.contains(&m))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Duplicate(m) => write!(f, "duplicate relationship: {}", m),
            ApiError::Validation(m) => write!(f, "rejected by server: {}", m),
            ApiError::NotFound(m) => write!(f, "not found: {}", m),
            ApiError::Remote(m) => write!(f, "remote error: {}", m),
            ApiError::Network(m) => write!(f, "network error: {}", m),
        }
    }
}

impl std::error::Error for ApiError {}
