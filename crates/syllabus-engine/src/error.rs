//! Error types for engine operations

use crate::state::EngineState;
use syllabus_domain::{ApiError, CourseId, RelationshipId, SpecialtyId, SubjectId, ValidationError};
use thiserror::Error;

/// Errors surfaced to the presentation layer by the coordinator
///
/// Every variant is recoverable: the coordinator is back in `Idle` by the time
/// the caller sees it, and the user can simply retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A required selection was missing; nothing was sent to the server
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The (course, specialty, subject) triple already exists
    #[error("this subject already exists for this specialty - choose a different combination")]
    DuplicateRelation {
        /// Course of the rejected triple
        course_id: CourseId,
        /// Specialty of the rejected triple
        specialty_id: SpecialtyId,
        /// Subject of the rejected triple
        subject_id: SubjectId,
    },

    /// The relationship no longer exists on the server
    #[error("Relationship not found: {0}")]
    NotFound(RelationshipId),

    /// Any other server-reported failure
    #[error("Remote error: {0}")]
    Remote(String),

    /// Transport failure, no server response
    #[error("Network error: {0}")]
    Network(String),

    /// Another command is still in flight
    #[error("Another operation is in progress ({0})")]
    Busy(EngineState),
}

/// User-facing category of an error, one per distinct message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Something must be selected first
    MissingSelection,
    /// The combination already exists
    DuplicateCombination,
    /// The record was already removed
    AlreadyRemoved,
    /// The server refused the request
    ServerRejected,
    /// The server could not be reached
    Unreachable,
    /// A previous command has not finished
    Busy,
}

impl ErrorCategory {
    /// Short lowercase label, for logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::MissingSelection => "missing_selection",
            ErrorCategory::DuplicateCombination => "duplicate_combination",
            ErrorCategory::AlreadyRemoved => "already_removed",
            ErrorCategory::ServerRejected => "server_rejected",
            ErrorCategory::Unreachable => "unreachable",
            ErrorCategory::Busy => "busy",
        }
    }
}

impl EngineError {
    /// Category of this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            EngineError::Validation(_) => ErrorCategory::MissingSelection,
            EngineError::DuplicateRelation { .. } => ErrorCategory::DuplicateCombination,
            EngineError::NotFound(_) => ErrorCategory::AlreadyRemoved,
            EngineError::Remote(_) => ErrorCategory::ServerRejected,
            EngineError::Network(_) => ErrorCategory::Unreachable,
            EngineError::Busy(_) => ErrorCategory::Busy,
        }
    }

    /// Human-readable message for the user
    pub fn user_message(&self) -> String {
        match self {
            EngineError::Validation(ValidationError::MissingRelationship) => {
                "Pick an existing relationship first.".to_string()
            }
            EngineError::Validation(_) => {
                "Pick a course, a specialty and a subject first.".to_string()
            }
            EngineError::DuplicateRelation { .. } => {
                "That combination already exists: this subject is already assigned to this \
                 specialty. Choose a different combination."
                    .to_string()
            }
            EngineError::NotFound(_) => {
                "That relationship no longer exists. The matrix will show the current state \
                 after a refresh."
                    .to_string()
            }
            EngineError::Remote(msg) => format!("The server rejected the request: {}", msg),
            EngineError::Network(_) => {
                "The server is unreachable. Check the connection and try again.".to_string()
            }
            EngineError::Busy(_) => {
                "Another change is still being applied. Try again in a moment.".to_string()
            }
        }
    }

    /// Error for a failed catalog or relationship fetch
    pub(crate) fn from_fetch(e: ApiError) -> Self {
        match e {
            ApiError::Network(msg) => EngineError::Network(msg),
            other => EngineError::Remote(other.message().to_string()),
        }
    }

    /// Error for a failed create; substring markers catch duplicates the
    /// server only describes in free text
    pub(crate) fn from_create<S: AsRef<str>>(
        e: ApiError,
        course_id: &CourseId,
        specialty_id: &SpecialtyId,
        subject_id: &SubjectId,
        duplicate_markers: &[S],
    ) -> Self {
        let duplicate = match &e {
            ApiError::Duplicate(_) => true,
            ApiError::Validation(_) | ApiError::Remote(_) => {
                e.message_contains_any(duplicate_markers)
            }
            ApiError::NotFound(_) | ApiError::Network(_) => false,
        };

        if duplicate {
            return EngineError::DuplicateRelation {
                course_id: course_id.clone(),
                specialty_id: specialty_id.clone(),
                subject_id: subject_id.clone(),
            };
        }

        match e {
            ApiError::Network(msg) => EngineError::Network(msg),
            other => EngineError::Remote(other.message().to_string()),
        }
    }

    /// Error for a failed single delete
    pub(crate) fn from_delete(e: ApiError, id: &RelationshipId) -> Self {
        match e {
            ApiError::NotFound(_) => EngineError::NotFound(id.clone()),
            ApiError::Network(msg) => EngineError::Network(msg),
            other => EngineError::Remote(other.message().to_string()),
        }
    }

    /// Error for a failed bulk delete
    pub(crate) fn from_bulk_delete(e: ApiError) -> Self {
        Self::from_fetch(e)
    }
}
