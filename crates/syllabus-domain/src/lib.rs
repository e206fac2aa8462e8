//! Syllabus Domain Layer
//!
//! This crate contains the data model of the Learning Matrix and the pure
//! functions that derive it. It has ZERO external dependencies and defines the
//! trait interface of the remote API that the other crates depend upon.
//!
//! ## Key Concepts
//!
//! - **Relationship**: a (course, subject, specialty) link, the unit of create/delete
//! - **Reference catalogs**: read-only universes of courses, subjects and specialties
//! - **Matrix**: dense specialty × subject grid for one course, derived from relationships
//! - **Relation count**: number of non-empty cells along one axis of the matrix
//!
//! ## Pipeline
//!
//! ```text
//! catalogs + relationships --build_matrix--> Matrix --ranking--> ranked view
//! ```
//!
//! Both stages are deterministic and side-effect free, so they are rerun from
//! scratch whenever their inputs change instead of being patched.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod error;
pub mod ids;
pub mod matrix;
pub mod ranking;
pub mod relationship;
pub mod traits;

// Re-exports for convenience
pub use catalog::{Catalogs, Course, Specialty, Subject};
pub use error::{ApiError, ValidationError};
pub use ids::{CourseId, RelationshipId, SpecialtyId, SubjectId};
pub use matrix::{build_matrix, Axis, Cell, Matrix};
pub use ranking::{
    count_for, rank_specialties, rank_subjects, ranked_specialties, ranked_subjects, ranked_view,
};
pub use relationship::{NewRelationship, Relationship};
pub use traits::LearningMatrixApi;
