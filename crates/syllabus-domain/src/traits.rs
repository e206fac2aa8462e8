//! Trait definitions for external interactions
//!
//! The remote learning-matrix API is the only collaborator the engine talks
//! to. Infrastructure implementations live in other crates (syllabus-sdk).

use crate::error::ApiError;
use crate::{
    Course, CourseId, NewRelationship, Relationship, RelationshipId, Specialty, SpecialtyId,
    Subject,
};
use std::future::Future;

/// Read and write access to the remote catalogs and relationship records
///
/// Every call is a suspension point; implementations must return `Send`
/// futures so a coordinator can be driven from any tokio task.
pub trait LearningMatrixApi: Send + Sync {
    /// Fetch every relationship, across all courses
    fn list_relationships(&self)
        -> impl Future<Output = Result<Vec<Relationship>, ApiError>> + Send;

    /// Fetch the course catalog
    fn list_courses(&self) -> impl Future<Output = Result<Vec<Course>, ApiError>> + Send;

    /// Fetch the subject catalog
    fn list_subjects(&self) -> impl Future<Output = Result<Vec<Subject>, ApiError>> + Send;

    /// Fetch the specialty catalog
    fn list_specialties(&self) -> impl Future<Output = Result<Vec<Specialty>, ApiError>> + Send;

    /// Create a relationship; the remote side enforces triple uniqueness
    fn create_relationship(
        &self,
        relationship: &NewRelationship,
    ) -> impl Future<Output = Result<Relationship, ApiError>> + Send;

    /// Delete a single relationship by id
    fn delete_relationship(
        &self,
        id: &RelationshipId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Delete every relationship of a specialty within a course, in one call
    fn delete_all_relationships_for_specialty(
        &self,
        course_id: &CourseId,
        specialty_id: &SpecialtyId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}
