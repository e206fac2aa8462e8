//! Relationship module - the (course, subject, specialty) link records
//!
//! Relationships are never updated in place: they are created and deleted
//! through the remote API, and the local copy is replaced on every refresh.

use crate::error::ValidationError;
use crate::{CourseId, RelationshipId, SpecialtyId, SubjectId};

/// A single link between a course, a subject and a specialty
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    /// Identifier assigned by the remote API
    pub id: RelationshipId,

    /// Course the link belongs to
    pub course_id: CourseId,

    /// Linked subject (matrix column)
    pub subject_id: SubjectId,

    /// Linked specialty (matrix row)
    pub specialty_id: SpecialtyId,

    /// Free-form notes
    pub notes: Option<String>,
}

impl Relationship {
    /// Create a relationship record
    pub fn new(
        id: impl Into<RelationshipId>,
        course_id: impl Into<CourseId>,
        subject_id: impl Into<SubjectId>,
        specialty_id: impl Into<SpecialtyId>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            course_id: course_id.into(),
            subject_id: subject_id.into(),
            specialty_id: specialty_id.into(),
            notes,
        }
    }

    /// True when this record links exactly the given triple
    pub fn links(&self, course: &CourseId, specialty: &SpecialtyId, subject: &SubjectId) -> bool {
        &self.course_id == course && &self.specialty_id == specialty && &self.subject_id == subject
    }
}

/// Creation request for a relationship; the remote API assigns the id
#[derive(Debug, Clone, PartialEq)]
pub struct NewRelationship {
    /// Course the link belongs to
    pub course_id: CourseId,

    /// Specialty to link
    pub specialty_id: SpecialtyId,

    /// Subject to link
    pub subject_id: SubjectId,

    /// Free-form notes
    pub notes: Option<String>,
}

impl NewRelationship {
    /// Build a creation request, rejecting blank identifiers
    ///
    /// # Examples
    ///
    /// ```
    /// use syllabus_domain::NewRelationship;
    ///
    /// let draft = NewRelationship::new("c1".into(), "cardio".into(), "math".into(), None);
    /// assert!(draft.is_ok());
    ///
    /// let missing = NewRelationship::new("c1".into(), "".into(), "math".into(), None);
    /// assert!(missing.is_err());
    /// ```
    pub fn new(
        course_id: CourseId,
        specialty_id: SpecialtyId,
        subject_id: SubjectId,
        notes: Option<String>,
    ) -> Result<Self, ValidationError> {
        if course_id.is_empty() {
            return Err(ValidationError::MissingCourse);
        }
        if specialty_id.is_empty() {
            return Err(ValidationError::MissingSpecialty);
        }
        if subject_id.is_empty() {
            return Err(ValidationError::MissingSubject);
        }

        // Blank notes carry no information; send them as absent.
        let notes = notes.filter(|n| !n.trim().is_empty());

        Ok(Self {
            course_id,
            specialty_id,
            subject_id,
            notes,
        })
    }
}
