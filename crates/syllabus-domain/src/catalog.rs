//! Reference catalogs: the read-only universes of courses, subjects and specialties

use crate::{CourseId, SpecialtyId, SubjectId};

/// A course offered by the program
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    /// Unique identifier
    pub id: CourseId,

    /// Display name
    pub name: String,
}

impl Course {
    /// Create a new course
    pub fn new(id: impl Into<CourseId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A subject that can be taught within a course
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    /// Unique identifier
    pub id: SubjectId,

    /// Display name
    pub name: String,

    /// Credit weight of the subject
    pub credits: f64,

    /// Minimum score required to pass
    pub passing_score: f64,
}

impl Subject {
    /// Create a new subject
    pub fn new(
        id: impl Into<SubjectId>,
        name: impl Into<String>,
        credits: f64,
        passing_score: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            credits,
            passing_score,
        }
    }
}

/// A specialty that candidates train for
#[derive(Debug, Clone, PartialEq)]
pub struct Specialty {
    /// Unique identifier
    pub id: SpecialtyId,

    /// Display name
    pub name: String,
}

impl Specialty {
    /// Create a new specialty
    pub fn new(id: impl Into<SpecialtyId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The three reference universes, fetched together and replaced wholesale
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogs {
    /// Every known course
    pub courses: Vec<Course>,

    /// Every known subject, in catalog order
    pub subjects: Vec<Subject>,

    /// Every known specialty, in catalog order
    pub specialties: Vec<Specialty>,
}

impl Catalogs {
    /// Bundle the three catalogs
    pub fn new(courses: Vec<Course>, subjects: Vec<Subject>, specialties: Vec<Specialty>) -> Self {
        Self {
            courses,
            subjects,
            specialties,
        }
    }

    /// Look up a course by id
    pub fn course(&self, id: &CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| &c.id == id)
    }

    /// Look up a subject by id
    pub fn subject(&self, id: &SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| &s.id == id)
    }

    /// Look up a specialty by id
    pub fn specialty(&self, id: &SpecialtyId) -> Option<&Specialty> {
        self.specialties.iter().find(|s| &s.id == id)
    }

    /// True when no catalog has been populated
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty() && self.subjects.is_empty() && self.specialties.is_empty()
    }
}
