//! Relationship store and reference catalogs, as last fetched
//!
//! The snapshot is replaced wholesale; it is never merged or patched.
//! Each install carries the generation of the refresh that produced it and
//! older generations are refused, so a late response cannot overwrite a
//! newer one.

use std::sync::Arc;
use syllabus_domain::{Catalogs, CourseId, Relationship, SpecialtyId};

/// Everything fetched by one refresh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Every relationship across all courses
    pub relationships: Vec<Relationship>,

    /// Course, subject and specialty catalogs
    pub catalogs: Catalogs,
}

impl Snapshot {
    /// Relationships of one specialty within one course
    pub fn relationships_for_specialty(
        &self,
        course_id: &CourseId,
        specialty_id: &SpecialtyId,
    ) -> Vec<Relationship> {
        self.relationships
            .iter()
            .filter(|r| &r.course_id == course_id && &r.specialty_id == specialty_id)
            .cloned()
            .collect()
    }
}

/// Holder of the current snapshot and the generation it came from
#[derive(Debug, Default)]
pub(crate) struct SnapshotStore {
    snapshot: Arc<Snapshot>,
    generation: u64,
}

impl SnapshotStore {
    /// Current snapshot
    pub(crate) fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Generation of the current snapshot (0 before the first install)
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Install `snapshot` unless a same-or-newer generation is already held
    pub(crate) fn install(&mut self, generation: u64, snapshot: Snapshot) -> bool {
        if generation <= self.generation {
            return false;
        }
        self.snapshot = Arc::new(snapshot);
        self.generation = generation;
        true
    }
}
