//! In-memory stand-in for the remote learning-matrix API

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use syllabus_domain::{
    ApiError, Course, CourseId, LearningMatrixApi, NewRelationship, Relationship, RelationshipId,
    Specialty, SpecialtyId, Subject,
};
use syllabus_engine::{MatrixCoordinator, MatrixSettings};
use tokio::sync::Notify;
use tracing_subscriber::EnvFilter;

/// Duplicate message in the shape the real server sends with a 400
pub const DUPLICATE_MESSAGE: &str =
    "Relationship already exists for this course, specialty and subject";

#[derive(Default)]
struct Records {
    relationships: Vec<Relationship>,
    next_id: usize,
}

/// Fake API with server-side triple uniqueness, call counters and
/// failure injection
#[derive(Default)]
pub struct FakeApi {
    courses: Vec<Course>,
    subjects: Vec<Subject>,
    specialties: Vec<Specialty>,
    records: Mutex<Records>,
    offline: AtomicBool,
    lists_fail: AtomicBool,
    structured_conflicts: AtomicBool,
    create_gate: Mutex<Option<Arc<Notify>>>,

    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub bulk_delete_calls: AtomicUsize,
}

impl FakeApi {
    /// Two courses, three subjects, three specialties, no relationships
    pub fn seeded() -> Self {
        Self {
            courses: vec![Course::new("c1", "Medicine"), Course::new("c2", "Nursing")],
            subjects: vec![
                Subject::new("math", "Mathematics", 4.0, 60.0),
                Subject::new("phys", "Physics", 3.0, 60.0),
                Subject::new("chem", "Chemistry", 3.0, 55.0),
            ],
            specialties: vec![
                Specialty::new("cardio", "Cardiology"),
                Specialty::new("neuro", "Neurology"),
                Specialty::new("derm", "Dermatology"),
            ],
            ..Self::default()
        }
    }

    /// Seed an existing relationship directly into the server store
    pub fn insert(&self, course: &str, subject: &str, specialty: &str) -> RelationshipId {
        let mut records = self.records.lock().unwrap();
        records.next_id += 1;
        let id = RelationshipId::new(format!("r{}", records.next_id));
        records.relationships.push(Relationship::new(
            id.clone(),
            course,
            subject,
            specialty,
            None,
        ));
        id
    }

    /// Remove a relationship behind the coordinator's back
    pub fn remove_externally(&self, id: &RelationshipId) {
        self.records
            .lock()
            .unwrap()
            .relationships
            .retain(|r| &r.id != id);
    }

    /// Number of relationships on the server
    pub fn stored(&self) -> usize {
        self.records.lock().unwrap().relationships.len()
    }

    /// Every call fails with a transport error while set
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Only list calls fail (with a server error) while set
    pub fn set_lists_failing(&self, failing: bool) {
        self.lists_fail.store(failing, Ordering::SeqCst);
    }

    /// Report duplicates with a structured conflict instead of free text
    pub fn set_structured_conflicts(&self, structured: bool) {
        self.structured_conflicts.store(structured, Ordering::SeqCst);
    }

    /// Hold every create call until the returned handle is notified
    pub fn gate_creates(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.create_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    fn check_online(&self) -> Result<(), ApiError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(())
    }

    fn check_list(&self) -> Result<(), ApiError> {
        self.check_online()?;
        if self.lists_fail.load(Ordering::SeqCst) {
            return Err(ApiError::Remote("Internal Server Error".to_string()));
        }
        Ok(())
    }
}

impl LearningMatrixApi for FakeApi {
    async fn list_relationships(&self) -> Result<Vec<Relationship>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_list()?;
        Ok(self.records.lock().unwrap().relationships.clone())
    }

    async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        self.check_list()?;
        Ok(self.courses.clone())
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, ApiError> {
        self.check_list()?;
        Ok(self.subjects.clone())
    }

    async fn list_specialties(&self) -> Result<Vec<Specialty>, ApiError> {
        self.check_list()?;
        Ok(self.specialties.clone())
    }

    async fn create_relationship(
        &self,
        relationship: &NewRelationship,
    ) -> Result<Relationship, ApiError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.create_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.check_online()?;

        let mut records = self.records.lock().unwrap();
        let exists = records.relationships.iter().any(|r| {
            r.links(
                &relationship.course_id,
                &relationship.specialty_id,
                &relationship.subject_id,
            )
        });
        if exists {
            return Err(if self.structured_conflicts.load(Ordering::SeqCst) {
                ApiError::Duplicate("conflict".to_string())
            } else {
                ApiError::Validation(DUPLICATE_MESSAGE.to_string())
            });
        }

        records.next_id += 1;
        let created = Relationship {
            id: RelationshipId::new(format!("r{}", records.next_id)),
            course_id: relationship.course_id.clone(),
            subject_id: relationship.subject_id.clone(),
            specialty_id: relationship.specialty_id.clone(),
            notes: relationship.notes.clone(),
        };
        records.relationships.push(created.clone());
        Ok(created)
    }

    async fn delete_relationship(&self, id: &RelationshipId) -> Result<(), ApiError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        let mut records = self.records.lock().unwrap();
        let before = records.relationships.len();
        records.relationships.retain(|r| &r.id != id);
        if records.relationships.len() == before {
            return Err(ApiError::NotFound(format!("Relationship {} not found", id)));
        }
        Ok(())
    }

    async fn delete_all_relationships_for_specialty(
        &self,
        course_id: &CourseId,
        specialty_id: &SpecialtyId,
    ) -> Result<(), ApiError> {
        self.bulk_delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        self.records
            .lock()
            .unwrap()
            .relationships
            .retain(|r| !(&r.course_id == course_id && &r.specialty_id == specialty_id));
        Ok(())
    }
}

/// Route coordinator logs to the test output; `RUST_LOG=debug` shows refreshes
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Coordinator over a seeded fake with default settings
pub fn coordinator() -> MatrixCoordinator<FakeApi> {
    init_tracing();
    MatrixCoordinator::new(FakeApi::seeded(), MatrixSettings::default())
}
