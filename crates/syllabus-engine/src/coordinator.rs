//! Mutation coordinator: the only writer of the relationship store
//!
//! Commands run one at a time. Every successful mutation is followed by a
//! full refresh, and the matrix is only ever rebuilt from a fetched snapshot,
//! never patched locally.

use crate::config::{ConfigError, EngineConfig, MatrixSettings};
use crate::error::EngineError;
use crate::metrics::EngineMetrics;
use crate::state::{EngineState, PhaseGuard};
use crate::store::{Snapshot, SnapshotStore};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use syllabus_domain::{
    build_matrix, ranked_specialties, ranked_subjects, ranked_view, Catalogs, CourseId,
    LearningMatrixApi, Matrix, NewRelationship, Relationship, RelationshipId, Specialty,
    SpecialtyId, Subject, SubjectId, ValidationError,
};
use syllabus_sdk::MatrixClient;
use tokio::sync::watch;

/// Derived and cached state behind the read accessors
#[derive(Default)]
struct View {
    store: SnapshotStore,
    selected: Option<CourseId>,
    matrix: Option<Arc<Matrix>>,
    last_error: Option<EngineError>,
}

impl View {
    fn rebuild(&mut self) {
        let snapshot = self.store.current();
        self.matrix = self.selected.as_ref().map(|course_id| {
            Arc::new(build_matrix(
                &snapshot.relationships,
                &snapshot.catalogs.subjects,
                &snapshot.catalogs.specialties,
                course_id,
            ))
        });
    }

    /// Install a fetched snapshot; false when a newer one is already held
    fn install(&mut self, generation: u64, snapshot: Snapshot, settings: &MatrixSettings) -> bool {
        if !self.store.install(generation, snapshot) {
            return false;
        }

        let snapshot = self.store.current();
        if let Some(course_id) = &self.selected {
            if snapshot.catalogs.course(course_id).is_none() {
                tracing::warn!("Selected course {} is no longer in the catalog", course_id);
            }
        } else if settings.auto_select_first_course {
            if let Some(first) = snapshot.catalogs.courses.first() {
                tracing::info!("Auto-selected course {} ({})", first.id, first.name);
                self.selected = Some(first.id.clone());
            }
        }

        self.rebuild();
        true
    }
}

/// Owner of the relationship store and the Idle/Loading/Mutating machine
///
/// All methods take `&self`; share the coordinator behind an `Arc` to drive
/// it from several tasks. A command started while another is in flight is
/// rejected with [`EngineError::Busy`].
///
/// # Examples
///
/// ```no_run
/// use syllabus_engine::{EngineConfig, MatrixCoordinator};
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let config = EngineConfig::load(None)?;
/// let coordinator = MatrixCoordinator::from_config(config)?;
///
/// coordinator.refresh().await?;
/// if let Some(matrix) = coordinator.matrix() {
///     println!("{} of {} cells linked", matrix.filled_count(), matrix.cell_count());
/// }
/// # Ok(())
/// # }
/// ```
pub struct MatrixCoordinator<A> {
    api: A,
    settings: MatrixSettings,
    state: watch::Sender<EngineState>,
    generation: AtomicU64,
    view: RwLock<View>,
    metrics: Mutex<EngineMetrics>,
}

impl MatrixCoordinator<MatrixClient> {
    /// Build a coordinator backed by the REST client described in `config`
    pub fn from_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = MatrixClient::from_config(config.api)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(Self::new(client, config.matrix))
    }
}

impl<A: LearningMatrixApi> MatrixCoordinator<A> {
    /// Create a coordinator over `api`; nothing is fetched until `refresh`
    pub fn new(api: A, settings: MatrixSettings) -> Self {
        let (state, _) = watch::channel(EngineState::Idle);
        Self {
            api,
            settings,
            state,
            generation: AtomicU64::new(0),
            view: RwLock::new(View::default()),
            metrics: Mutex::new(EngineMetrics::new()),
        }
    }

    /// The remote API this coordinator drives
    pub fn api(&self) -> &A {
        &self.api
    }

    fn read_view(&self) -> RwLockReadGuard<'_, View> {
        self.view.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_view(&self) -> RwLockWriteGuard<'_, View> {
        self.view.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn metrics_mut(&self) -> MutexGuard<'_, EngineMetrics> {
        self.metrics.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ---- read accessors -------------------------------------------------

    /// Current state of the machine
    pub fn state(&self) -> EngineState {
        *self.state.borrow()
    }

    /// Receiver notified on every state transition
    pub fn subscribe(&self) -> watch::Receiver<EngineState> {
        self.state.subscribe()
    }

    /// Error of the most recent failed command, cleared by the next success
    pub fn last_error(&self) -> Option<EngineError> {
        self.read_view().last_error.clone()
    }

    /// Course the matrix is built for
    pub fn selected_course(&self) -> Option<CourseId> {
        self.read_view().selected.clone()
    }

    /// Matrix of the selected course, in catalog order
    pub fn matrix(&self) -> Option<Arc<Matrix>> {
        self.read_view().matrix.clone()
    }

    /// Matrix of the selected course with rows and columns in ranked order
    pub fn ranked_matrix(&self) -> Option<Matrix> {
        self.matrix().map(|m| ranked_view(&m))
    }

    /// Subjects by descending relation count for the selected course
    pub fn ranked_subjects(&self) -> Vec<Subject> {
        self.matrix()
            .map(|m| ranked_subjects(&m).into_iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Specialties by descending relation count for the selected course
    pub fn ranked_specialties(&self) -> Vec<Specialty> {
        self.matrix()
            .map(|m| ranked_specialties(&m).into_iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Last installed snapshot
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.read_view().store.current()
    }

    /// Reference catalogs of the last installed snapshot
    pub fn catalogs(&self) -> Catalogs {
        self.snapshot().catalogs.clone()
    }

    /// Every relationship of the last installed snapshot, across all courses
    pub fn relationships(&self) -> Vec<Relationship> {
        self.snapshot().relationships.clone()
    }

    /// Relationships a bulk delete of (`course_id`, `specialty_id`) would remove
    ///
    /// Intended for the confirmation prompt shown before
    /// [`delete_all_for_specialty`](Self::delete_all_for_specialty).
    pub fn bulk_delete_preview(
        &self,
        course_id: &CourseId,
        specialty_id: &SpecialtyId,
    ) -> Vec<Relationship> {
        self.snapshot()
            .relationships_for_specialty(course_id, specialty_id)
    }

    /// Snapshot of the collected metrics
    pub fn metrics(&self) -> EngineMetrics {
        self.metrics_mut().clone()
    }

    // ---- commands -------------------------------------------------------

    /// Switch the active course and rebuild the matrix synchronously
    pub fn select_course(&self, course_id: &CourseId) -> Result<(), EngineError> {
        if course_id.is_empty() {
            return self.settle(Err(ValidationError::MissingCourse.into()), "select_course");
        }

        let mut view = self.write_view();
        let known = view.store.current().catalogs.course(course_id).is_some();
        if view.store.generation() > 0 && !known {
            tracing::warn!("Selecting course {} which is not in the catalog", course_id);
        }
        view.selected = Some(course_id.clone());
        view.rebuild();
        tracing::debug!("Selected course {}", course_id);
        Ok(())
    }

    /// Re-fetch relationships and catalogs and replace the store wholesale
    pub async fn refresh(&self) -> Result<(), EngineError> {
        let _phase = self.admit(EngineState::Loading)?;
        let outcome = self.reload().await;
        self.settle(outcome, "refresh")
    }

    /// Link a subject to a specialty within a course, then refresh
    pub async fn add_relation(
        &self,
        course_id: &CourseId,
        specialty_id: &SpecialtyId,
        subject_id: &SubjectId,
        notes: Option<String>,
    ) -> Result<Relationship, EngineError> {
        let draft = match NewRelationship::new(
            course_id.clone(),
            specialty_id.clone(),
            subject_id.clone(),
            notes,
        ) {
            Ok(draft) => draft,
            Err(e) => return self.settle(Err(e.into()), "add_relation"),
        };

        let phase = self.admit(EngineState::Mutating)?;
        let outcome = match self.api.create_relationship(&draft).await {
            Ok(created) => {
                tracing::info!(
                    "Created relationship {} (course={}, specialty={}, subject={})",
                    created.id,
                    course_id,
                    specialty_id,
                    subject_id
                );
                self.metrics_mut().record_created();
                phase.advance(EngineState::Loading);
                self.reload().await.map(|()| created)
            }
            Err(e) => Err(EngineError::from_create(
                e,
                course_id,
                specialty_id,
                subject_id,
                self.settings.duplicate_markers.as_slice(),
            )),
        };

        self.settle(outcome, "add_relation")
    }

    /// Delete one relationship, then refresh
    pub async fn delete_relation(
        &self,
        relationship_id: &RelationshipId,
    ) -> Result<(), EngineError> {
        if relationship_id.is_empty() {
            return self.settle(
                Err(ValidationError::MissingRelationship.into()),
                "delete_relation",
            );
        }

        let phase = self.admit(EngineState::Mutating)?;
        let outcome = match self.api.delete_relationship(relationship_id).await {
            Ok(()) => {
                tracing::info!("Deleted relationship {}", relationship_id);
                self.metrics_mut().record_deleted();
                phase.advance(EngineState::Loading);
                self.reload().await
            }
            Err(e) => Err(EngineError::from_delete(e, relationship_id)),
        };

        self.settle(outcome, "delete_relation")
    }

    /// Delete every relationship of a specialty within a course in one call,
    /// then refresh
    ///
    /// Destructive and irreversible: callers must confirm with the user first
    /// (see [`bulk_delete_preview`](Self::bulk_delete_preview)).
    pub async fn delete_all_for_specialty(
        &self,
        course_id: &CourseId,
        specialty_id: &SpecialtyId,
    ) -> Result<(), EngineError> {
        let missing = if course_id.is_empty() {
            Some(ValidationError::MissingCourse)
        } else if specialty_id.is_empty() {
            Some(ValidationError::MissingSpecialty)
        } else {
            None
        };
        if let Some(e) = missing {
            return self.settle(Err(e.into()), "delete_all_for_specialty");
        }

        let phase = self.admit(EngineState::Mutating)?;
        let outcome = match self
            .api
            .delete_all_relationships_for_specialty(course_id, specialty_id)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    "Deleted all relationships of specialty {} in course {}",
                    specialty_id,
                    course_id
                );
                self.metrics_mut().record_bulk_delete();
                phase.advance(EngineState::Loading);
                self.reload().await
            }
            Err(e) => Err(EngineError::from_bulk_delete(e)),
        };

        self.settle(outcome, "delete_all_for_specialty")
    }

    // ---- internals ------------------------------------------------------

    fn admit(&self, phase: EngineState) -> Result<PhaseGuard<'_>, EngineError> {
        PhaseGuard::begin(&self.state, phase).map_err(|current| {
            tracing::debug!("Rejected {} request while {}", phase, current);
            let err = EngineError::Busy(current);
            self.metrics_mut().record_failure(err.category());
            err
        })
    }

    /// Fetch everything and install it; the caller holds the phase guard
    async fn reload(&self) -> Result<(), EngineError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("Refresh #{} started", generation);

        let (relationships, courses, subjects, specialties) = tokio::try_join!(
            self.api.list_relationships(),
            self.api.list_courses(),
            self.api.list_subjects(),
            self.api.list_specialties(),
        )
        .map_err(EngineError::from_fetch)?;

        let snapshot = Snapshot {
            relationships,
            catalogs: Catalogs::new(courses, subjects, specialties),
        };
        let counts = (
            snapshot.relationships.len(),
            snapshot.catalogs.subjects.len(),
            snapshot.catalogs.specialties.len(),
        );

        let installed = self.write_view().install(generation, snapshot, &self.settings);
        if installed {
            self.metrics_mut().record_refresh();
            tracing::debug!(
                "Refresh #{} installed: {} relationships, {} subjects, {} specialties",
                generation,
                counts.0,
                counts.1,
                counts.2
            );
        } else {
            self.metrics_mut().record_stale_refresh();
            tracing::debug!("Refresh #{} discarded: a newer snapshot is installed", generation);
        }

        Ok(())
    }

    /// Record the outcome of a command in `last_error` and the metrics
    fn settle<T>(
        &self,
        outcome: Result<T, EngineError>,
        operation: &str,
    ) -> Result<T, EngineError> {
        match &outcome {
            Ok(_) => {
                self.write_view().last_error = None;
            }
            Err(e) => {
                tracing::warn!("{} failed: {}", operation, e);
                self.metrics_mut().record_failure(e.category());
                self.write_view().last_error = Some(e.clone());
            }
        }
        outcome
    }
}
