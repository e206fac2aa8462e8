//! Metrics collection for coordinator operations

use crate::error::ErrorCategory;
use std::collections::HashMap;

/// Counters collected by the coordinator over a session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineMetrics {
    /// Snapshots installed (initial load, manual and post-mutation refreshes)
    pub refreshes: usize,

    /// Refresh responses discarded because a newer one was already installed
    pub stale_refreshes_discarded: usize,

    /// Relationships created
    pub relations_created: usize,

    /// Relationships deleted one by one
    pub relations_deleted: usize,

    /// Bulk specialty deletes completed
    pub bulk_deletes: usize,

    /// Failures per category (busy rejections included)
    pub failures: HashMap<ErrorCategory, usize>,
}

impl EngineMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an installed snapshot
    pub fn record_refresh(&mut self) {
        self.refreshes += 1;
    }

    /// Record a discarded out-of-order refresh
    pub fn record_stale_refresh(&mut self) {
        self.stale_refreshes_discarded += 1;
    }

    /// Record a created relationship
    pub fn record_created(&mut self) {
        self.relations_created += 1;
    }

    /// Record a deleted relationship
    pub fn record_deleted(&mut self) {
        self.relations_deleted += 1;
    }

    /// Record a completed bulk delete
    pub fn record_bulk_delete(&mut self) {
        self.bulk_deletes += 1;
    }

    /// Record a failure
    pub fn record_failure(&mut self, category: ErrorCategory) {
        *self.failures.entry(category).or_insert(0) += 1;
    }

    /// Failures of one category
    pub fn failures_of(&self, category: ErrorCategory) -> usize {
        self.failures.get(&category).copied().unwrap_or(0)
    }

    /// Failures across all categories
    pub fn total_failures(&self) -> usize {
        self.failures.values().sum()
    }

    /// Successful mutations of any kind
    pub fn total_mutations(&self) -> usize {
        self.relations_created + self.relations_deleted + self.bulk_deletes
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Learning Matrix Metrics Summary".to_string(),
            "================================".to_string(),
            format!("Refreshes: {}", self.refreshes),
            format!("Stale refreshes discarded: {}", self.stale_refreshes_discarded),
            format!(
                "Mutations: {} (created {}, deleted {}, bulk deletes {})",
                self.total_mutations(),
                self.relations_created,
                self.relations_deleted,
                self.bulk_deletes
            ),
            format!("Failures: {}", self.total_failures()),
        ];

        let mut categories: Vec<_> = self.failures.iter().collect();
        categories.sort_by_key(|(category, _)| category.as_str());
        for (category, count) in categories {
            lines.push(format!("  {}: {}", category.as_str(), count));
        }

        lines.join("\n")
    }
}
