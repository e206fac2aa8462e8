//! Coordinator state machine
//!
//! ```text
//! Idle -> Loading -> Idle                    (refresh)
//! Idle -> Mutating -> Loading -> Idle        (create / delete / bulk delete)
//! any failure ----------------> Idle
//! ```

use std::fmt;
use tokio::sync::watch;

/// What the coordinator is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineState {
    /// Nothing in flight; commands are accepted
    #[default]
    Idle,
    /// Catalogs and relationships are being fetched
    Loading,
    /// A create/delete command is in flight
    Mutating,
}

impl EngineState {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineState::Idle => "idle",
            EngineState::Loading => "loading",
            EngineState::Mutating => "mutating",
        }
    }

    /// True when a new command may start
    pub fn is_idle(&self) -> bool {
        matches!(self, EngineState::Idle)
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holds the machine out of `Idle` for one command
///
/// Dropping the guard returns the machine to `Idle`, including when the
/// command future is dropped mid-flight.
pub(crate) struct PhaseGuard<'a> {
    state: &'a watch::Sender<EngineState>,
}

impl<'a> PhaseGuard<'a> {
    /// Move from `Idle` to `phase`, or report the state that blocked it
    pub(crate) fn begin(
        state: &'a watch::Sender<EngineState>,
        phase: EngineState,
    ) -> Result<Self, EngineState> {
        let mut blocked_by = EngineState::Idle;
        let admitted = state.send_if_modified(|current| {
            if current.is_idle() {
                *current = phase;
                true
            } else {
                blocked_by = *current;
                false
            }
        });

        if admitted {
            Ok(Self { state })
        } else {
            Err(blocked_by)
        }
    }

    /// Move to the next phase of the same command
    pub(crate) fn advance(&self, phase: EngineState) {
        self.state.send_replace(phase);
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.state.send_replace(EngineState::Idle);
    }
}
