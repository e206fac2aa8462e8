//! Syllabus Engine
//!
//! Owns the relationship store behind the Learning Matrix and serializes every
//! change to it.
//!
//! # Overview
//!
//! The coordinator fetches relationships and the course, subject and specialty
//! catalogs, builds the matrix for the selected course, and applies user
//! commands (link, unlink, clear a specialty) against the remote API. It never
//! edits the matrix locally: each successful mutation is followed by a full
//! refresh, and the matrix is rebuilt from what the server returned.
//!
//! # Architecture
//!
//! ```text
//! command → validate → Mutating → remote call → Loading → refresh → rebuild → Idle
//! ```
//!
//! # Key Features
//!
//! - **Single writer**: commands are admitted one at a time, others get `Busy`
//! - **Last write wins**: refresh responses carry a generation; older ones are dropped
//! - **Duplicate detection**: structured conflict codes and free-text markers
//! - **Typed errors**: one user-facing category per failure kind
//!
//! # Example Usage
//!
//! ```no_run
//! use syllabus_engine::{EngineConfig, MatrixCoordinator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let coordinator = MatrixCoordinator::from_config(EngineConfig::load(None)?)?;
//! coordinator.refresh().await?;
//!
//! for subject in coordinator.ranked_subjects() {
//!     println!("{}", subject.name);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod coordinator;
mod error;
mod metrics;
mod state;
mod store;

pub use config::{ConfigError, EngineConfig, MatrixSettings, ENV_API_TIMEOUT, ENV_API_URL};
pub use coordinator::MatrixCoordinator;
pub use error::{EngineError, ErrorCategory};
pub use metrics::EngineMetrics;
pub use state::EngineState;
pub use store::Snapshot;
