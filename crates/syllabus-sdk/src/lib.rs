//! Syllabus Rust SDK
//!
//! REST client for the remote learning-matrix API. [`MatrixClient`] implements
//! [`syllabus_domain::LearningMatrixApi`], so it can be handed directly to the
//! engine's coordinator.
//!
//! # Example
//!
//! ```no_run
//! use syllabus_sdk::MatrixClient;
//!
//! # async fn demo() -> Result<(), syllabus_sdk::SdkError> {
//! let client = MatrixClient::new("http://localhost:3000/api")?;
//! let courses = client.fetch_courses().await?;
//! println!("{} courses", courses.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod error;
mod wire;

pub use client::MatrixClient;
pub use config::{ClientConfig, RouteConfig};
pub use error::SdkError;
