//! tracker
//!
//! Abstraction for remote issue trackers (GitHub v1).
//!
//! # Architecture
//!
//! The `IssueTracker` trait defines the interface for interacting with a
//! remote issue-tracking service. The pipeline depends only on the trait,
//! so tests run against the deterministic [`mock`] implementation and the
//! binary runs against [`github`].
//!
//! # Modules
//!
//! - `traits`: Core `IssueTracker` trait and request/response types
//! - [`github`]: GitHub implementation using the REST API
//! - [`mock`]: Mock implementation for deterministic testing

pub mod github;
pub mod mock;
mod traits;

pub use traits::*;
