//! issuesmith - generate labeled GitHub issues from a project description
//!
//! issuesmith takes a free-text project description, asks a generative
//! text model for a structured issue list, and materializes those issues
//! (and any labels they reference) in a GitHub repository.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates)
//! - [`config`] - Configuration schema, loading, and validation
//! - [`pipeline`] - Orchestrates probe → generate → reconcile → submit
//! - [`tracker`] - Abstraction for remote issue trackers (GitHub v1)
//! - [`generator`] - Abstraction for the issue-generating model
//! - [`color`] - Deterministic label colors
//! - [`ui`] - User interaction utilities
//!
//! # Correctness Invariants
//!
//! 1. No label present in the tracker's snapshot is ever re-created
//! 2. Label creation happens-before any issue creation
//! 3. Issues are submitted in strict input order, one paced request at a
//!    time, and results index-align with the input
//! 4. One item's failure never aborts the rest of the batch

pub mod cli;
pub mod color;
pub mod config;
pub mod generator;
pub mod pipeline;
pub mod tracker;
pub mod ui;
