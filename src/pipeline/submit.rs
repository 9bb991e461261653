//! pipeline::submit
//!
//! Paced, per-item-isolated issue submission.
//!
//! # Design
//!
//! Specs are submitted one at a time, in input order, with a fixed delay
//! between successive create calls to stay under the tracker's rate limit.
//! The delay is unconditional: no backoff, no header inspection. One
//! result is recorded per spec, index-aligned with the input, so a caller
//! has exact per-item provenance. A rejection or transport failure on one
//! issue never prevents the attempt on the next, and nothing is rolled
//! back.

use std::time::Duration;

use crate::tracker::{IssueSpec, IssueTracker, TrackerError};
use crate::ui::output::{self, Verbosity};

/// Default pause between successive create-issue calls.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Per-spec outcome of a submission batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// The tracker created the issue.
    Created {
        /// Issue number assigned by the tracker
        number: u64,
        /// Web URL for viewing the issue
        url: String,
    },
    /// The tracker returned an unsuccessful status.
    Rejected {
        /// HTTP status code, 0 when the error carries none
        status: u16,
        /// Tracker-provided message
        message: String,
    },
    /// The HTTP exchange did not complete.
    TransportError {
        /// Description of the failure
        message: String,
    },
}

impl SubmissionResult {
    /// Whether this result is a successful creation.
    pub fn is_created(&self) -> bool {
        matches!(self, SubmissionResult::Created { .. })
    }

    /// Classify a tracker error as a rejection or transport failure.
    fn from_error(error: TrackerError) -> Self {
        if error.is_transport() {
            SubmissionResult::TransportError {
                message: error.to_string(),
            }
        } else {
            SubmissionResult::Rejected {
                status: error.status().unwrap_or(0),
                message: error.to_string(),
            }
        }
    }
}

/// Submit every spec in order, pausing `delay` between attempts.
///
/// The returned sequence has the same length and order as `specs`,
/// regardless of individual failures. The pause follows every attempt
/// except the last; success and failure are paced identically.
pub async fn submit_all(
    tracker: &dyn IssueTracker,
    specs: &[IssueSpec],
    delay: Duration,
    verbosity: Verbosity,
) -> Vec<SubmissionResult> {
    let mut results = Vec::with_capacity(specs.len());

    for (i, spec) in specs.iter().enumerate() {
        output::print(
            format!("Creating issue {}/{}: {}...", i + 1, specs.len(), spec.title),
            verbosity,
        );

        let result = match tracker.create_issue(spec).await {
            Ok(issue) => {
                output::print(
                    format!("  - Issue #{} created: {}", issue.number, issue.url),
                    verbosity,
                );
                SubmissionResult::Created {
                    number: issue.number,
                    url: issue.url,
                }
            }
            Err(e) => {
                output::warn(
                    format!("failed to create issue \"{}\": {}", spec.title, e),
                    verbosity,
                );
                SubmissionResult::from_error(e)
            }
        };
        results.push(result);

        if i + 1 < specs.len() {
            tokio::time::sleep(delay).await;
        }
    }

    results
}
