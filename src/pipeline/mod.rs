//! pipeline
//!
//! Orchestrates: validate connectivity → generate → reconcile labels →
//! submit issues → report.
//!
//! # Design
//!
//! The pipeline is a linear state machine with no back-edges:
//!
//! ```text
//! Start → ConnectivityChecked → LabelsReconciled → IssuesSubmitted → Done
//! ```
//!
//! A fatal error is returned only before any tracker mutation: bad
//! configuration (handled by the caller), a failed connectivity probe, a
//! generator failure or empty issue list, or a failed label listing.
//! Per-label and per-issue problems are expected, recoverable-at-the-batch
//! conditions: they are recorded in the [`RunReport`] and the pipeline
//! still reaches `Done`.
//!
//! Everything is sequential. Label creation happens-before any issue
//! creation; issues are submitted in strict input order with a fixed
//! inter-request delay.

pub mod reconcile;
pub mod submit;

pub use reconcile::{reconcile, required_labels, ReconcileReport};
pub use submit::{submit_all, SubmissionResult, DEFAULT_DELAY};

use std::time::Duration;

use thiserror::Error;

use crate::generator::{GeneratorError, IssueGenerator};
use crate::tracker::{IssueSpec, IssueTracker, TrackerError};
use crate::ui::output::{self, Verbosity};

/// Fatal pipeline failures.
///
/// Every variant occurs before any issue is submitted; per-item failures
/// live in the [`RunReport`] instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The connectivity probe failed; the repository is unreachable.
    #[error("cannot reach repository: {0}")]
    Connectivity(TrackerError),

    /// The generator failed to produce an issue list.
    #[error("issue generation failed: {0}")]
    Generator(GeneratorError),

    /// The generator produced zero issues.
    #[error("no issues generated from the project description")]
    NoIssuesGenerated,

    /// Existing labels could not be listed; label state is unknown, so the
    /// batch is aborted before any submission.
    #[error("cannot list existing labels: {0}")]
    LabelListing(TrackerError),
}

/// Pipeline stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    ConnectivityChecked,
    LabelsReconciled,
    IssuesSubmitted,
    Done,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::ConnectivityChecked => "connectivity checked",
            Stage::LabelsReconciled => "labels reconciled",
            Stage::IssuesSubmitted => "issues submitted",
            Stage::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct RunReport {
    /// The specs the generator produced, in order.
    pub specs: Vec<IssueSpec>,
    /// What happened to each required label.
    pub labels: ReconcileReport,
    /// One result per spec, index-aligned.
    pub results: Vec<SubmissionResult>,
}

impl RunReport {
    /// Number of issues actually created.
    pub fn created_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_created()).count()
    }

    /// Number of issues that were rejected or lost to transport failures.
    pub fn failed_count(&self) -> usize {
        self.results.len() - self.created_count()
    }
}

/// Format the candidate list echoed before submission starts.
fn issue_list_lines(specs: &[IssueSpec]) -> Vec<String> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| format!("  {}. {}", i + 1, spec.title))
        .collect()
}

/// The issue-materialization pipeline.
///
/// Holds references to its collaborators; configuration is threaded in by
/// the caller rather than read from ambient state.
pub struct Pipeline<'a> {
    tracker: &'a dyn IssueTracker,
    generator: &'a dyn IssueGenerator,
    delay: Duration,
    verbosity: Verbosity,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline with the default inter-request delay.
    pub fn new(tracker: &'a dyn IssueTracker, generator: &'a dyn IssueGenerator) -> Self {
        Self {
            tracker,
            generator,
            delay: DEFAULT_DELAY,
            verbosity: Verbosity::Normal,
        }
    }

    /// Override the pause between successive issue-creation calls.
    ///
    /// Strict per-item ordering is preserved regardless of the delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set output verbosity.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Run the pipeline against a project description.
    ///
    /// Returns `Err` only for fatal precondition failures (see module docs);
    /// per-item failures are recorded in the returned report.
    pub async fn run(&self, description: &str) -> Result<RunReport, PipelineError> {
        output::debug(format!("stage: {}", Stage::Start), self.verbosity);

        self.tracker
            .check_connectivity()
            .await
            .map_err(PipelineError::Connectivity)?;
        output::debug(
            format!("stage: {}", Stage::ConnectivityChecked),
            self.verbosity,
        );

        let specs = self
            .generator
            .generate(description)
            .await
            .map_err(PipelineError::Generator)?;
        if specs.is_empty() {
            return Err(PipelineError::NoIssuesGenerated);
        }
        output::print(
            format!("Ready to create the following {} issues:", specs.len()),
            self.verbosity,
        );
        for line in issue_list_lines(&specs) {
            output::print(line, self.verbosity);
        }

        let labels = reconcile(self.tracker, &specs, self.verbosity)
            .await
            .map_err(PipelineError::LabelListing)?;
        output::debug(
            format!("stage: {}", Stage::LabelsReconciled),
            self.verbosity,
        );

        let results = submit_all(self.tracker, &specs, self.delay, self.verbosity).await;
        output::debug(
            format!("stage: {}", Stage::IssuesSubmitted),
            self.verbosity,
        );

        output::debug(format!("stage: {}", Stage::Done), self.verbosity);
        Ok(RunReport {
            specs,
            labels,
            results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::color_of;
    use crate::generator::mock::MockGenerator;
    use crate::tracker::mock::{MockOperation, MockTracker};
    use crate::tracker::Label;

    fn spec(title: &str, labels: &[&str]) -> IssueSpec {
        IssueSpec {
            title: title.to_string(),
            body: String::new(),
            labels: labels.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn end_to_end_creates_label_then_issue() {
        // One spec, one missing label.
        let tracker = MockTracker::new();
        let generator = MockGenerator::returning(vec![spec("Add login", &["feature"])]);

        let report = Pipeline::new(&tracker, &generator)
            .with_verbosity(Verbosity::Quiet)
            .run("a project")
            .await
            .unwrap();

        assert_eq!(report.labels.created.len(), 1);
        assert_eq!(report.labels.created[0].name, "feature");
        assert_eq!(report.labels.created[0].color, color_of("feature"));
        assert_eq!(report.results.len(), 1);
        assert!(matches!(
            report.results[0],
            SubmissionResult::Created { number: 1, .. }
        ));

        // Label creation happens-before issue creation.
        let ops = tracker.operations();
        let label_pos = ops
            .iter()
            .position(|op| matches!(op, MockOperation::CreateLabel { .. }))
            .unwrap();
        let issue_pos = ops
            .iter()
            .position(|op| matches!(op, MockOperation::CreateIssue { .. }))
            .unwrap();
        assert!(label_pos < issue_pos);
    }

    #[tokio::test(start_paused = true)]
    async fn shared_existing_label_is_never_recreated() {
        // Two specs share "bug", which already exists.
        let tracker = MockTracker::with_labels(vec![Label {
            name: "bug".into(),
            color: "ea47b9".into(),
        }]);
        let generator = MockGenerator::returning(vec![
            spec("Fix crash", &["bug"]),
            spec("Fix leak", &["bug"]),
        ]);

        let start = tokio::time::Instant::now();
        let report = Pipeline::new(&tracker, &generator)
            .with_verbosity(Verbosity::Quiet)
            .run("a project")
            .await
            .unwrap();

        assert!(report.labels.created.is_empty());
        assert!(!tracker
            .operations()
            .iter()
            .any(|op| matches!(op, MockOperation::CreateLabel { .. })));
        assert_eq!(report.created_count(), 2);
        // The two submissions are separated by the fixed delay.
        assert!(start.elapsed() >= DEFAULT_DELAY);
    }

    #[tokio::test]
    async fn connectivity_failure_halts_before_any_call() {
        // Probe returns 404.
        let tracker =
            MockTracker::new().fail_connectivity(TrackerError::NotFound("owner/repo".into()));
        let generator = MockGenerator::returning(vec![spec("Anything", &["bug"])]);

        let result = Pipeline::new(&tracker, &generator)
            .with_verbosity(Verbosity::Quiet)
            .run("a project")
            .await;

        assert!(matches!(result, Err(PipelineError::Connectivity(_))));
        assert_eq!(tracker.operations(), vec![MockOperation::CheckConnectivity]);
        assert!(generator.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_generation_halts_before_any_mutation() {
        // Generator yields zero issues.
        let tracker = MockTracker::new();
        let generator = MockGenerator::empty();

        let result = Pipeline::new(&tracker, &generator)
            .with_verbosity(Verbosity::Quiet)
            .run("a project")
            .await;

        assert!(matches!(result, Err(PipelineError::NoIssuesGenerated)));
        // Only the read-only probe ran.
        assert_eq!(tracker.operations(), vec![MockOperation::CheckConnectivity]);
    }

    #[tokio::test]
    async fn generator_failure_is_fatal() {
        let tracker = MockTracker::new();
        let generator = MockGenerator::failing(GeneratorError::Api("quota exceeded".into()));

        let result = Pipeline::new(&tracker, &generator)
            .with_verbosity(Verbosity::Quiet)
            .run("a project")
            .await;

        assert!(matches!(result, Err(PipelineError::Generator(_))));
    }

    #[tokio::test]
    async fn label_listing_failure_aborts_the_batch() {
        let tracker = MockTracker::new()
            .fail_list_labels(TrackerError::NetworkError("connection refused".into()));
        let generator = MockGenerator::returning(vec![spec("Add login", &["feature"])]);

        let result = Pipeline::new(&tracker, &generator)
            .with_verbosity(Verbosity::Quiet)
            .run("a project")
            .await;

        assert!(matches!(result, Err(PipelineError::LabelListing(_))));
        // No label or issue mutation happened.
        assert!(!tracker.operations().iter().any(|op| matches!(
            op,
            MockOperation::CreateLabel { .. } | MockOperation::CreateIssue { .. }
        )));
    }

    #[tokio::test(start_paused = true)]
    async fn per_item_failures_still_reach_done() {
        let tracker = MockTracker::new()
            .fail_create_label(
                "docs",
                TrackerError::ApiError {
                    status: 500,
                    message: "server error".into(),
                },
            )
            .fail_create_issue(
                "Write docs",
                TrackerError::ApiError {
                    status: 422,
                    message: "Validation Failed".into(),
                },
            );
        let generator = MockGenerator::returning(vec![
            spec("Add login", &["feature"]),
            spec("Write docs", &["docs"]),
        ]);

        let report = Pipeline::new(&tracker, &generator)
            .with_verbosity(Verbosity::Quiet)
            .run("a project")
            .await
            .unwrap();

        assert_eq!(report.labels.failed.len(), 1);
        assert_eq!(report.created_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.results.len(), report.specs.len());
    }

    #[test]
    fn candidate_list_is_numbered_in_input_order() {
        let specs = vec![spec("Add login", &[]), spec("Fix crash", &[])];
        assert_eq!(
            issue_list_lines(&specs),
            vec!["  1. Add login", "  2. Fix crash"]
        );
    }

    #[test]
    fn stage_display() {
        assert_eq!(format!("{}", Stage::Start), "start");
        assert_eq!(format!("{}", Stage::Done), "done");
    }
}
