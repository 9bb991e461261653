//! pipeline::reconcile
//!
//! Label reconciliation: create the labels a batch references that the
//! repository does not yet have.
//!
//! # Design
//!
//! GitHub-style APIs accept unknown label names on issue creation and
//! silently drop them, so every label a batch references must exist before
//! any issue is submitted. Reconciliation takes a read-once snapshot of
//! the repository's labels, diffs the batch's requirements against it in
//! first-seen order, and creates only the missing ones with their
//! deterministic colors.
//!
//! A failure to *list* existing labels aborts the whole step: creating
//! labels on a repository whose state is unknown is assumed unsafe. A
//! failure to create one label is logged and skipped; the tracker
//! reporting the name as already taken is an idempotent success.

use std::collections::HashSet;

use crate::color::color_of;
use crate::tracker::{IssueSpec, IssueTracker, Label, LabelCreation, TrackerError};
use crate::ui::output::{self, Verbosity};

/// What happened to each label during reconciliation.
#[derive(Debug, Default)]
pub struct ReconcileReport {
    /// Labels created by this run, in creation order.
    pub created: Vec<Label>,
    /// Missing labels the tracker reported as already existing.
    pub already_existed: Vec<String>,
    /// Labels whose creation failed, with the error.
    pub failed: Vec<(String, TrackerError)>,
}

/// Compute the labels a batch requires, in first-seen order.
///
/// Duplicates within and across specs are collapsed; order is the order
/// names first appear walking the specs front to back.
pub fn required_labels(specs: &[IssueSpec]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut required = Vec::new();
    for spec in specs {
        for name in &spec.labels {
            if seen.insert(name.clone()) {
                required.push(name.clone());
            }
        }
    }
    required
}

/// Create the labels in `specs` that the tracker does not already have.
///
/// Returns an error only when the existing labels cannot be listed; that
/// aborts the step before any create-label call is made. Per-label
/// creation failures are recorded in the report and do not stop the loop.
pub async fn reconcile(
    tracker: &dyn IssueTracker,
    specs: &[IssueSpec],
    verbosity: Verbosity,
) -> Result<ReconcileReport, TrackerError> {
    let existing: HashSet<String> = tracker
        .list_labels()
        .await?
        .into_iter()
        .map(|l| l.name)
        .collect();

    let mut report = ReconcileReport::default();

    for name in required_labels(specs) {
        if existing.contains(&name) {
            continue;
        }

        let label = Label {
            color: color_of(&name),
            name,
        };

        match tracker.create_label(&label).await {
            Ok(LabelCreation::Created) => {
                output::print(format!("Created new label: {}", label.name), verbosity);
                report.created.push(label);
            }
            Ok(LabelCreation::AlreadyExists) => {
                // Snapshot was stale; the desired state holds anyway.
                output::debug(
                    format!("label {} already existed", label.name),
                    verbosity,
                );
                report.already_existed.push(label.name);
            }
            Err(e) => {
                output::warn(
                    format!("failed to create label {}: {}", label.name, e),
                    verbosity,
                );
                report.failed.push((label.name, e));
            }
        }
    }

    Ok(report)
}
