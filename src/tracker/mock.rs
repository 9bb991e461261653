//! tracker::mock
//!
//! Mock tracker implementation for deterministic testing.
//!
//! # Design
//!
//! The mock tracker provides a deterministic implementation of the
//! `IssueTracker` trait for use in tests. It stores labels and issues in
//! memory and allows configuring failure scenarios, both blanket
//! (connectivity, listing) and per-item (a specific label name or issue
//! title).
//!
//! # Example
//!
//! ```
//! use issuesmith::tracker::mock::MockTracker;
//! use issuesmith::tracker::{IssueSpec, IssueTracker};
//!
//! # tokio_test::block_on(async {
//! let tracker = MockTracker::new();
//!
//! let issue = tracker.create_issue(&IssueSpec {
//!     title: "Add login".to_string(),
//!     body: "Users need to sign in.".to_string(),
//!     labels: vec!["feature".to_string()],
//! }).await.unwrap();
//!
//! assert_eq!(issue.number, 1);
//! assert_eq!(tracker.issue_count(), 1);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use super::traits::{CreatedIssue, IssueSpec, IssueTracker, Label, LabelCreation, TrackerError};

/// Mock tracker for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone)]
pub struct MockTracker {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockTrackerInner>>,
}

/// Internal mutable state.
#[derive(Debug)]
struct MockTrackerInner {
    /// Labels present in the repository.
    labels: Vec<Label>,
    /// Issues created, in creation order.
    issues: Vec<(IssueSpec, CreatedIssue)>,
    /// Next issue number to assign.
    next_issue_number: u64,
    /// Error for the connectivity probe.
    fail_connectivity: Option<TrackerError>,
    /// Error for label listing.
    fail_list_labels: Option<TrackerError>,
    /// Errors for specific label names.
    fail_create_label: HashMap<String, TrackerError>,
    /// Errors for specific issue titles.
    fail_create_issue: HashMap<String, TrackerError>,
    /// Label names hidden from listing (simulates a stale snapshot).
    omit_from_listing: HashSet<String>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    CheckConnectivity,
    ListLabels,
    CreateLabel { name: String, color: String },
    CreateIssue { title: String, labels: Vec<String> },
}

impl MockTracker {
    /// Create a new empty mock tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockTrackerInner {
                labels: Vec::new(),
                issues: Vec::new(),
                next_issue_number: 1,
                fail_connectivity: None,
                fail_list_labels: None,
                fail_create_label: HashMap::new(),
                fail_create_issue: HashMap::new(),
                omit_from_listing: HashSet::new(),
                operations: Vec::new(),
            })),
        }
    }

    /// Create a mock tracker with pre-existing labels.
    pub fn with_labels(labels: Vec<Label>) -> Self {
        let tracker = Self::new();
        {
            let mut inner = tracker.inner.lock().unwrap();
            inner.labels = labels;
        }
        tracker
    }

    /// Configure the connectivity probe to fail.
    pub fn fail_connectivity(self, error: TrackerError) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_connectivity = Some(error);
        }
        self
    }

    /// Configure label listing to fail.
    pub fn fail_list_labels(self, error: TrackerError) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_list_labels = Some(error);
        }
        self
    }

    /// Configure creation of a specific label to fail.
    pub fn fail_create_label(self, name: impl Into<String>, error: TrackerError) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_create_label.insert(name.into(), error);
        }
        self
    }

    /// Configure creation of an issue with a specific title to fail.
    pub fn fail_create_issue(self, title: impl Into<String>, error: TrackerError) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_create_issue.insert(title.into(), error);
        }
        self
    }

    /// Hide a label from listing while keeping it present for creation.
    ///
    /// Simulates the stale-snapshot case where a label appears between the
    /// listing and the create attempt.
    pub fn omit_from_listing(self, name: impl Into<String>) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.omit_from_listing.insert(name.into());
        }
        self
    }

    /// Get all recorded operations.
    ///
    /// Useful for verifying call order and that no mutation happened after
    /// a fatal failure.
    pub fn operations(&self) -> Vec<MockOperation> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    /// Get the labels currently stored (for test verification).
    pub fn labels(&self) -> Vec<Label> {
        let inner = self.inner.lock().unwrap();
        inner.labels.clone()
    }

    /// Get the issues created so far, in creation order.
    pub fn issues(&self) -> Vec<(IssueSpec, CreatedIssue)> {
        let inner = self.inner.lock().unwrap();
        inner.issues.clone()
    }

    /// Get the count of created issues.
    pub fn issue_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.issues.len()
    }

    /// Record an operation.
    fn record(&self, op: MockOperation) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(op);
    }
}

impl Default for MockTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn check_connectivity(&self) -> Result<(), TrackerError> {
        self.record(MockOperation::CheckConnectivity);

        let inner = self.inner.lock().unwrap();
        match &inner.fail_connectivity {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    async fn list_labels(&self) -> Result<Vec<Label>, TrackerError> {
        self.record(MockOperation::ListLabels);

        let inner = self.inner.lock().unwrap();
        match &inner.fail_list_labels {
            Some(e) => Err(e.clone()),
            None => Ok(inner
                .labels
                .iter()
                .filter(|l| !inner.omit_from_listing.contains(&l.name))
                .cloned()
                .collect()),
        }
    }

    async fn create_label(&self, label: &Label) -> Result<LabelCreation, TrackerError> {
        self.record(MockOperation::CreateLabel {
            name: label.name.clone(),
            color: label.color.clone(),
        });

        let mut inner = self.inner.lock().unwrap();
        if let Some(e) = inner.fail_create_label.get(&label.name) {
            return Err(e.clone());
        }

        if inner.labels.iter().any(|l| l.name == label.name) {
            return Ok(LabelCreation::AlreadyExists);
        }

        inner.labels.push(label.clone());
        Ok(LabelCreation::Created)
    }

    async fn create_issue(&self, spec: &IssueSpec) -> Result<CreatedIssue, TrackerError> {
        self.record(MockOperation::CreateIssue {
            title: spec.title.clone(),
            labels: spec.labels.clone(),
        });

        let mut inner = self.inner.lock().unwrap();
        if let Some(e) = inner.fail_create_issue.get(&spec.title) {
            return Err(e.clone());
        }

        let number = inner.next_issue_number;
        inner.next_issue_number += 1;

        let issue = CreatedIssue {
            number,
            url: format!("https://github.com/mock/repo/issues/{}", number),
        };
        inner.issues.push((spec.clone(), issue.clone()));
        Ok(issue)
    }
}
