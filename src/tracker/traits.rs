//! tracker::traits
//!
//! IssueTracker trait definition for interacting with remote issue trackers.
//!
//! # Design
//!
//! The `IssueTracker` trait is async because tracker operations involve
//! network I/O. All methods return `Result` to handle API errors gracefully.
//!
//! The pipeline treats the tracker as a black box honoring the GitHub-style
//! protocol: a connectivity probe, a label listing, label creation, and
//! issue creation. Mutating calls are isolated per item by the caller; the
//! tracker itself performs no batching or rollback.
//!
//! # Example
//!
//! ```ignore
//! use issuesmith::tracker::{IssueSpec, IssueTracker};
//!
//! async fn file_one(tracker: &dyn IssueTracker) -> Result<(), TrackerError> {
//!     let spec = IssueSpec {
//!         title: "Add login".to_string(),
//!         body: "Users need to sign in.".to_string(),
//!         labels: vec!["feature".to_string()],
//!     };
//!     let issue = tracker.create_issue(&spec).await?;
//!     println!("Created issue #{}: {}", issue.number, issue.url);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from tracker operations.
///
/// These error types map to common failure modes when interacting with
/// remote issue trackers like GitHub.
#[derive(Debug, Clone, Error)]
pub enum TrackerError {
    /// Authentication failed (invalid token, expired, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error (no interpretable status code).
    #[error("network error: {0}")]
    NetworkError(String),
}

impl TrackerError {
    /// Whether this error is a transport failure rather than a rejection.
    ///
    /// A transport failure means no HTTP exchange completed; a rejection is
    /// a valid but unsuccessful status code.
    pub fn is_transport(&self) -> bool {
        matches!(self, TrackerError::NetworkError(_))
    }

    /// The HTTP status this error corresponds to, where one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            TrackerError::AuthFailed(_) => Some(401),
            TrackerError::NotFound(_) => Some(404),
            TrackerError::RateLimited => Some(429),
            TrackerError::ApiError { status, .. } => Some(*status),
            TrackerError::NetworkError(_) => None,
        }
    }
}

/// A candidate issue produced by the generator.
///
/// Immutable once received. Label order matters: it defines the first-seen
/// order used during reconciliation. Duplicate labels are allowed and
/// treated as a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSpec {
    /// Issue title (non-empty)
    pub title: String,
    /// Issue body
    #[serde(default)]
    pub body: String,
    /// Label names to attach
    #[serde(default)]
    pub labels: Vec<String>,
}

/// A label as known to the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label name; the tracker's identity key (case-sensitive)
    pub name: String,
    /// 6-hex-digit RGB color, no leading `#`
    pub color: String,
}

/// An issue created in the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIssue {
    /// Issue number assigned by the tracker
    pub number: u64,
    /// Web URL for viewing the issue
    pub url: String,
}

/// Outcome of a create-label call.
///
/// `AlreadyExists` is an idempotent success: the tracker refused the
/// duplicate, which is exactly the state the caller wanted. The color of a
/// pre-existing label is not verified against the deterministic color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelCreation {
    /// The label was created.
    Created,
    /// A label with this name already existed.
    AlreadyExists,
}

/// The IssueTracker trait for interacting with remote issue trackers.
///
/// v1 implements GitHub only. Implementations must be `Send + Sync` to
/// allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, TrackerError>`. Callers should handle:
/// - `AuthFailed`: Token is invalid or lacks permissions
/// - `NotFound`: Repository or resource doesn't exist
/// - `RateLimited`: Back off before retrying
/// - `ApiError`: Display the tracker-provided message
/// - `NetworkError`: Check connectivity
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Get the tracker name (e.g., "github").
    fn name(&self) -> &'static str;

    /// Probe connectivity to the target repository.
    ///
    /// A successful return means the repository is reachable with the
    /// configured credentials. This is a read-only call; no mutation
    /// happens before it succeeds.
    async fn check_connectivity(&self) -> Result<(), TrackerError>;

    /// List the labels currently present in the repository.
    ///
    /// The result is a point-in-time snapshot; concurrent external
    /// mutation is out of scope.
    async fn list_labels(&self) -> Result<Vec<Label>, TrackerError>;

    /// Create a label.
    ///
    /// Returns `LabelCreation::AlreadyExists` when the tracker reports the
    /// name as taken (HTTP 422 on GitHub); callers treat that as success.
    async fn create_label(&self, label: &Label) -> Result<LabelCreation, TrackerError>;

    /// Create an issue from a spec.
    ///
    /// Labels are referenced by name; unknown names are silently dropped by
    /// GitHub-style APIs, which is why reconciliation must run first.
    async fn create_issue(&self, spec: &IssueSpec) -> Result<CreatedIssue, TrackerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_error_display() {
        assert_eq!(
            format!("{}", TrackerError::AuthFailed("expired token".into())),
            "authentication failed: expired token"
        );
        assert_eq!(
            format!("{}", TrackerError::NotFound("owner/repo".into())),
            "not found: owner/repo"
        );
        assert_eq!(format!("{}", TrackerError::RateLimited), "rate limited");
        assert_eq!(
            format!(
                "{}",
                TrackerError::ApiError {
                    status: 422,
                    message: "Validation Failed".into()
                }
            ),
            "API error: 422 - Validation Failed"
        );
        assert_eq!(
            format!("{}", TrackerError::NetworkError("connection refused".into())),
            "network error: connection refused"
        );
    }

    #[test]
    fn transport_classification() {
        assert!(TrackerError::NetworkError("timeout".into()).is_transport());
        assert!(!TrackerError::RateLimited.is_transport());
        assert!(!TrackerError::ApiError {
            status: 500,
            message: "oops".into()
        }
        .is_transport());
    }

    #[test]
    fn error_status_mapping() {
        assert_eq!(TrackerError::AuthFailed("x".into()).status(), Some(401));
        assert_eq!(TrackerError::NotFound("x".into()).status(), Some(404));
        assert_eq!(TrackerError::RateLimited.status(), Some(429));
        assert_eq!(
            TrackerError::ApiError {
                status: 422,
                message: "x".into()
            }
            .status(),
            Some(422)
        );
        assert_eq!(TrackerError::NetworkError("x".into()).status(), None);
    }

    #[test]
    fn issue_spec_deserializes_with_defaults() {
        let spec: IssueSpec = serde_json::from_str(r#"{"title": "Add login"}"#).unwrap();
        assert_eq!(spec.title, "Add login");
        assert_eq!(spec.body, "");
        assert!(spec.labels.is_empty());
    }
}
