//! tracker::github
//!
//! GitHub tracker implementation using the REST API.
//!
//! # Design
//!
//! This module implements the `IssueTracker` trait for GitHub:
//! - `GET /repos/{owner}/{repo}` as the connectivity probe
//! - `GET /repos/{owner}/{repo}/labels` to snapshot existing labels
//! - `POST /repos/{owner}/{repo}/labels` to create labels (422 = exists)
//! - `POST /repos/{owner}/{repo}/issues` to create issues
//!
//! # Rate Limiting
//!
//! GitHub has rate limits. This implementation returns
//! `TrackerError::RateLimited` when limits are hit; pacing between
//! mutating calls is the pipeline's responsibility.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use async_trait::async_trait;

use super::traits::{CreatedIssue, IssueSpec, IssueTracker, Label, LabelCreation, TrackerError};

/// Default GitHub API base URL.
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "issuesmith-cli";

/// Labels per page when listing (GitHub's maximum).
const LABELS_PER_PAGE: u32 = 100;

/// GitHub tracker implementation.
///
/// Holds a bearer token and a target repository. The API base is
/// configurable for GitHub Enterprise installations and for tests.
pub struct GitHubTracker {
    /// HTTP client for making requests
    client: Client,
    /// Personal access token or app token
    token: String,
    /// Repository owner (user or organization)
    owner: String,
    /// Repository name
    repo: String,
    /// API base URL
    api_base: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubTracker")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GitHubTracker {
    /// Create a new GitHub tracker for `owner/repo`.
    pub fn new(
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Create a GitHub tracker with a custom API base URL.
    ///
    /// Use this for GitHub Enterprise installations
    /// (e.g., `https://github.example.com/api/v3`).
    pub fn with_api_base(
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
            api_base: api_base.into(),
        }
    }

    /// Get the repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Build common headers for API requests.
    fn headers(&self) -> Result<HeaderMap, TrackerError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token))
                .map_err(|_| TrackerError::AuthFailed("token contains invalid bytes".into()))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        Ok(headers)
    }

    /// Build URL for a repository endpoint.
    fn repo_url(&self, path: &str) -> String {
        if path.is_empty() {
            format!("{}/repos/{}/{}", self.api_base, self.owner, self.repo)
        } else {
            format!(
                "{}/repos/{}/{}/{}",
                self.api_base, self.owner, self.repo, path
            )
        }
    }

    /// Handle API response, mapping errors appropriately.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: Response,
    ) -> Result<T, TrackerError> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| TrackerError::ApiError {
                status: status.as_u16(),
                message: format!("Failed to parse response: {}", e),
            })
        } else {
            Err(error_from_response(response, status).await)
        }
    }
}

/// Map a non-success response to a `TrackerError`.
async fn error_from_response(response: Response, status: StatusCode) -> TrackerError {
    // Try to get the error message from the body
    let message = match response.json::<GitHubErrorResponse>().await {
        Ok(err) => err.message,
        Err(_) => "Unknown error".to_string(),
    };

    match status {
        StatusCode::UNAUTHORIZED => TrackerError::AuthFailed("Invalid or expired token".into()),
        StatusCode::FORBIDDEN => TrackerError::AuthFailed(format!("Permission denied: {}", message)),
        StatusCode::NOT_FOUND => TrackerError::NotFound(message),
        StatusCode::TOO_MANY_REQUESTS => TrackerError::RateLimited,
        _ if status.is_server_error() => TrackerError::ApiError {
            status: status.as_u16(),
            message: format!("GitHub server error: {}", message),
        },
        _ => TrackerError::ApiError {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn check_connectivity(&self) -> Result<(), TrackerError> {
        let url = self.repo_url("");

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| TrackerError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(error_from_response(response, status).await)
        }
    }

    async fn list_labels(&self) -> Result<Vec<Label>, TrackerError> {
        let mut all_labels = Vec::new();
        let mut page: u32 = 1;

        loop {
            let url = format!(
                "{}?per_page={}&page={}",
                self.repo_url("labels"),
                LABELS_PER_PAGE,
                page
            );

            let response = self
                .client
                .get(&url)
                .headers(self.headers()?)
                .send()
                .await
                .map_err(|e| TrackerError::NetworkError(e.to_string()))?;

            let page_labels: Vec<GitHubLabel> = self.handle_response(response).await?;
            let page_count = page_labels.len();
            all_labels.extend(page_labels.into_iter().map(Into::into));

            if page_count < LABELS_PER_PAGE as usize {
                break;
            }
            page += 1;
        }

        Ok(all_labels)
    }

    async fn create_label(&self, label: &Label) -> Result<LabelCreation, TrackerError> {
        let url = self.repo_url("labels");

        let body = CreateLabelBody {
            name: &label.name,
            color: &label.color,
        };

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| TrackerError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(LabelCreation::Created)
        } else if status == StatusCode::UNPROCESSABLE_ENTITY {
            // 422 means the name is taken; the desired state already holds.
            Ok(LabelCreation::AlreadyExists)
        } else {
            Err(error_from_response(response, status).await)
        }
    }

    async fn create_issue(&self, spec: &IssueSpec) -> Result<CreatedIssue, TrackerError> {
        let url = self.repo_url("issues");

        let body = CreateIssueBody {
            title: &spec.title,
            body: &spec.body,
            labels: &spec.labels,
        };

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| TrackerError::NetworkError(e.to_string()))?;

        let issue: GitHubIssue = self.handle_response(response).await?;
        Ok(issue.into())
    }
}

// --------------------------------------------------------------------------
// API Request/Response Types
// --------------------------------------------------------------------------

/// Request body for creating a label.
#[derive(Serialize)]
struct CreateLabelBody<'a> {
    name: &'a str,
    color: &'a str,
}

/// Request body for creating an issue.
#[derive(Serialize)]
struct CreateIssueBody<'a> {
    title: &'a str,
    body: &'a str,
    labels: &'a [String],
}

/// GitHub error response format.
#[derive(Deserialize)]
struct GitHubErrorResponse {
    message: String,
}

/// GitHub label response format (subset).
#[derive(Deserialize)]
struct GitHubLabel {
    name: String,
    color: String,
}

impl From<GitHubLabel> for Label {
    fn from(gh: GitHubLabel) -> Self {
        Label {
            name: gh.name,
            color: gh.color,
        }
    }
}

/// GitHub issue response format (subset).
#[derive(Deserialize)]
struct GitHubIssue {
    number: u64,
    html_url: String,
}

impl From<GitHubIssue> for CreatedIssue {
    fn from(gh: GitHubIssue) -> Self {
        CreatedIssue {
            number: gh.number,
            url: gh.html_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_tracker() {
        let tracker = GitHubTracker::new("token", "octocat", "hello-world");
        assert_eq!(tracker.name(), "github");
        assert_eq!(tracker.owner(), "octocat");
        assert_eq!(tracker.repo(), "hello-world");
    }

    #[test]
    fn repo_url_format() {
        let tracker = GitHubTracker::new("token", "octocat", "hello-world");
        assert_eq!(
            tracker.repo_url(""),
            "https://api.github.com/repos/octocat/hello-world"
        );
        assert_eq!(
            tracker.repo_url("labels"),
            "https://api.github.com/repos/octocat/hello-world/labels"
        );
        assert_eq!(
            tracker.repo_url("issues"),
            "https://api.github.com/repos/octocat/hello-world/issues"
        );
    }

    #[test]
    fn with_api_base_overrides_default() {
        let tracker = GitHubTracker::with_api_base(
            "token",
            "owner",
            "repo",
            "https://github.example.com/api/v3",
        );
        assert_eq!(
            tracker.repo_url(""),
            "https://github.example.com/api/v3/repos/owner/repo"
        );
    }

    #[test]
    fn debug_redacts_token() {
        let tracker = GitHubTracker::new("secret_token_abc123", "owner", "repo");
        let debug_output = format!("{:?}", tracker);
        assert!(!debug_output.contains("secret_token_abc123"));
        assert!(debug_output.contains("owner"));
    }

    #[test]
    fn github_label_converts() {
        let gh = GitHubLabel {
            name: "bug".to_string(),
            color: "ea47b9".to_string(),
        };
        let label: Label = gh.into();
        assert_eq!(label.name, "bug");
        assert_eq!(label.color, "ea47b9");
    }

    #[test]
    fn github_issue_converts() {
        let gh = GitHubIssue {
            number: 17,
            html_url: "https://github.com/owner/repo/issues/17".to_string(),
        };
        let issue: CreatedIssue = gh.into();
        assert_eq!(issue.number, 17);
        assert_eq!(issue.url, "https://github.com/owner/repo/issues/17");
    }
}
