//! generator
//!
//! Abstraction for turning a project description into candidate issues.
//!
//! # Architecture
//!
//! The `IssueGenerator` trait treats the generative model as an opaque
//! function: description in, ordered list of issue specs (or a failure)
//! out. The pipeline depends only on the trait; [`openai`] implements it
//! over the chat-completions API and [`mock`] provides a deterministic
//! stand-in for tests.
//!
//! # Modules
//!
//! - [`openai`]: OpenAI chat-completions implementation
//! - [`mock`]: Fixed-output implementation for deterministic testing
//! - `prompt`: Prompt construction

pub mod mock;
pub mod openai;
mod prompt;

pub use prompt::build_prompt;

use async_trait::async_trait;
use thiserror::Error;

use crate::tracker::IssueSpec;

/// Errors from issue generation.
#[derive(Debug, Clone, Error)]
pub enum GeneratorError {
    /// The model API returned an error.
    #[error("generator API error: {0}")]
    Api(String),

    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),

    /// The model's output could not be parsed into an issue list.
    #[error("invalid generator response: {0}")]
    InvalidResponse(String),
}

/// The IssueGenerator trait for producing candidate issues.
///
/// Implementations must be `Send + Sync`. An empty result is a valid
/// return value here; the pipeline treats it as a failure.
#[async_trait]
pub trait IssueGenerator: Send + Sync {
    /// Get the generator name (e.g., "openai").
    fn name(&self) -> &'static str;

    /// Generate an ordered list of issue specs from a project description.
    async fn generate(&self, description: &str) -> Result<Vec<IssueSpec>, GeneratorError>;
}

/// Parse a model response into an issue list.
///
/// Models sometimes wrap the JSON array in markdown code fences despite
/// instructions; those are stripped before parsing. An entry with an empty
/// title invalidates the whole response rather than being silently
/// dropped, since the caller would otherwise submit an issue the tracker
/// is guaranteed to reject.
pub(crate) fn parse_issue_list(content: &str) -> Result<Vec<IssueSpec>, GeneratorError> {
    let cleaned = content
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string();

    let specs: Vec<IssueSpec> = serde_json::from_str(&cleaned)
        .map_err(|e| GeneratorError::InvalidResponse(format!("not a JSON issue array: {}", e)))?;

    if let Some(pos) = specs.iter().position(|s| s.title.trim().is_empty()) {
        return Err(GeneratorError::InvalidResponse(format!(
            "issue at index {} has an empty title",
            pos
        )));
    }

    Ok(specs)
}
