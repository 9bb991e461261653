//! config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Configuration lives in a TOML file (`issuesmith.toml` by default, or
//! whatever `--config` points at). Secrets may be omitted from the file
//! and supplied via environment variables instead:
//!
//! - `github_token` falls back to `$GITHUB_TOKEN`
//! - `openai_api_key` falls back to `$OPENAI_API_KEY`
//!
//! Every field is required; a missing one is a fatal precondition failure
//! reported before any network call. The resolved [`Config`] is threaded
//! explicitly through the pipeline; there is no ambient or global state.
//!
//! # Example
//!
//! ```toml
//! owner = "octocat"
//! repo = "hello-world"
//! github_token = "ghp_xxx"
//! openai_api_key = "sk-xxx"
//! project_description = "A todo app with offline sync"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("missing required config field '{0}'")]
    MissingField(&'static str),
}

/// On-disk configuration schema.
///
/// All fields optional here so that absence can be reported as a
/// `MissingField` precondition failure (or filled from the environment)
/// rather than a serde parse error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    /// Repository owner (user or organization)
    pub owner: Option<String>,
    /// Repository name
    pub repo: Option<String>,
    /// GitHub token; falls back to $GITHUB_TOKEN
    pub github_token: Option<String>,
    /// OpenAI API key; falls back to $OPENAI_API_KEY
    pub openai_api_key: Option<String>,
    /// Free-text project description to generate issues from
    pub project_description: Option<String>,
    /// OpenAI model override
    pub openai_model: Option<String>,
    /// GitHub API base override (GitHub Enterprise)
    pub github_api_url: Option<String>,
    /// OpenAI endpoint override (Azure OpenAI, proxies)
    pub openai_api_url: Option<String>,
}

impl RawConfig {
    /// Parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Resolve into a validated [`Config`], applying environment fallbacks.
    pub fn resolve(self) -> Result<Config, ConfigError> {
        let github_token = self
            .github_token
            .or_else(|| env_non_empty("GITHUB_TOKEN"))
            .ok_or(ConfigError::MissingField("github_token"))?;
        let openai_api_key = self
            .openai_api_key
            .or_else(|| env_non_empty("OPENAI_API_KEY"))
            .ok_or(ConfigError::MissingField("openai_api_key"))?;

        Ok(Config {
            owner: require(self.owner, "owner")?,
            repo: require(self.repo, "repo")?,
            github_token: non_empty(github_token, "github_token")?,
            openai_api_key: non_empty(openai_api_key, "openai_api_key")?,
            project_description: require(self.project_description, "project_description")?,
            openai_model: self.openai_model,
            github_api_url: self.github_api_url,
            openai_api_url: self.openai_api_url,
        })
    }
}

/// Fully-resolved configuration: every required field present and non-empty.
#[derive(Debug, Clone)]
pub struct Config {
    pub owner: String,
    pub repo: String,
    pub github_token: String,
    pub openai_api_key: String,
    pub project_description: String,
    pub openai_model: Option<String>,
    pub github_api_url: Option<String>,
    pub openai_api_url: Option<String>,
}

impl Config {
    /// Load and resolve configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        RawConfig::load(path)?.resolve()
    }
}

fn require(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(v) => non_empty(v, field),
        None => Err(ConfigError::MissingField(field)),
    }
}

fn non_empty(value: String, field: &'static str) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::MissingField(field))
    } else {
        Ok(value)
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
