//! generator::openai
//!
//! OpenAI chat-completions implementation of `IssueGenerator`.
//!
//! # Design
//!
//! One request per generation: a system message framing the task and a
//! user message carrying the project description. The model is asked for a
//! bare JSON array; the shared parser strips markdown fences and rejects
//! entries with empty titles.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::prompt::{build_prompt, SYSTEM_PROMPT};
use super::{parse_issue_list, GeneratorError, IssueGenerator};
use crate::tracker::IssueSpec;

/// OpenAI chat-completions endpoint.
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Sampling temperature for issue generation.
const TEMPERATURE: f32 = 0.7;

/// Response token budget.
const MAX_TOKENS: u32 = 2000;

/// OpenAI-backed issue generator.
pub struct OpenAiGenerator {
    client: Client,
    api_key: String,
    model: String,
    api_url: String,
}

// Custom Debug to avoid exposing the API key
impl std::fmt::Debug for OpenAiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiGenerator")
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl OpenAiGenerator {
    /// Create a new generator with an API key, using the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            api_url: OPENAI_API_URL.to_string(),
        }
    }

    /// Use a specific model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Use a custom endpoint (Azure OpenAI, proxies, tests).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

#[async_trait]
impl IssueGenerator for OpenAiGenerator {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(&self, description: &str) -> Result<Vec<IssueSpec>, GeneratorError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(description),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| GeneratorError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GeneratorError::Network(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            // Prefer the structured error message when the body has one
            if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                return Err(GeneratorError::Api(err.error.message));
            }
            return Err(GeneratorError::Api(format!("{}: {}", status, body)));
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| GeneratorError::InvalidResponse(format!("malformed response: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GeneratorError::InvalidResponse("response has no content".into()))?;

        parse_issue_list(&content)
    }
}

// --------------------------------------------------------------------------
// API Request/Response Types
// --------------------------------------------------------------------------

/// Chat-completions request message.
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

/// Chat-completions request.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

/// Chat-completions response choice message.
#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Chat-completions response choice.
#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

/// Chat-completions response.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// API error payload.
#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// API error response wrapper.
#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}
