// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report text optimization through a chat-completions API
//!
//! The rendered report is sent as the user message of a single
//! chat-completion request; the first choice's content, trimmed, replaces it.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default chat-completions endpoint
pub const DEFAULT_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";

/// Default model name
pub const DEFAULT_MODEL: &str = "glm-4-flash";

/// Default completion budget
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

const SYSTEM_PROMPT: &str = "You are a technical writing assistant. Improve the following \
git commit report so that it is clearer, more professional and easier to read. Keep the \
original structure and every piece of information; change only wording, formatting and \
readability.";

/// Errors from the optimization service
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// The API URL or key is not set
    #[error("AI API configuration not found. Set AI_API_URL and AI_API_KEY")]
    MissingConfiguration,

    /// The request could not be sent or the response not read
    #[error("AI API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("AI API request failed with status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// The response body is not a chat completion
    #[error("Invalid AI API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The completion contained no choices
    #[error("Invalid AI API response: no choices found")]
    EmptyChoices,
}

/// Optimization service settings
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Chat-completions endpoint
    pub api_url: String,
    /// Bearer token; required
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// Completion budget
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl OptimizerConfig {
    /// Whether both an endpoint and a key are present
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_url.trim().is_empty()
            && self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Client for the optimization service
#[derive(Debug, Clone)]
pub struct Optimizer {
    client: reqwest::Client,
    config: OptimizerConfig,
}

impl Optimizer {
    /// Create an optimizer
    ///
    /// A missing key is reported by [`Optimizer::optimize`], so a server can
    /// start without one.
    ///
    /// # Errors
    ///
    /// Returns `OptimizeError::Request` if the HTTP client cannot be built.
    pub fn new(config: OptimizerConfig) -> Result<Self, OptimizeError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// The settings this optimizer uses
    #[must_use]
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Rewrite report text for readability
    ///
    /// # Errors
    ///
    /// Returns `OptimizeError` if the service is not configured, unreachable,
    /// answers with an error status, or answers with something other than a
    /// chat completion.
    pub async fn optimize(&self, content: &str) -> Result<String, OptimizeError> {
        let api_key = match self.config.api_key.as_deref().map(str::trim) {
            Some(key) if self.config.is_configured() => key,
            _ => return Err(OptimizeError::MissingConfiguration),
        };

        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!(url = %self.config.api_url, model = %self.config.model, "requesting optimization");
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(OptimizeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatResponse = serde_json::from_str(&body)?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(OptimizeError::EmptyChoices)?;
        Ok(choice.message.content.trim().to_string())
    }
}
