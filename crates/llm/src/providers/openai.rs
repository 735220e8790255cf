//! OpenAI-compatible chat completion provider.
//!
//! This module talks to any endpoint implementing the OpenAI
//! `/v1/chat/completions` JSON API. Every failure is reported as a
//! transient completion error; the retry wrapper decides when to give up.

use crate::client::ChatClient;
use chunkwise_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat completions API request format.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat completions API response format.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatMessage,
}

/// Client for OpenAI-compatible completion endpoints.
pub struct OpenAiCompatClient {
    /// Base URL for the API
    base_url: String,

    /// Model identifier sent with every request
    model: String,

    /// Bearer token
    api_key: String,

    /// HTTP client
    client: reqwest::Client,
}

impl OpenAiCompatClient {
    /// Create a new client against the default OpenAI endpoint.
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, model, api_key)
    }

    /// Create a new client with a custom base URL.
    pub fn with_base_url(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    fn to_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: None,
        }
    }
}

#[async_trait::async_trait]
impl ChatClient for OpenAiCompatClient {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn ask(&self, prompt: &str) -> AppResult<String> {
        tracing::debug!("Sending completion request ({} chars)", prompt.len());

        let request = self.to_request(prompt);
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Completion(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Completion(format!(
                "Completion API error ({}): {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Completion(format!("Failed to parse response: {}", e)))?;

        let answer = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::Completion("Response contained no choices".to_string()))?;

        tracing::debug!("Received completion ({} chars)", answer.len());

        Ok(answer)
    }
}
