//! Ollama client for viral segment proposals.
//!
//! Talks to a locally running Ollama instance over its chat API. Responses
//! are treated as untrusted: markdown code fences are stripped before JSON
//! parsing, and a malformed body is a fatal analysis error.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PipelineError, PipelineResult};

/// Ollama API client.
pub struct OllamaClient {
    host: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OllamaClient {
    /// Create a new client for `host` (e.g. `http://127.0.0.1:11434`).
    pub fn new(host: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            model: model.into(),
            client: Client::new(),
        }
    }

    /// Check that the Ollama service is reachable.
    pub async fn ping(&self) -> PipelineResult<()> {
        self.client
            .get(&self.host)
            .send()
            .await
            .map_err(|e| PipelineError::ai_failed(format!("Ollama not reachable: {}", e)))?;
        Ok(())
    }

    /// Send a single user prompt and return the assistant's raw text.
    pub async fn chat(&self, prompt: &str) -> PipelineResult<String> {
        let url = format!("{}/api/chat", self.host.trim_end_matches('/'));

        info!("Sending transcript to Ollama ({})", self.model);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::ai_failed(format!("Ollama request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::ai_failed(format!(
                "Ollama returned {}: {}",
                status, body
            )));
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            PipelineError::ai_failed(format!("Failed to parse Ollama response: {}", e))
        })?;

        debug!("Raw response from LLM:\n{}", chat.message.content);
        Ok(chat.message.content)
    }
}

/// Strip markdown code fences from a model response.
///
/// Models frequently wrap JSON output in ```json fences even when told not
/// to.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_prefix("```").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}
