//! Anthropic Messages API provider (`/v1/messages`).
//!
//! Exposes a single `complete(&str, Option<&str>) -> String` interface
//! matching the rest of the `LlmProvider` abstraction. All wire types are
//! private to this module — callers never see them. No retries, no
//! streaming; one synchronous round-trip per call.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::llm::ProviderError;

/// Versioning header required by the Messages API.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Upstream error bodies are logged truncated to this many chars.
const ERROR_BODY_LOG_CHARS: usize = 500;

// ── Public provider ───────────────────────────────────────────────────────────

/// Adapter for the Anthropic Messages endpoint.
///
/// Constructed once at startup, then cheaply cloned because
/// `reqwest::Client` is an `Arc` internally. The API key is optional at
/// construction time; [`Self::complete`] fails closed with
/// [`ProviderError::NotConfigured`] when it is absent, without issuing the
/// call.
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    client: Client,
    api_base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    api_key: Option<String>,
}

impl AnthropicProvider {
    /// Build a provider from config values and an optional API key.
    ///
    /// `timeout_seconds` bounds the whole round-trip — there is no other
    /// timeout layer above this one.
    pub fn new(
        api_base_url: String,
        model: String,
        max_tokens: u32,
        temperature: f32,
        timeout_seconds: u64,
        api_key: Option<String>,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, api_base_url, model, max_tokens, temperature, api_key })
    }

    /// Send `content` as the user message and optionally `system` as the
    /// system prompt, returning the extracted reply text.
    ///
    /// Text parts of the response are joined with newlines. A body matching
    /// neither accepted shape is a [`ProviderError::Malformed`].
    pub async fn complete(&self, content: &str, system: Option<&str>) -> Result<String, ProviderError> {
        let key = self.api_key.as_deref().ok_or(ProviderError::NotConfigured)?;

        let payload = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: system.map(ToString::to_string),
            messages: vec![Message {
                role: "user".to_string(),
                content: content.to_string(),
            }],
        };

        debug!(
            model = %payload.model,
            max_tokens = payload.max_tokens,
            temperature = payload.temperature,
            content_len = content.len(),
            "sending generation request"
        );
        if tracing::enabled!(tracing::Level::TRACE) {
            let json = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|e| format!("<serialization failed: {e}>"));
            trace!(payload = %json, "full upstream request payload");
        }

        let response = self
            .client
            .post(&self.api_base_url)
            .header("x-api-key", key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(url = %self.api_base_url, error = %e, "upstream HTTP request failed (transport)");
                ProviderError::Request(e.to_string())
            })?;

        let response = check_status(response).await?;

        let parsed = response.json::<MessagesResponse>().await.map_err(|e| {
            error!(error = %e, "failed to deserialize upstream response");
            ProviderError::Malformed(format!("failed to parse response body: {e}"))
        })?;

        Ok(extract_text(parsed))
    }
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
}

/// Success body — either the Messages `content` parts array or the alternate
/// single-`output` schema.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MessagesResponse {
    Content { content: Vec<ContentPart> },
    Output { output: String },
}

/// One content part — an object carrying a `text` field (other fields such
/// as `type` are ignored) or a bare string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentPart {
    Block { text: String },
    Raw(String),
}

/// Concatenate the text parts of a response with newline separators.
fn extract_text(response: MessagesResponse) -> String {
    match response {
        MessagesResponse::Content { content } => content
            .into_iter()
            .map(|part| match part {
                ContentPart::Block { text } => text,
                ContentPart::Raw(text) => text,
            })
            .collect::<Vec<_>>()
            .join("\n"),
        MessagesResponse::Output { output } => output,
    }
}

// Error envelope used by the Messages API.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type", default)]
    kind: String,
    message: String,
}

/// Consume the response and return it if successful, or a structured error.
///
/// The upstream error body is logged (truncated) for diagnostics only —
/// it never reaches the caller's HTTP response.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());

    let message = if let Ok(env) = serde_json::from_str::<ErrorEnvelope>(&body) {
        format!("HTTP {status} [{}]: {}", env.error.kind, env.error.message)
    } else {
        format!("HTTP {status}: {}", truncate_chars(&body, ERROR_BODY_LOG_CHARS))
    };

    error!(%status, %message, "upstream request returned HTTP error");
    Err(ProviderError::Request(message))
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
