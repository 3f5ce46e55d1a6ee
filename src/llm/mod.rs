//! LLM provider abstraction.
//!
//! `LlmProvider` is an enum over concrete provider implementations.
//! Add a new variant + module in `providers/` for each additional backend.
//!
//! Provider instances are shared immutable capabilities — clone them freely.
//! Async is delegated to the underlying provider; `complete` is an
//! `async fn` on the enum so callers need no trait-object machinery.

pub mod providers;

use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    /// The credential is absent. Checked per request so the server can start
    /// without a key and fail closed on generation attempts.
    #[error("provider not configured: missing API key")]
    NotConfigured,
    #[error("provider request failed: {0}")]
    Request(String),
    /// Response body matched none of the accepted shapes. Rejected rather
    /// than silently passed through.
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// All available provider backends.
///
/// Enum dispatch avoids `dyn` trait objects and the `async-trait` dependency.
/// Adding a backend = new module + new variant + new `complete` arm.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    Anthropic(providers::anthropic::AnthropicProvider),
    Dummy(providers::dummy::DummyProvider),
}

impl LlmProvider {
    /// Send `content` as the user message, with an optional system prompt,
    /// and return the extracted text reply. One round-trip, no retries.
    pub async fn complete(&self, content: &str, system: Option<&str>) -> Result<String, ProviderError> {
        match self {
            LlmProvider::Anthropic(p) => p.complete(content, system).await,
            LlmProvider::Dummy(p) => p.complete(content, system).await,
        }
    }
}
