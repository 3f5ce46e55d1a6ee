//! Public configuration types.
//!
//! These are the resolved, ready-to-use structs the rest of the crate
//! consumes. Raw TOML deserialization types live in `raw.rs`.

// ── HTTP ─────────────────────────────────────────────────────────────────────

/// HTTP listener configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Socket address to bind the axum listener to.
    pub bind: String,
}

// ── Generation pipeline ──────────────────────────────────────────────────────

/// Generation pipeline configuration.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Whether the short-circuit table is consulted before calling upstream.
    pub shortcircuit: bool,
}

// ── LLM ──────────────────────────────────────────────────────────────────────

/// Anthropic Messages API provider configuration.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// Full endpoint URL, e.g. `https://api.anthropic.com/v1/messages`.
    pub api_base_url: String,
    /// Model identifier sent in the request body.
    pub model: String,
    /// Upper bound on generated tokens per request.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Client-side timeout for the single upstream round-trip.
    pub timeout_seconds: u64,
}

/// LLM provider selection plus per-provider settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Provider name: `"anthropic"` or `"dummy"`.
    pub provider: String,
    pub anthropic: AnthropicConfig,
}

// ── Top-level ────────────────────────────────────────────────────────────────

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub service_name: String,
    pub log_level: String,
    pub http: HttpConfig,
    pub generate: GenerateConfig,
    pub llm: LlmConfig,
    /// From `ANTHROPIC_API_KEY` env — never TOML. `None` means generation
    /// requests fail closed with "Server not configured".
    pub llm_api_key: Option<String>,
}
