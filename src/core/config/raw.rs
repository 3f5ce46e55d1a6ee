//! Raw TOML deserialization types.
//!
//! These structs mirror the TOML file shape and use `serde` defaults.
//! The `load` module converts them into the public `types` structs.

use serde::Deserialize;

// ── Top-level ────────────────────────────────────────────────────────────────

/// Raw TOML shape — serde target before resolution.
#[derive(Deserialize)]
pub(super) struct RawConfig {
    pub server: RawServer,
    #[serde(default)]
    pub http: RawHttp,
    #[serde(default)]
    pub generate: RawGenerate,
    #[serde(default)]
    pub llm: RawLlm,
}

#[derive(Deserialize)]
pub(super) struct RawServer {
    pub name: String,
    pub log_level: String,
}

// ── HTTP ─────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawHttp {
    #[serde(default = "default_http_bind")]
    pub bind: String,
}

impl Default for RawHttp {
    fn default() -> Self {
        Self { bind: default_http_bind() }
    }
}

// ── Generation ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawGenerate {
    #[serde(default = "default_true")]
    pub shortcircuit: bool,
}

impl Default for RawGenerate {
    fn default() -> Self {
        Self { shortcircuit: true }
    }
}

// ── LLM ──────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawLlm {
    #[serde(rename = "default", default = "default_llm_provider")]
    pub provider: String,
    #[serde(default)]
    pub anthropic: RawAnthropic,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            anthropic: RawAnthropic::default(),
        }
    }
}

#[derive(Deserialize)]
pub(super) struct RawAnthropic {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for RawAnthropic {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}

pub(super) fn default_http_bind() -> String {
    "127.0.0.1:8080".to_string()
}

pub(super) fn default_llm_provider() -> String {
    "anthropic".to_string()
}

pub(super) fn default_api_base_url() -> String {
    "https://api.anthropic.com/v1/messages".to_string()
}

pub(super) fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

pub(super) fn default_max_tokens() -> u32 {
    800
}

pub(super) fn default_temperature() -> f32 {
    0.7
}

pub(super) fn default_timeout_seconds() -> u64 {
    60
}
