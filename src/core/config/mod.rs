//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory,
//! then applies `BASICGEN_BIND` and `BASICGEN_LOG_LEVEL` env overrides.
//! The API key comes from `ANTHROPIC_API_KEY` env only — never TOML.
//!
//! # Module layout
//!
//! - **types** — Public configuration structs (`Config`, `LlmConfig`, …).
//! - **raw** — Raw TOML deserialization types (`RawConfig`, `RawLlm`, …).
//!   These mirror the file shape and use serde defaults; kept private.
//! - **load** — Loading logic: `merge_toml`, `load_raw_merged`, `load`,
//!   `load_from`.

mod load;
mod raw;
mod types;

pub use load::{load, load_from};
pub use types::*;

#[cfg(test)]
impl Config {
    /// Safe `Config` for unit tests — dummy LLM, no API key, no external calls.
    pub fn test_default() -> Self {
        Self {
            service_name: "test".into(),
            log_level: "info".into(),
            http: HttpConfig {
                bind: "127.0.0.1:0".into(),
            },
            generate: GenerateConfig { shortcircuit: true },
            llm: LlmConfig {
                provider: "dummy".into(),
                anthropic: AnthropicConfig {
                    api_base_url: "http://localhost:0/v1/messages".into(),
                    model: "test-model".into(),
                    max_tokens: 800,
                    temperature: 0.0,
                    timeout_seconds: 1,
                },
            },
            llm_api_key: None,
        }
    }
}
