//! LLM provider implementations.
//!
//! `build(config, api_key)` is the factory — called at startup.
//! Adding a new backend = new module + new match arm.

pub mod anthropic;
pub mod dummy;

use crate::config::LlmConfig;
use crate::llm::{LlmProvider, ProviderError};

/// Construct a `LlmProvider` from config and an optional API key.
///
/// `api_key` is sourced from `ANTHROPIC_API_KEY` env (never TOML). A missing
/// key is not a construction error — the anthropic provider fails closed per
/// request instead, so the server can come up before the key is provisioned.
pub fn build(config: &LlmConfig, api_key: Option<String>) -> Result<LlmProvider, ProviderError> {
    match config.provider.as_str() {
        "dummy" => Ok(LlmProvider::Dummy(dummy::DummyProvider::default())),
        "anthropic" => {
            let a = &config.anthropic;
            let p = anthropic::AnthropicProvider::new(
                a.api_base_url.clone(),
                a.model.clone(),
                a.max_tokens,
                a.temperature,
                a.timeout_seconds,
                api_key,
            )?;
            Ok(LlmProvider::Anthropic(p))
        }
        _ => Err(ProviderError::UnknownProvider(config.provider.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn builds_dummy_provider() {
        let config = Config::test_default();
        let p = build(&config.llm, None).unwrap();
        assert!(matches!(p, LlmProvider::Dummy(_)));
    }

    #[test]
    fn builds_anthropic_provider_without_key() {
        let mut config = Config::test_default();
        config.llm.provider = "anthropic".into();
        let p = build(&config.llm, None).unwrap();
        assert!(matches!(p, LlmProvider::Anthropic(_)));
    }

    #[test]
    fn unknown_provider_errors() {
        let mut config = Config::test_default();
        config.llm.provider = "gpt9".into();
        let err = build(&config.llm, None).unwrap_err();
        assert!(matches!(err, ProviderError::UnknownProvider(_)));
    }
}
