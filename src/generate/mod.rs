//! The generation pipeline — sanitize, short-circuit, upstream call,
//! post-process.
//!
//! [`Generator`] is the single component behind `/api/generate`. Every
//! request is independent: sanitize the prompt, consult the short-circuit
//! table (when enabled), otherwise make one upstream call and post-process
//! the reply into a constrained listing. No retries, no shared mutable
//! state.

pub mod listing;
pub mod sanitize;
pub mod shortcircuit;

use thiserror::Error;
use tracing::{debug, warn};

use crate::llm::{LlmProvider, ProviderError};

use self::shortcircuit::ShortCircuitRule;

/// System-prompt preamble constraining the model to line-numbered BASIC.
const SYSTEM_PREAMBLE: &str = "You are an assistant that outputs ONLY Commodore 64 BASIC code.\n\
Constraints:\n\
- Output must be valid C64 BASIC line-numbered program.\n\
- Use ascending line numbers, start at 10.\n\
- Avoid explanatory prose.\n\
- Keep program under ~120 lines.\n\
- Emphasize clarity and nostalgic style.";

// ── Error ─────────────────────────────────────────────────────────────────────

/// Request-scoped failures, each mapping to one HTTP status + message.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("empty prompt")]
    EmptyPrompt,
    #[error("prompt too long")]
    PromptTooLong,
    #[error("server not configured")]
    NotConfigured,
    #[error("upstream generation failed: {0}")]
    Upstream(String),
    #[error("no content produced")]
    NoContent,
    /// Outer boundary for failures outside the taxonomy above — surfaced as
    /// a generic 500 so internals never leak to the caller.
    #[error("internal error: {0}")]
    Internal(String),
}

// ── Output ────────────────────────────────────────────────────────────────────

/// The final listing returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub code: String,
    pub cached: bool,
}

// ── Generator ─────────────────────────────────────────────────────────────────

/// The request pipeline. Built once at startup and shared immutably.
pub struct Generator {
    provider: LlmProvider,
    rules: Vec<ShortCircuitRule>,
    shortcircuit: bool,
}

impl Generator {
    pub fn new(provider: LlmProvider, rules: Vec<ShortCircuitRule>, shortcircuit: bool) -> Self {
        Self { provider, rules, shortcircuit }
    }

    /// Run the full pipeline for one prompt.
    pub async fn generate(&self, prompt: &str) -> Result<Listing, GenerateError> {
        let cleaned = sanitize::sanitize(prompt)?;

        if self.shortcircuit {
            if let Some(code) = shortcircuit::lookup(&self.rules, &cleaned) {
                debug!(prompt_len = cleaned.len(), "short-circuit hit — no upstream call");
                return Ok(Listing { code, cached: true });
            }
        }

        let system = format!("{SYSTEM_PREAMBLE}\nUser request: {cleaned}");

        let content = match self.provider.complete(&cleaned, Some(&system)).await {
            Ok(text) => text,
            Err(ProviderError::NotConfigured) => return Err(GenerateError::NotConfigured),
            Err(ProviderError::Malformed(detail)) => {
                warn!(%detail, "upstream response unusable");
                return Err(GenerateError::NoContent);
            }
            Err(e) => return Err(GenerateError::Upstream(e.to_string())),
        };

        if content.is_empty() {
            return Err(GenerateError::NoContent);
        }

        let code = listing::postprocess(&content);
        debug!(lines = code.lines().count(), chars = code.chars().count(), "listing generated");
        Ok(Listing { code, cached: false })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::providers::dummy::DummyProvider;

    fn generator_with(provider: LlmProvider, shortcircuit: bool) -> Generator {
        Generator::new(provider, shortcircuit::default_rules(), shortcircuit)
    }

    fn dummy(reply: &str) -> LlmProvider {
        LlmProvider::Dummy(DummyProvider::with_reply(reply))
    }

    #[tokio::test]
    async fn shortcircuit_hit_skips_provider() {
        // The scripted reply would be detectable in the output if called.
        let g = generator_with(dummy("10 REM FROM PROVIDER"), true);
        let listing = g.generate("draw a rainbow").await.unwrap();
        assert!(listing.cached);
        assert!(listing.code.contains("poke 53280"));
        assert!(!listing.code.contains("from provider"));
    }

    #[tokio::test]
    async fn shortcircuit_disabled_goes_upstream() {
        let g = generator_with(dummy("10 REM FROM PROVIDER"), false);
        let listing = g.generate("draw a rainbow").await.unwrap();
        assert!(!listing.cached);
        assert_eq!(listing.code, "10 rem from provider");
    }

    #[tokio::test]
    async fn generated_output_is_postprocessed() {
        let g = generator_with(dummy("```basic\n10 PRINT \"HI\"\n20 GOTO 10\n```"), true);
        let listing = g.generate("a bouncing ball").await.unwrap();
        assert!(!listing.cached);
        assert_eq!(listing.code, "10 print \"hi\"\n20 goto 10");
    }

    #[tokio::test]
    async fn unnumbered_reply_gets_wrapper() {
        let g = generator_with(dummy("PRINT \"HI\""), false);
        let listing = g.generate("say hi").await.unwrap();
        assert!(listing.code.starts_with("10 rem generated c64 basic program\n20 "));
    }

    #[tokio::test]
    async fn empty_reply_is_no_content() {
        let g = generator_with(dummy(""), false);
        let err = g.generate("anything").await.unwrap_err();
        assert!(matches!(err, GenerateError::NoContent));
    }

    #[tokio::test]
    async fn sanitize_errors_propagate() {
        let g = generator_with(dummy("10 X"), true);
        assert!(matches!(g.generate("\u{01}\u{02}").await, Err(GenerateError::EmptyPrompt)));
        let long = "x".repeat(501);
        assert!(matches!(g.generate(&long).await, Err(GenerateError::PromptTooLong)));
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let p = crate::llm::providers::anthropic::AnthropicProvider::new(
            "http://127.0.0.1:9/v1/messages".into(),
            "test-model".into(),
            800,
            0.0,
            1,
            None,
        )
        .unwrap();
        let g = generator_with(LlmProvider::Anthropic(p), true);
        let err = g.generate("simulate a lunar lander").await.unwrap_err();
        assert!(matches!(err, GenerateError::NotConfigured));
    }
}
