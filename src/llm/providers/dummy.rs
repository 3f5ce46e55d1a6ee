//! Dummy LLM provider — returns a scripted listing without network access.
//! Used for testing the full request pipeline without a real API key.

use crate::llm::ProviderError;

/// Default scripted reply — fenced, mixed case, so the post-processing
/// pipeline gets exercised the same way a real model reply would.
const DEFAULT_REPLY: &str = "```basic\n10 PRINT \"HELLO FROM THE DUMMY PROVIDER\"\n20 GOTO 10\n```";

#[derive(Debug, Clone)]
pub struct DummyProvider {
    reply: String,
}

impl Default for DummyProvider {
    fn default() -> Self {
        Self { reply: DEFAULT_REPLY.to_string() }
    }
}

impl DummyProvider {
    /// Provider that always answers with `reply`.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self { reply: reply.into() }
    }

    pub async fn complete(&self, _content: &str, _system: Option<&str>) -> Result<String, ProviderError> {
        Ok(self.reply.clone())
    }
}
