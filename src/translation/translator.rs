//! Translation of single text fragments.

use anyhow::Result;
use async_trait::async_trait;

use super::prompt::{
    TRANSLATION_MAX_TOKENS, TRANSLATION_TEMPERATURE, build_system_prompt, build_user_prompt,
};
use crate::api::{ChatMessage, CompletionClient, CompletionRequest};

/// Anything that can translate a piece of text.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String>;
}

/// Translates through an OpenAI-compatible chat completion endpoint.
pub struct LlmTranslator {
    client: CompletionClient,
    model: String,
}

impl LlmTranslator {
    pub const fn new(client: CompletionClient, model: String) -> Self {
        Self { client, model }
    }

    fn request(&self, text: &str, target_language: &str) -> CompletionRequest {
        let mut request = CompletionRequest::new(
            self.model.clone(),
            vec![
                ChatMessage::system(build_system_prompt(target_language)),
                ChatMessage::user(build_user_prompt(text, target_language)),
            ],
        );
        request.temperature = Some(TRANSLATION_TEMPERATURE);
        request.max_tokens = Some(TRANSLATION_MAX_TOKENS);
        request
    }
}

#[async_trait]
impl Translator for LlmTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        let reply = self
            .client
            .complete(&self.request(text, target_language))
            .await?;
        Ok(reply.trim().to_string())
    }
}

/// Result of translating one fragment.
#[derive(Debug)]
pub enum FragmentOutcome {
    /// Empty or whitespace-only input; nothing was sent.
    Skipped,
    Translated(String),
    /// The call failed; `text` is the original input.
    PassedThrough { text: String, error: anyhow::Error },
}

impl FragmentOutcome {
    pub fn text(&self) -> &str {
        match self {
            Self::Skipped => "",
            Self::Translated(text) | Self::PassedThrough { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Skipped => String::new(),
            Self::Translated(text) | Self::PassedThrough { text, .. } => text,
        }
    }
}

/// Translates one fragment, never failing.
///
/// Blank input short-circuits to an empty string; a failed call hands the
/// original text back together with the error.
pub async fn translate_fragment(
    translator: &dyn Translator,
    text: &str,
    target_language: &str,
) -> FragmentOutcome {
    if text.trim().is_empty() {
        return FragmentOutcome::Skipped;
    }

    match translator.translate(text, target_language).await {
        Ok(translated) => FragmentOutcome::Translated(translated),
        Err(error) => FragmentOutcome::PassedThrough {
            text: text.to_string(),
            error,
        },
    }
}
