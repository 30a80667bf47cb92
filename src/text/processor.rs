use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::chunk::split_words;
use crate::config::LlmConfig;

const ENHANCE_SYSTEM_PROMPT: &str = "You are an assistant that adds and corrects punctuation \
     in text to make it grammatically correct and natural in the user's language.";

const SUMMARY_SYSTEM_PROMPT: &str = "You are an assistant that creates a short summary of text, \
     preserving the main ideas, in the user's language.";

/// Returned when summarization fails; never an error
pub const SUMMARY_FALLBACK: &str = "Failed to create summary";

/// Text completion capability
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Drives LLM post-processing over transcripts: per-chunk punctuation
/// restoration and whole-text summarization.
///
/// Both operations only degrade, never fail: an unenhanced chunk passes
/// through verbatim and a failed summary becomes a fixed fallback message.
pub struct ChunkedTextProcessor {
    llm: Arc<dyn LlmClient>,
    config: LlmConfig,
}

impl ChunkedTextProcessor {
    pub fn new(llm: Arc<dyn LlmClient>, config: LlmConfig) -> Self {
        Self { llm, config }
    }

    /// Restore punctuation and sentence structure chunk by chunk.
    ///
    /// Chunks are processed sequentially in original order so partial
    /// failures interleave deterministically with enhanced neighbors.
    pub async fn enhance(&self, text: &str, language_code: &str) -> String {
        let chunks = split_words(text, self.config.chunk_words);
        let mut enhanced = Vec::with_capacity(chunks.len());

        info!("Enhancing transcript: {} chunk(s)", chunks.len());

        for (i, chunk) in chunks.iter().enumerate() {
            let user_prompt = format!(
                "Add punctuation to this text and structure sentences grammatically \
                 correctly ({}):\n{}",
                language_code, chunk
            );

            match self
                .llm
                .complete(
                    ENHANCE_SYSTEM_PROMPT,
                    &user_prompt,
                    self.config.temperature,
                    self.config.enhance_max_tokens,
                )
                .await
            {
                Ok(output) => enhanced.push(output.trim().to_string()),
                Err(e) => {
                    // Degrade per chunk: the original text goes through unchanged
                    warn!("Enhancement failed for chunk {}, passing through: {}", i, e);
                    enhanced.push(chunk.clone());
                }
            }
        }

        enhanced.join(" ")
    }

    /// Produce a bounded-length summary in the transcript's language.
    pub async fn summarize(&self, text: &str, language_code: &str) -> String {
        let user_prompt = format!(
            "Create a short summary (up to 100 words) of this text, keeping the \
             language ({}):\n{}",
            language_code, text
        );

        match self
            .llm
            .complete(
                SUMMARY_SYSTEM_PROMPT,
                &user_prompt,
                self.config.temperature,
                self.config.summary_max_tokens,
            )
            .await
        {
            Ok(summary) => summary.trim().to_string(),
            Err(e) => {
                warn!("Summarization failed, using fallback message: {}", e);
                SUMMARY_FALLBACK.to_string()
            }
        }
    }
}
