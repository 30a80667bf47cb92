//! LLM post-processing of transcripts
//!
//! Long transcripts are split into bounded word-count chunks so each LLM
//! call stays within input limits. Failures here are soft by design: the
//! user always gets some text back.

mod chunk;
mod processor;

pub use chunk::split_words;
pub use processor::{ChunkedTextProcessor, LlmClient, LlmError, SUMMARY_FALLBACK};
