//! Error types for the transcription pipeline

use thiserror::Error;

/// Hard failures surfaced by the pipeline.
///
/// Soft degradations (a chunk the LLM could not enhance, a failed summary)
/// are recovered with fallback values inside `text::ChunkedTextProcessor`
/// and never appear here.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input format is not one of the supported audio formats
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Audio decoding or normalization failed
    #[error("Failed to convert audio: {0}")]
    ConversionFailure(String),

    /// The recognition backend returned an error
    #[error("Speech recognition failed: {0}")]
    RecognitionFailure(String),

    /// Long-running recognition did not complete within the bounded wait
    #[error("Speech recognition timed out after {0} seconds")]
    RecognitionTimeout(u64),

    /// A follow-up action was triggered with no transcript in the session
    #[error("No transcript available for this action")]
    NoTranscriptAvailable,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
