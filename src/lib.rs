pub mod audio;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod recognition;
pub mod session;
pub mod text;

pub use audio::{AudioAsset, CanonicalAudio, FormatConverter, SourceFormat};
pub use config::Config;
pub use error::PipelineError;
pub use pipeline::{
    AudioUpload, NextAction, Orchestrator, OutboundMessage, Transport, UserEvent,
};
pub use recognition::{
    BlobStore, RecognitionConfig, SpeechBackend, SpeechSegment, Transcript, TranscriptionRouter,
};
pub use session::{SessionState, SessionStore, TranscriptState};
pub use text::{ChunkedTextProcessor, LlmClient};
