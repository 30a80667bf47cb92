//! Speech recognition routing
//!
//! Short audio (at most the configured sync limit, 60 s by default) is
//! recognized inline with embedded content. Longer audio is staged in blob
//! storage and recognized through the backend's long-running path with a
//! bounded wait, after which the staged blob is deleted best-effort.

mod backend;
mod router;

pub use backend::{
    AudioEncoding, BackendError, BlobStore, BlobStoreError, RecognitionConfig, SpeechBackend,
    SpeechSegment,
};
pub use router::{Transcript, TranscriptionRouter};
