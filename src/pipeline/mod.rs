//! End-to-end orchestration
//!
//! The orchestrator drives ingest → convert → transcribe → state update,
//! plus the on-demand enhance and summarize follow-ups. It is the only
//! component with side effects on external collaborators and it owns
//! per-run temporary-artifact cleanup.

mod event;
mod orchestrator;

pub use event::{
    AudioUpload, NextAction, OutboundMessage, Transport, TransportError, UserEvent,
    SUPPORTED_LANGUAGES,
};
pub use orchestrator::Orchestrator;
