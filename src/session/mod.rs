//! Per-user session state
//!
//! Each user's session holds their recognition language and the transcript
//! state machine that decides which follow-up action is currently valid:
//! Idle → RawAvailable (any successful transcription) → Enhanced.

mod state;
mod store;

pub use state::{SessionState, TranscriptState};
pub use store::SessionStore;
