use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Which transcript, if any, the session currently holds.
///
/// "No transcript yet" is a first-class state, not an absent value, so the
/// validity of follow-up actions is decided by matching, never by
/// presence checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranscriptState {
    /// No transcript held; initial state
    Idle,
    /// A raw transcript exists and has not been enhanced yet
    RawAvailable { raw: String },
    /// Enhanced text derived from the held raw transcript of the same run
    Enhanced { raw: String, enhanced: String },
}

/// Per-user session: language preference plus the transcript state machine.
///
/// Lives for the process lifetime; there is no terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub language_code: String,
    pub transcript: TranscriptState,
}

impl SessionState {
    pub fn new(default_language: &str) -> Self {
        Self {
            language_code: default_language.to_string(),
            transcript: TranscriptState::Idle,
        }
    }

    /// Orthogonal to the transcript state machine: changing language never
    /// touches held transcripts.
    pub fn set_language(&mut self, language_code: &str) {
        self.language_code = language_code.to_string();
    }

    /// A new successful transcription always moves to RawAvailable, even
    /// when the text is empty, and drops any enhanced text from a previous
    /// run so a later summary can never describe orphaned audio.
    pub fn accept_transcript(&mut self, raw: String) {
        self.transcript = TranscriptState::RawAvailable { raw };
    }

    /// Record the enhancement output for the currently held raw transcript.
    pub fn accept_enhancement(&mut self, enhanced: String) -> Result<(), PipelineError> {
        match std::mem::replace(&mut self.transcript, TranscriptState::Idle) {
            TranscriptState::RawAvailable { raw } | TranscriptState::Enhanced { raw, .. } => {
                self.transcript = TranscriptState::Enhanced { raw, enhanced };
                Ok(())
            }
            TranscriptState::Idle => Err(PipelineError::NoTranscriptAvailable),
        }
    }

    /// Raw transcript to enhance, if the state allows it.
    pub fn raw_for_enhancement(&self) -> Result<&str, PipelineError> {
        match &self.transcript {
            TranscriptState::RawAvailable { raw } | TranscriptState::Enhanced { raw, .. } => {
                Ok(raw)
            }
            TranscriptState::Idle => Err(PipelineError::NoTranscriptAvailable),
        }
    }

    /// Enhanced transcript to summarize, if the state allows it.
    ///
    /// Summarization is re-entrant: it reads Enhanced without changing it.
    pub fn enhanced_for_summary(&self) -> Result<&str, PipelineError> {
        match &self.transcript {
            TranscriptState::Enhanced { enhanced, .. } => Ok(enhanced),
            _ => Err(PipelineError::NoTranscriptAvailable),
        }
    }
}
