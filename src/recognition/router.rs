use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::backend::{BlobStore, RecognitionConfig, SpeechBackend, SpeechSegment};
use crate::audio::CanonicalAudio;
use crate::error::PipelineError;

/// Output of one recognition pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// May be empty: recognition with no results is success, not failure
    pub text: String,
    pub language_code: String,
    pub received_at: DateTime<Utc>,
}

impl Transcript {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Chooses the synchronous or long-running recognition strategy by audio
/// duration and assembles the returned segments into one transcript.
pub struct TranscriptionRouter {
    backend: Arc<dyn SpeechBackend>,
    blob_store: Arc<dyn BlobStore>,
    /// Durations at or below this are recognized inline (seconds)
    sync_limit_secs: f64,
    /// Bounded wait for the long-running path
    long_running_timeout: Duration,
}

impl TranscriptionRouter {
    pub fn new(
        backend: Arc<dyn SpeechBackend>,
        blob_store: Arc<dyn BlobStore>,
        sync_limit_secs: f64,
        long_running_timeout: Duration,
    ) -> Self {
        Self {
            backend,
            blob_store,
            sync_limit_secs,
            long_running_timeout,
        }
    }

    pub async fn transcribe(
        &self,
        audio: &CanonicalAudio,
        language_code: &str,
    ) -> Result<Transcript, PipelineError> {
        let config = RecognitionConfig::for_language(language_code, audio.sample_rate);

        let segments = if audio.duration_seconds > self.sync_limit_secs {
            self.transcribe_long_running(audio, &config).await?
        } else {
            self.transcribe_inline(audio, &config).await?
        };

        let text = assemble(&segments);

        info!(
            "Recognition complete: {} segments, {} chars ({})",
            segments.len(),
            text.len(),
            language_code
        );

        Ok(Transcript {
            text,
            language_code: language_code.to_string(),
            received_at: Utc::now(),
        })
    }

    async fn transcribe_inline(
        &self,
        audio: &CanonicalAudio,
        config: &RecognitionConfig,
    ) -> Result<Vec<SpeechSegment>, PipelineError> {
        info!(
            "Synchronous recognition ({:.1}s <= {:.0}s)",
            audio.duration_seconds, self.sync_limit_secs
        );

        let content = tokio::fs::read(&audio.path).await?;

        self.backend
            .recognize(&content, config)
            .await
            .map_err(|e| PipelineError::RecognitionFailure(e.to_string()))
    }

    async fn transcribe_long_running(
        &self,
        audio: &CanonicalAudio,
        config: &RecognitionConfig,
    ) -> Result<Vec<SpeechSegment>, PipelineError> {
        info!(
            "Long-running recognition ({:.1}s > {:.0}s), staging blob",
            audio.duration_seconds, self.sync_limit_secs
        );

        let bytes = tokio::fs::read(&audio.path).await?;

        let file_name = audio
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.wav".to_string());
        let blob_name = format!("audio-{}", file_name);

        let blob_ref = self
            .blob_store
            .put(&bytes, &blob_name)
            .await
            .map_err(|e| PipelineError::RecognitionFailure(e.to_string()))?;

        // Bounded wait; the staged blob is deleted whatever the outcome
        let result = tokio::time::timeout(
            self.long_running_timeout,
            self.backend.recognize_long_running(&blob_ref, config),
        )
        .await;

        if let Err(e) = self.blob_store.delete(&blob_ref).await {
            warn!("Failed to delete staged blob {}: {}", blob_ref, e);
        }

        match result {
            Ok(Ok(segments)) => Ok(segments),
            Ok(Err(e)) => Err(PipelineError::RecognitionFailure(e.to_string())),
            Err(_) => Err(PipelineError::RecognitionTimeout(
                self.long_running_timeout.as_secs(),
            )),
        }
    }
}

/// Concatenate top alternatives in returned order, single-space separated
fn assemble(segments: &[SpeechSegment]) -> String {
    segments
        .iter()
        .map(|s| s.transcript.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
