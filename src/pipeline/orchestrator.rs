use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};

use super::event::{
    AudioUpload, NextAction, OutboundMessage, Transport, UserEvent, SUPPORTED_LANGUAGES,
};
use crate::audio::{AudioAsset, FormatConverter, SourceFormat};
use crate::config::Config;
use crate::error::PipelineError;
use crate::recognition::TranscriptionRouter;
use crate::session::SessionStore;
use crate::text::ChunkedTextProcessor;

/// Composes the pipeline into the end-to-end flow and owns the only side
/// effects on external collaborators: outbound messages, session updates,
/// and temporary-artifact cleanup.
pub struct Orchestrator {
    converter: FormatConverter,
    router: TranscriptionRouter,
    processor: ChunkedTextProcessor,
    sessions: SessionStore,
    transport: Arc<dyn Transport>,
    summary_offer_threshold: usize,
}

impl Orchestrator {
    pub fn new(
        config: &Config,
        converter: FormatConverter,
        router: TranscriptionRouter,
        processor: ChunkedTextProcessor,
        sessions: SessionStore,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            converter,
            router,
            processor,
            sessions,
            transport,
            summary_offer_threshold: config.llm.summary_offer_threshold,
        }
    }

    /// Handle one inbound event for one user. Every failure is translated
    /// to a user-facing message here; nothing propagates past this point.
    pub async fn handle_event(&self, user_id: &str, event: UserEvent) {
        match event {
            UserEvent::Start => self.handle_start(user_id).await,
            UserEvent::ChooseLanguage { code } => self.handle_language(user_id, &code).await,
            UserEvent::SubmitAudio { upload } => self.handle_audio(user_id, upload).await,
            UserEvent::TriggerEnhance => self.handle_enhance(user_id).await,
            UserEvent::TriggerSummary => self.handle_summary(user_id).await,
        }
    }

    async fn handle_start(&self, user_id: &str) {
        let languages = SUPPORTED_LANGUAGES
            .iter()
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join(", ");

        self.send(
            user_id,
            OutboundMessage::plain(format!(
                "Hello! Send me a voice message or an audio file (MP3, WAV), and I'll \
                 convert it to text.\nRecognition languages: {}.",
                languages
            )),
        )
        .await;
    }

    async fn handle_language(&self, user_id: &str, code: &str) {
        if !SUPPORTED_LANGUAGES.iter().any(|(c, _)| *c == code) {
            self.send(
                user_id,
                OutboundMessage::plain(format!("Unsupported recognition language: {}", code)),
            )
            .await;
            return;
        }

        let mut session = self.sessions.get(user_id).await;
        session.set_language(code);
        self.sessions.put(user_id, session).await;

        info!("Language for {} set to {}", user_id, code);

        self.send(
            user_id,
            OutboundMessage::plain(format!("Recognition language set: {}", code)),
        )
        .await;
    }

    async fn handle_audio(&self, user_id: &str, upload: AudioUpload) {
        let id = upload
            .message_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        // Both the original file and the canonical artifact are removed on
        // every exit path out of this run, including rejected formats.
        let _cleanup = TempArtifacts::new(vec![
            upload.path.clone(),
            self.converter.canonical_path(&id),
        ]);

        let format = match resolve_format(&upload) {
            Ok(format) => format,
            Err(e) => {
                self.send(user_id, OutboundMessage::plain(e.to_string())).await;
                return;
            }
        };

        let asset = AudioAsset::new(&upload.path, format, id.clone());

        let canonical = match self.converter.convert(&asset) {
            Ok(canonical) => canonical,
            Err(e) => {
                error!("Conversion failed for {}: {}", id, e);
                self.send(user_id, OutboundMessage::plain(user_message(&e))).await;
                return;
            }
        };

        self.send(
            user_id,
            OutboundMessage::plain("Processing audio, please wait..."),
        )
        .await;

        let mut session = self.sessions.get(user_id).await;

        let transcript = match self
            .router
            .transcribe(&canonical, &session.language_code)
            .await
        {
            Ok(transcript) => transcript,
            Err(e) => {
                error!("Recognition failed for {}: {}", id, e);
                self.send(user_id, OutboundMessage::plain(user_message(&e))).await;
                return;
            }
        };

        let empty = transcript.is_empty();
        session.accept_transcript(transcript.text.clone());
        self.sessions.put(user_id, session).await;

        if empty {
            self.send(user_id, OutboundMessage::plain("Couldn't recognize the text"))
                .await;
        } else {
            self.send(
                user_id,
                OutboundMessage::with_action(
                    format!("Recognized text:\n{}", transcript.text),
                    NextAction::Enhance,
                ),
            )
            .await;
        }
    }

    async fn handle_enhance(&self, user_id: &str) {
        let mut session = self.sessions.get(user_id).await;

        // Enhancement applies only to non-empty transcripts; an empty raw
        // transcript is treated the same as no transcript at all
        let raw = match session.raw_for_enhancement() {
            Ok(raw) if !raw.trim().is_empty() => raw.to_string(),
            _ => {
                self.send(user_id, OutboundMessage::plain("No text found for processing"))
                    .await;
                return;
            }
        };

        let enhanced = self.processor.enhance(&raw, &session.language_code).await;

        if session.accept_enhancement(enhanced.clone()).is_err() {
            // Unreachable after raw_for_enhancement succeeded
            self.send(user_id, OutboundMessage::plain("No text found for processing"))
                .await;
            return;
        }
        self.sessions.put(user_id, session).await;

        let text = format!("Processed text:\n{}", enhanced);
        // Threshold counts characters, not bytes, so non-ASCII text is
        // offered a summary at the same length as ASCII text
        let message = if enhanced.chars().count() > self.summary_offer_threshold {
            OutboundMessage::with_action(text, NextAction::Summarize)
        } else {
            OutboundMessage::plain(text)
        };

        self.send(user_id, message).await;
    }

    async fn handle_summary(&self, user_id: &str) {
        let session = self.sessions.get(user_id).await;

        let enhanced = match session.enhanced_for_summary() {
            Ok(enhanced) => enhanced.to_string(),
            Err(_) => {
                self.send(user_id, OutboundMessage::plain("No text found for summary"))
                    .await;
                return;
            }
        };

        // Summarizing reads Enhanced without changing it
        let summary = self
            .processor
            .summarize(&enhanced, &session.language_code)
            .await;

        self.send(
            user_id,
            OutboundMessage::plain(format!("Short summary:\n{}", summary)),
        )
        .await;
    }

    async fn send(&self, user_id: &str, message: OutboundMessage) {
        if let Err(e) = self.transport.send(user_id, message).await {
            warn!("Failed to deliver message to {}: {}", user_id, e);
        }
    }
}

/// Resolve the source format from transport metadata: MIME type first,
/// file extension second. Content is never sniffed.
fn resolve_format(upload: &AudioUpload) -> Result<SourceFormat, PipelineError> {
    if let Some(mime) = &upload.mime_type {
        return SourceFormat::from_mime(mime);
    }

    if let Some(name) = &upload.file_name {
        if let Some(ext) = std::path::Path::new(name).extension() {
            return SourceFormat::from_extension(&ext.to_string_lossy());
        }
        return Err(PipelineError::UnsupportedFormat(name.clone()));
    }

    Err(PipelineError::UnsupportedFormat(
        "no format metadata".to_string(),
    ))
}

/// Plain-language translation of hard pipeline failures
fn user_message(err: &PipelineError) -> String {
    match err {
        PipelineError::UnsupportedFormat(_) | PipelineError::NoTranscriptAvailable => {
            err.to_string()
        }
        other => format!("Error processing audio: {}", other),
    }
}

/// Removes the run's temporary files when dropped, so cleanup happens
/// exactly once on every exit path.
struct TempArtifacts {
    paths: Vec<PathBuf>,
}

impl TempArtifacts {
    fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl Drop for TempArtifacts {
    fn drop(&mut self) {
        for path in &self.paths {
            if path.exists() {
                if let Err(e) = std::fs::remove_file(path) {
                    warn!("Failed to remove temp artifact {}: {}", path.display(), e);
                }
            }
        }
    }
}
