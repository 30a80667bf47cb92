use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Languages offered by the recognition language menu
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("uk-UA", "Ukrainian"),
    ("en-US", "English"),
    ("de-DE", "German"),
    ("fr-FR", "French"),
    ("es-ES", "Spanish"),
    ("ja-JP", "Japanese"),
    ("it-IT", "Italian"),
    ("pl-PL", "Polish"),
];

/// An audio unit handed over by the transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioUpload {
    /// Where the transport downloaded the original bytes
    pub path: PathBuf,
    /// MIME type, if the transport supplies one
    pub mime_type: Option<String>,
    /// Original file name, used for extension-based format resolution
    pub file_name: Option<String>,
    /// Correlation id of the originating message
    pub message_id: Option<String>,
}

/// User-triggered action delivered by the transport
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserEvent {
    Start,
    ChooseLanguage { code: String },
    SubmitAudio { upload: AudioUpload },
    TriggerEnhance,
    TriggerSummary,
}

/// Follow-up affordance attached to an outbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    Enhance,
    Summarize,
}

/// Text pushed back to the user, with an optional next-action affordance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub text: String,
    pub next_action: Option<NextAction>,
}

impl OutboundMessage {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next_action: None,
        }
    }

    pub fn with_action(text: impl Into<String>, action: NextAction) -> Self {
        Self {
            text: text.into(),
            next_action: Some(action),
        }
    }
}

/// Outbound side of the chat transport
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, user_id: &str, message: OutboundMessage) -> Result<(), TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
}
