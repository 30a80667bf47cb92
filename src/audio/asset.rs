use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// Source encoding of an ingested audio unit
///
/// Determined by transport metadata (MIME type or file extension), never by
/// content sniffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Compressed voice-note encoding (OGG container)
    Voice,
    Mp3,
    Wav,
}

impl SourceFormat {
    /// Resolve a format from a transport MIME type
    pub fn from_mime(mime: &str) -> Result<Self, PipelineError> {
        match mime {
            "audio/ogg" | "audio/opus" => Ok(Self::Voice),
            "audio/mpeg" | "audio/mp3" => Ok(Self::Mp3),
            "audio/wav" | "audio/x-wav" | "audio/wave" => Ok(Self::Wav),
            other => Err(PipelineError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Resolve a format from a file extension (with or without leading dot)
    pub fn from_extension(ext: &str) -> Result<Self, PipelineError> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "ogg" | "oga" | "opus" => Ok(Self::Voice),
            "mp3" => Ok(Self::Mp3),
            "wav" | "wave" => Ok(Self::Wav),
            other => Err(PipelineError::UnsupportedFormat(format!(".{}", other))),
        }
    }
}

/// An ingested audio unit, alive for exactly one pipeline run
///
/// Both the original file and the canonical artifact derived from it are
/// deleted once transcription completes or fails.
#[derive(Debug, Clone)]
pub struct AudioAsset {
    /// Path to the original bytes as delivered by the transport
    pub source_path: PathBuf,
    pub source_format: SourceFormat,
    /// Correlation id, used to name temporary artifacts
    pub id: String,
}

impl AudioAsset {
    pub fn new(source_path: impl AsRef<Path>, source_format: SourceFormat, id: String) -> Self {
        Self {
            source_path: source_path.as_ref().to_path_buf(),
            source_format,
            id,
        }
    }
}

/// Normalized audio ready for recognition: mono, 16 kHz, 16-bit linear PCM
#[derive(Debug, Clone)]
pub struct CanonicalAudio {
    pub path: PathBuf,
    /// Computed from the canonical sample count, never from source metadata
    pub duration_seconds: f64,
    pub sample_rate: u32,
    pub channels: u16,
}
