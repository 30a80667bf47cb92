use async_trait::async_trait;

/// Fixed recognition configuration sent with every request
#[derive(Debug, Clone)]
pub struct RecognitionConfig {
    /// PCM encoding identifier understood by the backend
    pub encoding: AudioEncoding,
    pub sample_rate_hertz: u32,
    pub language_code: String,
    pub enable_automatic_punctuation: bool,
    /// Word-level timing is requested but not surfaced by this pipeline
    pub enable_word_time_offsets: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEncoding {
    Linear16,
}

impl RecognitionConfig {
    pub fn for_language(language_code: &str, sample_rate_hertz: u32) -> Self {
        Self {
            encoding: AudioEncoding::Linear16,
            sample_rate_hertz,
            language_code: language_code.to_string(),
            enable_automatic_punctuation: true,
            enable_word_time_offsets: true,
        }
    }
}

/// One recognized span of audio, as returned by the backend
#[derive(Debug, Clone)]
pub struct SpeechSegment {
    /// Top alternative for this span
    pub transcript: String,
    pub confidence: Option<f32>,
}

/// Speech recognition capability
///
/// `recognize` takes the audio content inline; `recognize_long_running`
/// takes a reference to a previously staged blob and may take minutes.
/// Neither call retries internally.
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    async fn recognize(
        &self,
        content: &[u8],
        config: &RecognitionConfig,
    ) -> Result<Vec<SpeechSegment>, BackendError>;

    async fn recognize_long_running(
        &self,
        blob_ref: &str,
        config: &RecognitionConfig,
    ) -> Result<Vec<SpeechSegment>, BackendError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Blob storage for staging long audio ahead of asynchronous recognition
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under `name` and return a backend-resolvable reference
    async fn put(&self, bytes: &[u8], name: &str) -> Result<String, BlobStoreError>;

    async fn delete(&self, blob_ref: &str) -> Result<(), BlobStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BlobStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
}
