// Integration tests for transcription routing
//
// The routing decision (sync vs long-running by duration) is verified
// against mock recognition and blob-store capabilities; the backends
// themselves are out of scope.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tempfile::TempDir;
use voxscribe::recognition::{
    BackendError, BlobStore, BlobStoreError, RecognitionConfig, SpeechBackend, SpeechSegment,
};
use voxscribe::{CanonicalAudio, PipelineError, TranscriptionRouter};

struct MockBackend {
    segments: Vec<String>,
    fail: bool,
    long_running_delay: Duration,
    sync_calls: AtomicUsize,
    long_calls: AtomicUsize,
}

impl MockBackend {
    fn returning(segments: &[&str]) -> Self {
        Self {
            segments: segments.iter().map(|s| s.to_string()).collect(),
            fail: false,
            long_running_delay: Duration::ZERO,
            sync_calls: AtomicUsize::new(0),
            long_calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::returning(&[])
        }
    }

    fn segments(&self) -> Vec<SpeechSegment> {
        self.segments
            .iter()
            .map(|s| SpeechSegment {
                transcript: s.clone(),
                confidence: Some(0.9),
            })
            .collect()
    }
}

#[async_trait]
impl SpeechBackend for MockBackend {
    async fn recognize(
        &self,
        _content: &[u8],
        _config: &RecognitionConfig,
    ) -> Result<Vec<SpeechSegment>, BackendError> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(BackendError::ApiRequestFailed("boom".to_string()));
        }
        Ok(self.segments())
    }

    async fn recognize_long_running(
        &self,
        _blob_ref: &str,
        _config: &RecognitionConfig,
    ) -> Result<Vec<SpeechSegment>, BackendError> {
        self.long_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.long_running_delay).await;
        if self.fail {
            return Err(BackendError::ApiRequestFailed("boom".to_string()));
        }
        Ok(self.segments())
    }
}

#[derive(Default)]
struct MockBlobStore {
    puts: AtomicUsize,
    deletes: AtomicUsize,
}

#[async_trait]
impl BlobStore for MockBlobStore {
    async fn put(&self, _bytes: &[u8], name: &str) -> Result<String, BlobStoreError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        Ok(format!("blob://{}", name))
    }

    async fn delete(&self, _blob_ref: &str) -> Result<(), BlobStoreError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn canonical_fixture(dir: &Path, duration_seconds: f64) -> Result<CanonicalAudio> {
    let path = dir.join("converted_test.wav");
    std::fs::write(&path, b"pcm-bytes")?;
    Ok(CanonicalAudio {
        path,
        duration_seconds,
        sample_rate: 16000,
        channels: 1,
    })
}

fn router(
    backend: Arc<MockBackend>,
    blobs: Arc<MockBlobStore>,
    timeout: Duration,
) -> TranscriptionRouter {
    TranscriptionRouter::new(backend, blobs, 60.0, timeout)
}

#[tokio::test]
async fn short_audio_routes_through_sync_path() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let backend = Arc::new(MockBackend::returning(&["hello", "world"]));
    let blobs = Arc::new(MockBlobStore::default());
    let router = router(backend.clone(), blobs.clone(), Duration::from_secs(300));

    let audio = canonical_fixture(temp_dir.path(), 45.0)?;
    let transcript = router.transcribe(&audio, "en-US").await?;

    assert_eq!(transcript.text, "hello world");
    assert_eq!(transcript.language_code, "en-US");
    assert_eq!(backend.sync_calls.load(Ordering::SeqCst), 1);
    assert_eq!(backend.long_calls.load(Ordering::SeqCst), 0);
    assert_eq!(blobs.puts.load(Ordering::SeqCst), 0, "No blob for short audio");

    Ok(())
}

#[tokio::test]
async fn exactly_sixty_seconds_is_still_sync() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let backend = Arc::new(MockBackend::returning(&["ok"]));
    let blobs = Arc::new(MockBlobStore::default());
    let router = router(backend.clone(), blobs.clone(), Duration::from_secs(300));

    let audio = canonical_fixture(temp_dir.path(), 60.0)?;
    router.transcribe(&audio, "en-US").await?;

    assert_eq!(backend.sync_calls.load(Ordering::SeqCst), 1);
    assert_eq!(backend.long_calls.load(Ordering::SeqCst), 0);

    Ok(())
}

#[tokio::test]
async fn long_audio_stages_blob_and_deletes_it() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let backend = Arc::new(MockBackend::returning(&["long", "form", "speech"]));
    let blobs = Arc::new(MockBlobStore::default());
    let router = router(backend.clone(), blobs.clone(), Duration::from_secs(300));

    let audio = canonical_fixture(temp_dir.path(), 90.0)?;
    let transcript = router.transcribe(&audio, "uk-UA").await?;

    assert_eq!(transcript.text, "long form speech");
    assert_eq!(backend.long_calls.load(Ordering::SeqCst), 1);
    assert_eq!(backend.sync_calls.load(Ordering::SeqCst), 0);
    assert_eq!(blobs.puts.load(Ordering::SeqCst), 1);
    assert_eq!(blobs.deletes.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn blob_deleted_even_when_recognition_fails() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let backend = Arc::new(MockBackend {
        long_running_delay: Duration::ZERO,
        ..MockBackend::failing()
    });
    let blobs = Arc::new(MockBlobStore::default());
    let router = router(backend, blobs.clone(), Duration::from_secs(300));

    let audio = canonical_fixture(temp_dir.path(), 120.0)?;
    let result = router.transcribe(&audio, "uk-UA").await;

    assert!(matches!(result, Err(PipelineError::RecognitionFailure(_))));
    assert_eq!(blobs.puts.load(Ordering::SeqCst), 1);
    assert_eq!(blobs.deletes.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn long_running_timeout_surfaces_and_blob_is_deleted() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let backend = Arc::new(MockBackend {
        long_running_delay: Duration::from_secs(10),
        ..MockBackend::returning(&["late"])
    });
    let blobs = Arc::new(MockBlobStore::default());
    let router = router(backend, blobs.clone(), Duration::from_millis(50));

    let audio = canonical_fixture(temp_dir.path(), 90.0)?;
    let result = router.transcribe(&audio, "uk-UA").await;

    assert!(matches!(result, Err(PipelineError::RecognitionTimeout(_))));
    assert_eq!(blobs.deletes.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn empty_recognition_is_success_with_empty_text() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let backend = Arc::new(MockBackend::returning(&[]));
    let blobs = Arc::new(MockBlobStore::default());
    let router = router(backend, blobs, Duration::from_secs(300));

    let audio = canonical_fixture(temp_dir.path(), 10.0)?;
    let transcript = router.transcribe(&audio, "en-US").await?;

    assert!(transcript.is_empty());

    Ok(())
}

#[tokio::test]
async fn sync_backend_failure_surfaces_as_recognition_failure() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let backend = Arc::new(MockBackend::failing());
    let blobs = Arc::new(MockBlobStore::default());
    let router = router(backend, blobs, Duration::from_secs(300));

    let audio = canonical_fixture(temp_dir.path(), 5.0)?;
    let result = router.transcribe(&audio, "en-US").await;

    assert!(matches!(result, Err(PipelineError::RecognitionFailure(_))));

    Ok(())
}
