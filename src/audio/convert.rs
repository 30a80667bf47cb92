use std::fs::File;
use std::path::{Path, PathBuf};

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, info};

use super::asset::{AudioAsset, CanonicalAudio, SourceFormat};
use crate::error::PipelineError;

/// Normalizes ingested audio into the canonical recognition encoding:
/// mono, 16 kHz, 16-bit linear PCM, written as one WAV artifact per run.
pub struct FormatConverter {
    temp_dir: PathBuf,
    sample_rate: u32,
}

impl FormatConverter {
    pub fn new(temp_dir: impl AsRef<Path>, sample_rate: u32) -> Self {
        Self {
            temp_dir: temp_dir.as_ref().to_path_buf(),
            sample_rate,
        }
    }

    /// Decode, downmix, resample, and write the canonical artifact.
    ///
    /// The artifact is named `converted_<id>.wav` from the asset's
    /// correlation id. No partial artifact survives a failure.
    pub fn convert(&self, asset: &AudioAsset) -> Result<CanonicalAudio, PipelineError> {
        info!(
            "Converting {} ({:?}) to canonical PCM",
            asset.source_path.display(),
            asset.source_format
        );

        let samples = self.decode_to_mono(asset)?;

        std::fs::create_dir_all(&self.temp_dir)?;
        let canonical_path = self.canonical_path(&asset.id);

        if let Err(e) = write_wav(&canonical_path, &samples, self.sample_rate) {
            // Remove whatever hound managed to write before failing
            let _ = std::fs::remove_file(&canonical_path);
            return Err(e);
        }

        // Duration from the canonical sample count; container metadata across
        // the three input formats is not trustworthy enough to use instead.
        let duration_seconds = samples.len() as f64 / self.sample_rate as f64;

        info!(
            "Canonical audio written: {} ({:.1}s, {} samples)",
            canonical_path.display(),
            duration_seconds,
            samples.len()
        );

        Ok(CanonicalAudio {
            path: canonical_path,
            duration_seconds,
            sample_rate: self.sample_rate,
            channels: 1,
        })
    }

    /// Deterministic artifact path for a correlation id
    pub fn canonical_path(&self, id: &str) -> PathBuf {
        self.temp_dir.join(format!("converted_{}.wav", id))
    }

    fn decode_to_mono(&self, asset: &AudioAsset) -> Result<Vec<i16>, PipelineError> {
        let file = File::open(&asset.source_path)
            .map_err(|e| PipelineError::ConversionFailure(format!("open: {}", e)))?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        // The decoder is selected from the declared format, not sniffed content
        let mut hint = Hint::new();
        hint.with_extension(match asset.source_format {
            SourceFormat::Voice => "ogg",
            SourceFormat::Mp3 => "mp3",
            SourceFormat::Wav => "wav",
        });

        let format_opts = FormatOptions::default();
        let metadata_opts = MetadataOptions::default();
        let decoder_opts = DecoderOptions::default();

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &format_opts, &metadata_opts)
            .map_err(|e| PipelineError::ConversionFailure(format!("probe: {}", e)))?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| PipelineError::ConversionFailure("no audio track found".to_string()))?;

        let track_id = track.id;
        let codec_params = track.codec_params.clone();
        let source_rate = codec_params
            .sample_rate
            .ok_or_else(|| PipelineError::ConversionFailure("unknown sample rate".to_string()))?;
        let channels = codec_params.channels.map(|c| c.count()).unwrap_or(1);

        let mut decoder = symphonia::default::get_codecs()
            .make(&codec_params, &decoder_opts)
            .map_err(|e| PipelineError::ConversionFailure(format!("codec: {}", e)))?;

        let mut mono: Vec<f32> = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(symphonia::core::errors::Error::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => {
                    return Err(PipelineError::ConversionFailure(format!("packet: {}", e)));
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = decoder
                .decode(&packet)
                .map_err(|e| PipelineError::ConversionFailure(format!("decode: {}", e)))?;

            let spec = *decoded.spec();
            let num_frames = decoded.frames();
            if num_frames == 0 {
                continue;
            }

            let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);
            let samples = sample_buf.samples();

            if channels > 1 {
                for frame in samples.chunks(channels) {
                    let sum: f32 = frame.iter().sum();
                    mono.push(sum / channels as f32);
                }
            } else {
                mono.extend_from_slice(samples);
            }
        }

        if mono.is_empty() {
            return Err(PipelineError::ConversionFailure(
                "no audio samples decoded".to_string(),
            ));
        }

        if source_rate != self.sample_rate {
            mono = resample(&mono, source_rate, self.sample_rate);
        }

        debug!(
            samples = mono.len(),
            source_rate, "Decoded and normalized to mono PCM"
        );

        Ok(mono.iter().map(|&s| quantize(s)).collect())
    }
}

/// Linear-interpolation resampling; good enough for speech recognition input
fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let out_len = (samples.len() as f64 / ratio).floor() as usize;
    let mut out = Vec::with_capacity(out_len);

    for i in 0..out_len {
        let pos = i as f64 * ratio;
        let idx = pos as usize;
        let frac = (pos - idx as f64) as f32;
        let a = samples[idx];
        let b = if idx + 1 < samples.len() {
            samples[idx + 1]
        } else {
            a
        };
        out.push(a + (b - a) * frac);
    }

    out
}

fn quantize(sample: f32) -> i16 {
    (sample * i16::MAX as f32).clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

fn write_wav(path: &Path, samples: &[i16], sample_rate: u32) -> Result<(), PipelineError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| PipelineError::ConversionFailure(format!("create wav: {}", e)))?;

    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| PipelineError::ConversionFailure(format!("write sample: {}", e)))?;
    }

    writer
        .finalize()
        .map_err(|e| PipelineError::ConversionFailure(format!("finalize wav: {}", e)))?;

    Ok(())
}
