use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub audio: AudioConfig,
    pub recognition: RecognitionRoutingConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    /// Default recognition language until the user chooses otherwise
    pub default_language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    /// Directory for per-run temporary artifacts
    pub temp_path: String,
    /// Canonical sample rate; the channel layout is always mono
    pub sample_rate: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecognitionRoutingConfig {
    /// Durations at or below this go through the synchronous path (seconds)
    pub sync_limit_secs: f64,
    /// Bounded wait for long-running recognition (seconds)
    pub long_running_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Maximum words per enhancement chunk
    pub chunk_words: usize,
    pub temperature: f32,
    pub enhance_max_tokens: u32,
    pub summary_max_tokens: u32,
    /// Enhanced text longer than this gets a summary affordance (characters)
    pub summary_offer_threshold: usize,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: "voxscribe".to_string(),
                default_language: "uk-UA".to_string(),
            },
            audio: AudioConfig {
                temp_path: std::env::temp_dir().display().to_string(),
                sample_rate: 16000,
            },
            recognition: RecognitionRoutingConfig {
                sync_limit_secs: 60.0,
                long_running_timeout_secs: 300,
            },
            llm: LlmConfig {
                chunk_words: 1000,
                temperature: 0.2,
                enhance_max_tokens: 4000,
                summary_max_tokens: 200,
                summary_offer_threshold: 500,
            },
        }
    }
}
