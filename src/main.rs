use anyhow::Result;
use voxscribe::{AudioAsset, Config, FormatConverter, SourceFormat};
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = Config::load("config/voxscribe")?;

    info!("voxscribe v0.1.0");
    info!("Loaded config: {}", cfg.service.name);
    info!("Default recognition language: {}", cfg.service.default_language);
    info!(
        "Routing: sync up to {:.0}s, long-running timeout {}s",
        cfg.recognition.sync_limit_secs, cfg.recognition.long_running_timeout_secs
    );

    // Run a fixture through the converter if one is present
    let fixture_path = "tests/fixtures/sample-note.wav";
    if std::path::Path::new(fixture_path).exists() {
        let converter = FormatConverter::new(&cfg.audio.temp_path, cfg.audio.sample_rate);
        let asset = AudioAsset::new(fixture_path, SourceFormat::Wav, "fixture".to_string());
        let canonical = converter.convert(&asset)?;

        info!("Successfully converted fixture audio!");
        info!("Duration: {:.1} seconds", canonical.duration_seconds);
        info!("Canonical artifact: {}", canonical.path.display());

        std::fs::remove_file(&canonical.path)?;
    } else {
        info!("No test fixture found at {}", fixture_path);
        info!("To test conversion, place a .wav file at: {}", fixture_path);
    }

    Ok(())
}
