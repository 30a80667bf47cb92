//! Audio ingestion and format normalization
//!
//! Every supported input (voice notes, MP3, WAV) is decoded and normalized
//! to one canonical encoding before recognition: mono, 16 kHz, 16-bit
//! linear PCM. Duration is always computed from the canonical sample count.

mod asset;
mod convert;

pub use asset::{AudioAsset, CanonicalAudio, SourceFormat};
pub use convert::FormatConverter;
