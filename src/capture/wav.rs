//! WAV file audio source.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use hound::SampleFormat;

use crate::capture::{AudioClip, AudioSource};
use crate::error::{MoodbotError, Result};

/// Audio source backed by a WAV file: the "upload a clip" path, and the
/// usual seam for exercising the capture pipeline in tests.
pub struct WavFileSource {
    path: PathBuf,
}

impl WavFileSource {
    /// Use the WAV file at `path` as the capture source.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AudioSource for WavFileSource {
    fn name(&self) -> &str {
        "wav-file"
    }

    async fn capture(&self, _timeout: Duration) -> Result<AudioClip> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_wav(&path))
            .await
            .map_err(|e| MoodbotError::Unexpected(format!("wav decode task failed: {e}")))?
    }
}

/// Decode a WAV file into a mono clip.
///
/// Accepts 16-bit integer and 32-bit float samples; multi-channel audio is
/// downmixed by averaging each frame.
pub(crate) fn read_wav(path: &Path) -> Result<AudioClip> {
    let reader = hound::WavReader::open(path)
        .map_err(|e| MoodbotError::Unexpected(format!("cannot open wav {}: {e}", path.display())))?;
    let spec = reader.spec();

    let samples: Vec<i16> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 16) => reader
            .into_samples::<i16>()
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| MoodbotError::Unexpected(format!("bad wav data: {e}")))?,
        (SampleFormat::Float, 32) => reader
            .into_samples::<f32>()
            .map(|s| s.map(|v| (v.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16))
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| MoodbotError::Unexpected(format!("bad wav data: {e}")))?,
        (format, bits) => {
            return Err(MoodbotError::Unexpected(format!(
                "unsupported wav format: {bits}-bit {format:?}"
            )));
        }
    };

    Ok(AudioClip::new(
        downmix(samples, spec.channels),
        spec.sample_rate,
    ))
}

fn downmix(samples: Vec<i16>, channels: u16) -> Vec<i16> {
    if channels <= 1 {
        return samples;
    }
    let channels = channels as usize;
    samples
        .chunks_exact(channels)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| i32::from(s)).sum();
            (sum / channels as i32) as i16
        })
        .collect()
}
