//! Microphone audio source backed by the ALSA `arecord` tool.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::capture::wav::read_wav;
use crate::capture::{AudioClip, AudioSource};
use crate::error::{MoodbotError, Result};

/// Sample rate requested from the recorder.
const CAPTURE_SAMPLE_RATE: u32 = 16_000;

/// Extra wall-clock time allowed for the recorder to flush and exit after
/// its own duration limit.
const EXIT_GRACE: Duration = Duration::from_secs(3);

/// Microphone source that records one clip per capture by spawning
/// `arecord` with a duration limit, then reads the scratch WAV back.
pub struct ArecordSource {
    binary: PathBuf,
    device: Option<String>,
    sample_rate: u32,
}

impl ArecordSource {
    /// Locate `arecord` on the PATH.
    pub fn new() -> Result<Self> {
        let binary = which::which("arecord").map_err(|_| {
            MoodbotError::Configuration(
                "arecord not found on PATH (install alsa-utils, or use a WAV source)".to_string(),
            )
        })?;
        Ok(Self {
            binary,
            device: None,
            sample_rate: CAPTURE_SAMPLE_RATE,
        })
    }

    /// Record from a specific ALSA device instead of the default.
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(device.into());
        self
    }

    /// Request a sample rate other than the default 16 kHz.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }
}

#[async_trait]
impl AudioSource for ArecordSource {
    fn name(&self) -> &str {
        "arecord"
    }

    async fn capture(&self, timeout: Duration) -> Result<AudioClip> {
        let scratch = tempfile::Builder::new()
            .prefix("moodbot-capture-")
            .suffix(".wav")
            .tempfile()?;

        let secs = timeout.as_secs().max(1);
        let mut cmd = Command::new(&self.binary);
        cmd.arg("-q")
            .arg("-f")
            .arg("S16_LE")
            .arg("-r")
            .arg(self.sample_rate.to_string())
            .arg("-c")
            .arg("1")
            .arg("-d")
            .arg(secs.to_string());
        if let Some(device) = &self.device {
            cmd.arg("-D").arg(device);
        }
        cmd.arg(scratch.path());

        debug!(
            binary = %self.binary.display(),
            secs,
            "recording from microphone"
        );

        let output = tokio::time::timeout(timeout + EXIT_GRACE, cmd.output())
            .await
            .map_err(|_| {
                MoodbotError::Unexpected("arecord did not finish within the capture window".to_string())
            })?
            .map_err(|e| MoodbotError::Unexpected(format!("failed to run arecord: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MoodbotError::Unexpected(format!(
                "arecord exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let path = scratch.path().to_path_buf();
        let clip = tokio::task::spawn_blocking(move || read_wav(&path))
            .await
            .map_err(|e| MoodbotError::Unexpected(format!("wav decode task failed: {e}")))??;
        drop(scratch);
        Ok(clip)
    }
}
