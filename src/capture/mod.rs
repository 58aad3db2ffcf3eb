//! Voice capture: audio acquisition plus the energy gate in front of
//! speech recognition.
//!
//! An [`AudioSource`] produces an [`AudioClip`] (mono PCM); [`VoiceCapture`]
//! applies the configured energy threshold and hands clips that pass it to a
//! [`SpeechToText`] provider. Clips whose loudest window stays below the
//! threshold are reported as unrecognized without a service call.

mod arecord;
mod wav;

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::error::{MoodbotError, Result};
use crate::providers::SpeechToText;
use crate::telemetry;
use crate::types::ListenOptions;

pub use arecord::ArecordSource;
pub use wav::WavFileSource;

/// Locale tag sent to recognition backends. Recognition is always English;
/// the output-language selector affects translation and synthesis only.
pub const RECOGNITION_LOCALE: &str = "en-US";

/// A captured chunk of mono PCM audio.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl AudioClip {
    /// Wrap raw mono samples at the given rate.
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// The PCM samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Samples per second.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// True when the clip holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Clip length.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }

    /// Raw little-endian PCM bytes, the `audio/l16` wire form.
    pub fn pcm_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.samples.len() * 2);
        for sample in &self.samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        bytes
    }

    /// Loudest RMS energy over 100 ms analysis windows.
    ///
    /// A clip counts as speech when any window reaches the configured
    /// threshold, so leading and trailing silence does not drag the
    /// measurement down.
    pub fn peak_rms(&self) -> f32 {
        let window = (self.sample_rate as usize / 10).max(1);
        self.samples
            .chunks(window)
            .map(rms)
            .fold(0.0_f32, f32::max)
    }
}

fn rms(samples: &[i16]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f64 = samples
        .iter()
        .map(|&s| f64::from(s) * f64::from(s))
        .sum();
    (sum_squares / samples.len() as f64).sqrt() as f32
}

/// Source of captured audio: a microphone, a file, or a test stub.
#[async_trait]
pub trait AudioSource: Send + Sync {
    /// Source name for logging/debugging.
    fn name(&self) -> &str;

    /// Capture up to `timeout` worth of audio.
    async fn capture(&self, timeout: Duration) -> Result<AudioClip>;
}

/// Capture pipeline: audio source → energy gate → speech recognition.
pub struct VoiceCapture {
    source: Arc<dyn AudioSource>,
    recognizer: Arc<dyn SpeechToText>,
    options: ListenOptions,
}

impl VoiceCapture {
    /// Combine a source and recognizer with default listen options.
    pub fn new(source: Arc<dyn AudioSource>, recognizer: Arc<dyn SpeechToText>) -> Self {
        Self {
            source,
            recognizer,
            options: ListenOptions::default(),
        }
    }

    /// Replace the listen options.
    pub fn with_options(mut self, options: ListenOptions) -> Self {
        self.options = options;
        self
    }

    /// Current listen options.
    pub fn options(&self) -> ListenOptions {
        self.options
    }

    /// Update the listen options in place.
    pub fn set_options(&mut self, options: ListenOptions) {
        self.options = options;
    }

    /// Capture one utterance and return its transcript.
    ///
    /// Clips that stay below the energy threshold are rejected as
    /// [`MoodbotError::Unrecognized`] before any recognition call.
    #[instrument(skip(self), fields(operation = "listen"))]
    pub async fn listen(&self) -> Result<String> {
        let clip = self.source.capture(self.options.timeout()).await?;

        let threshold = self.options.energy_threshold() as f32;
        let peak = clip.peak_rms();
        if clip.is_empty() || peak < threshold {
            debug!(peak, threshold, "captured audio below energy threshold");
            return Err(MoodbotError::Unrecognized);
        }
        debug!(
            peak,
            threshold,
            duration_ms = clip.duration().as_millis() as u64,
            "captured audio passed energy gate"
        );

        let started = Instant::now();
        let result = self.recognizer.transcribe(&clip, RECOGNITION_LOCALE).await;
        telemetry::record_service_call("speech", self.recognizer.name(), started, result.is_ok());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(amplitude: i16, samples: usize) -> Vec<i16> {
        // Square-ish wave: alternating +/- amplitude, RMS == amplitude.
        (0..samples)
            .map(|i| if i % 2 == 0 { amplitude } else { -amplitude })
            .collect()
    }

    #[test]
    fn silence_has_zero_energy() {
        let clip = AudioClip::new(vec![0; 16_000], 16_000);
        assert_eq!(clip.peak_rms(), 0.0);
    }

    #[test]
    fn peak_rms_tracks_amplitude() {
        let clip = AudioClip::new(tone(1000, 16_000), 16_000);
        let peak = clip.peak_rms();
        assert!((peak - 1000.0).abs() < 1.0, "peak {peak} should be near 1000");
    }

    #[test]
    fn peak_rms_finds_a_loud_burst_in_a_quiet_clip() {
        // One second of near-silence with a 100 ms loud burst in the middle.
        let mut samples = vec![0_i16; 16_000];
        let burst = tone(2000, 1600);
        samples[8000..8000 + 1600].copy_from_slice(&burst);

        let clip = AudioClip::new(samples, 16_000);
        assert!(clip.peak_rms() > 1500.0);
    }

    #[test]
    fn duration_follows_sample_rate() {
        let clip = AudioClip::new(vec![0; 8_000], 16_000);
        assert_eq!(clip.duration(), Duration::from_millis(500));
    }

    #[test]
    fn pcm_bytes_are_little_endian() {
        let clip = AudioClip::new(vec![0x0102, -1], 16_000);
        assert_eq!(clip.pcm_bytes(), vec![0x02, 0x01, 0xFF, 0xFF]);
    }
}
