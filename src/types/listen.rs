//! Voice capture options.

use std::time::Duration;

/// Shortest allowed capture window.
pub const MIN_TIMEOUT_SECS: u64 = 5;

/// Longest allowed capture window.
pub const MAX_TIMEOUT_SECS: u64 = 15;

/// Highest selectable noise sensitivity step.
pub const MAX_NOISE_SENSITIVITY: u32 = 3;

/// Energy threshold at sensitivity 0.
pub const BASE_ENERGY_THRESHOLD: u32 = 300;

/// Threshold increase per sensitivity step.
pub const ENERGY_PER_STEP: u32 = 100;

/// Options for one microphone capture: how long to listen and how loud the
/// audio must be before it counts as speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenOptions {
    timeout_secs: u64,
    noise_sensitivity: u32,
}

impl Default for ListenOptions {
    fn default() -> Self {
        Self {
            timeout_secs: MIN_TIMEOUT_SECS,
            noise_sensitivity: 1,
        }
    }
}

impl ListenOptions {
    /// Default options: 5 second timeout, sensitivity 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capture timeout, clamped to 5–15 seconds.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS);
        self
    }

    /// Set the noise sensitivity step, clamped to 0–3.
    pub fn with_noise_sensitivity(mut self, sensitivity: u32) -> Self {
        self.noise_sensitivity = sensitivity.min(MAX_NOISE_SENSITIVITY);
        self
    }

    /// Capture timeout in seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Capture timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Configured noise sensitivity step.
    pub fn noise_sensitivity(&self) -> u32 {
        self.noise_sensitivity
    }

    /// Minimum RMS energy for captured audio to count as speech:
    /// base 300 plus 100 per sensitivity step.
    pub fn energy_threshold(&self) -> u32 {
        BASE_ENERGY_THRESHOLD + self.noise_sensitivity * ENERGY_PER_STEP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_ui_defaults() {
        let opts = ListenOptions::new();
        assert_eq!(opts.timeout_secs(), 5);
        assert_eq!(opts.noise_sensitivity(), 1);
        assert_eq!(opts.energy_threshold(), 400);
    }

    #[test]
    fn timeout_is_clamped_to_slider_range() {
        assert_eq!(ListenOptions::new().with_timeout_secs(2).timeout_secs(), 5);
        assert_eq!(ListenOptions::new().with_timeout_secs(60).timeout_secs(), 15);
        assert_eq!(ListenOptions::new().with_timeout_secs(10).timeout_secs(), 10);
    }

    #[test]
    fn sensitivity_is_clamped_to_slider_range() {
        assert_eq!(
            ListenOptions::new().with_noise_sensitivity(9).noise_sensitivity(),
            3
        );
        assert_eq!(
            ListenOptions::new().with_noise_sensitivity(0).noise_sensitivity(),
            0
        );
    }

    #[test]
    fn energy_threshold_scales_with_sensitivity() {
        for step in 0..=MAX_NOISE_SENSITIVITY {
            let opts = ListenOptions::new().with_noise_sensitivity(step);
            assert_eq!(opts.energy_threshold(), 300 + step * 100);
        }
    }
}
