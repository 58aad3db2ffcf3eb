//! Configuration loading for the moodbot CLI.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.moodbot/config.toml` (user)
//! 3. `/etc/moodbot/config.toml` (system)
//!
//! Unlike most settings, a missing file is not an error: every field has a
//! default and the CLI works out of the box. Only an explicit `--config`
//! pointing at a missing file fails.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::Language;
use crate::{MoodbotError, Result};

/// Environment variable consulted when no speech API key is configured.
pub const SPEECH_API_KEY_ENV: &str = "GOOGLE_SPEECH_API_KEY";

/// CLI configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub cache: CacheSection,
}

/// Voice capture configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceConfig {
    /// Listen timeout in seconds, clamped to 5..=15 (default: 5).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Noise sensitivity step, clamped to 0..=3 (default: 1).
    #[serde(default = "default_noise_sensitivity")]
    pub noise_sensitivity: u8,
    /// ALSA capture device passed to arecord (default: arecord's own).
    #[serde(default)]
    pub device: Option<String>,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            noise_sensitivity: default_noise_sensitivity(),
            device: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_noise_sensitivity() -> u8 {
    1
}

/// Reply output configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Output language code: en, es, fr or hi (default: en).
    #[serde(default)]
    pub language: Language,
    /// Speak replies aloud (default: false).
    #[serde(default)]
    pub speak: bool,
    /// Where synthesized audio is written (default: response.mp3).
    #[serde(default)]
    pub audio_path: Option<PathBuf>,
}

/// Web service endpoints and credentials.
///
/// URLs default to the public endpoints; overriding them is mostly useful
/// for pointing the CLI at a mock or a relay.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServicesConfig {
    #[serde(default)]
    pub speech_url: Option<String>,
    #[serde(default)]
    pub translate_url: Option<String>,
    #[serde(default)]
    pub tts_url: Option<String>,
    /// Speech recognition API key.
    #[serde(default)]
    pub speech_api_key: Option<String>,
}

impl ServicesConfig {
    /// Speech API key from the config file, falling back to
    /// [`SPEECH_API_KEY_ENV`].
    pub fn speech_api_key(&self) -> Option<String> {
        self.speech_api_key
            .clone()
            .or_else(|| std::env::var(SPEECH_API_KEY_ENV).ok())
    }
}

/// Response cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSection {
    /// Cache repeated translations and synthesized audio (default: true).
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// Maximum cached entries (default: 1000).
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
    /// Entry time-to-live in seconds (default: 3600).
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            max_entries: default_max_entries(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_cache_enabled() -> bool {
    true
}

fn default_max_entries() -> u64 {
    1000
}

fn default_ttl_secs() -> u64 {
    3600
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided; must exist)
    /// 2. `~/.moodbot/config.toml`
    /// 3. `/etc/moodbot/config.toml`
    ///
    /// Returns defaults if no file exists.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Config::default()),
        }
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            MoodbotError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            MoodbotError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path, `None` meaning "use defaults".
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(MoodbotError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".moodbot").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/moodbot/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }
}
