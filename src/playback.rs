//! Spoken-reply playback via a system audio player.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::debug;

use crate::error::{MoodbotError, Result};

/// Players probed for on the PATH, in order of preference, with the flags
/// that make them exit quietly after one file.
const PLAYERS: &[(&str, &[&str])] = &[
    ("mpv", &["--really-quiet", "--no-video"]),
    ("ffplay", &["-nodisp", "-autoexit", "-loglevel", "quiet"]),
    ("mplayer", &["-really-quiet"]),
    ("cvlc", &["--play-and-exit", "--quiet"]),
];

/// A resolved system audio player.
pub struct AudioPlayer {
    binary: PathBuf,
    args: &'static [&'static str],
}

impl AudioPlayer {
    /// Find the first available player on the PATH.
    pub fn detect() -> Result<Self> {
        for (name, args) in PLAYERS {
            if let Ok(binary) = which::which(name) {
                debug!(player = *name, "resolved audio player");
                return Ok(Self { binary, args });
            }
        }
        Err(MoodbotError::Configuration(
            "no audio player found on PATH (tried mpv, ffplay, mplayer, cvlc)".to_string(),
        ))
    }

    /// Play an audio file to completion.
    pub async fn play(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "playing audio");
        let output = Command::new(&self.binary)
            .args(self.args)
            .arg(path)
            .output()
            .await
            .map_err(|e| MoodbotError::Synthesis(format!("failed to start player: {e}")))?;

        if !output.status.success() {
            return Err(MoodbotError::Synthesis(format!(
                "player exited with {}",
                output.status
            )));
        }
        Ok(())
    }
}
