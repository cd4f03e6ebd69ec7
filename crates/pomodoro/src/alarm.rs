//! Completion alarm
//!
//! Playback runs on its own thread so the UI loop never waits for it.
//! Decoding is left to whichever command-line player the platform offers.
//! A missing or unreadable asset only costs the sound: the error is logged
//! and the timer carries on.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use crate::error::{PomodoroError, Result};

/// Something that can announce a finished countdown
pub trait Alarm: Send + Sync {
    /// Start the notification and return immediately
    fn play(&self);
}

/// Plays an MP3 file through a platform audio player
#[derive(Debug, Clone)]
pub struct SoundAlarm {
    path: PathBuf,
}

impl SoundAlarm {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Alarm for SoundAlarm {
    fn play(&self) {
        let path = self.path.clone();
        let spawned = thread::Builder::new()
            .name("alarm".to_string())
            .spawn(move || {
                if let Err(e) = play_file(&path) {
                    tracing::warn!("alarm skipped: {e}");
                }
            });

        if let Err(e) = spawned {
            tracing::warn!("failed to start alarm thread: {e}");
        }
    }
}

/// Check the asset, then block until the player finishes
fn play_file(path: &Path) -> Result<()> {
    check_asset(path)?;

    let Some(player) = Player::detect() else {
        tracing::info!("no audio player available, alarm is silent");
        return Ok(());
    };

    tracing::debug!(player = player.name(), path = %path.display(), "playing alarm");
    let status = player
        .command(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| asset_error(path, format!("{} failed to start: {e}", player.name())))?;

    if !status.success() {
        return Err(asset_error(
            path,
            format!("{} exited with {status}", player.name()),
        ));
    }
    Ok(())
}

/// Make sure the file exists and carries an MP3 header
pub fn check_asset(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| asset_error(path, e.to_string()))?;

    let mut header = [0u8; 3];
    let mut read = 0;
    while read < header.len() {
        match file.read(&mut header[read..]) {
            Ok(0) => break,
            Ok(n) => read += n,
            Err(e) => return Err(asset_error(path, e.to_string())),
        }
    }

    if !looks_like_mp3(&header[..read]) {
        return Err(asset_error(path, "not an MP3 file".to_string()));
    }
    Ok(())
}

/// ID3 tag or MPEG audio frame sync
pub fn looks_like_mp3(header: &[u8]) -> bool {
    match header {
        [b'I', b'D', b'3', ..] => true,
        [0xFF, second, ..] => second & 0xE0 == 0xE0,
        _ => false,
    }
}

fn asset_error(path: &Path, reason: String) -> PomodoroError {
    PomodoroError::AudioAsset {
        path: path.to_path_buf(),
        reason,
    }
}

/// Command-line players able to decode MP3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    /// macOS afplay
    Afplay,
    Ffplay,
    Mpg123,
    Mpv,
    /// PulseAudio, decodes MP3 when built with libsndfile support
    Paplay,
}

impl Player {
    /// Find the first player installed on this machine
    pub fn detect() -> Option<Self> {
        #[cfg(target_os = "macos")]
        {
            return Some(Self::Afplay);
        }

        #[cfg(not(target_os = "macos"))]
        {
            [Self::Ffplay, Self::Mpg123, Self::Mpv, Self::Paplay]
                .into_iter()
                .find(|player| Self::command_exists(player.name()))
        }
    }

    #[cfg(not(target_os = "macos"))]
    fn command_exists(cmd: &str) -> bool {
        Command::new("which")
            .arg(cmd)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Afplay => "afplay",
            Self::Ffplay => "ffplay",
            Self::Mpg123 => "mpg123",
            Self::Mpv => "mpv",
            Self::Paplay => "paplay",
        }
    }

    /// Command playing `path` once at its native rate, without a window
    pub fn command(&self, path: &Path) -> Command {
        let mut cmd = Command::new(self.name());
        match self {
            Self::Ffplay => {
                cmd.args(["-nodisp", "-autoexit", "-loglevel", "quiet"]);
            }
            Self::Mpg123 => {
                cmd.arg("-q");
            }
            Self::Mpv => {
                cmd.args(["--no-video", "--really-quiet"]);
            }
            Self::Afplay | Self::Paplay => {}
        }
        cmd.arg(path);
        cmd
    }
}
