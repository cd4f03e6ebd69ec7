//! Timer configuration
//!
//! Durations are fixed presets; the environment only toggles debug output.

use std::path::PathBuf;
use std::time::Duration;

/// Environment variable that keeps previous frames on screen
pub const DEBUG_ENV: &str = "POMODORO_DEBUG";

/// Alarm played when a countdown completes, relative to the working directory
pub const ALARM_FILE: &str = "alarm.mp3";

/// A timed activity offered by the main menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    /// Title shown while the countdown runs
    pub title: String,
    /// Label recorded in the history once the countdown completes
    pub label: String,
    pub duration: Duration,
}

impl Preset {
    pub fn new(title: &str, label: &str, minutes: u64) -> Self {
        Self {
            title: title.to_string(),
            label: label.to_string(),
            duration: Duration::from_secs(minutes * 60),
        }
    }

    /// Entry text for the main menu, e.g. "Focus time (25 min)"
    pub fn menu_entry(&self) -> String {
        format!("{} ({} min)", self.title, self.duration.as_secs() / 60)
    }
}

/// Runtime settings for one process
#[derive(Debug, Clone)]
pub struct Config {
    pub presets: Vec<Preset>,
    pub tick_interval: Duration,
    pub alarm_path: PathBuf,
    /// Clear and home the cursor before every frame
    pub clear_screen: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            presets: vec![
                Preset::new("Focus time", "Focus", 25),
                Preset::new("Long break", "Long break", 15),
                Preset::new("Small break", "Small break", 5),
            ],
            tick_interval: Duration::from_secs(1),
            alarm_path: PathBuf::from(ALARM_FILE),
            clear_screen: true,
        }
    }
}

impl Config {
    /// Build the configuration, honouring `POMODORO_DEBUG`
    pub fn from_env() -> Self {
        let debug = std::env::var(DEBUG_ENV).ok();
        Self {
            clear_screen: !debug_enabled(debug.as_deref()),
            ..Self::default()
        }
    }
}

fn debug_enabled(value: Option<&str>) -> bool {
    match value {
        Some(v) => !v.is_empty() && v != "0",
        None => false,
    }
}
