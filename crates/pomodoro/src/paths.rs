//! Standard paths used by the timer

use std::path::PathBuf;

/// Standard pomodoro paths
pub struct Paths {
    /// Data directory (~/.local/share/pomodoro)
    pub data: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let data = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("pomodoro");

        Self { data }
    }

    /// Log file written while the terminal is in raw mode
    pub fn log_file(&self) -> PathBuf {
        self.data.join("pomodoro.log")
    }
}
