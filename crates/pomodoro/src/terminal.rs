//! Raw terminal mode

use crossterm::terminal::{disable_raw_mode, enable_raw_mode, is_raw_mode_enabled};

use crate::error::{PomodoroError, Result};

/// Holds the terminal in raw mode; restores cooked mode when dropped.
///
/// Keep it alive for as long as the UI runs so every exit path, including
/// errors and Ctrl-C, hands the terminal back in a usable state.
pub struct RawModeGuard {
    was_raw: bool,
}

impl RawModeGuard {
    pub fn acquire() -> Result<Self> {
        let was_raw = is_raw_mode_enabled().unwrap_or(false);
        enable_raw_mode().map_err(PomodoroError::TerminalSetup)?;
        tracing::debug!("raw mode enabled");
        Ok(Self { was_raw })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.was_raw {
            return;
        }
        match disable_raw_mode() {
            Ok(()) => tracing::debug!("raw mode restored"),
            Err(e) => tracing::error!("failed to restore terminal mode: {e}"),
        }
    }
}
