//! Error taxonomy for the timer

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while driving the timer UI
#[derive(Error, Debug)]
pub enum PomodoroError {
    #[error("Failed to switch the terminal to raw mode: {0}")]
    TerminalSetup(#[source] io::Error),

    #[error("Failed to read from standard input: {0}")]
    InputRead(#[source] io::Error),

    #[error("Standard input was closed")]
    InputClosed,

    #[error("Alarm sound {} unavailable: {reason}", path.display())]
    AudioAsset { path: PathBuf, reason: String },

    #[error("Failed to write to the terminal: {0}")]
    Output(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, PomodoroError>;
