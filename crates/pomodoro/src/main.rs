//! pomodoro - Interactive terminal countdown timer
//!
//! Usage:
//!   pomodoro
//!
//! Pick a session from the menu with the arrow keys and Enter. While a
//! session runs, the same keys stop, pause/resume or quit it. Ctrl-C exits
//! from anywhere.
//!
//! Logs go to ~/.local/share/pomodoro/pomodoro.log (filter with RUST_LOG).
//! Set POMODORO_DEBUG=1 to keep previous frames on screen.

use anyhow::Result;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use pomodoro::terminal::RawModeGuard;
use pomodoro::{input, App, Config, Paths, SoundAlarm};

fn main() -> Result<()> {
    init_logging(&Paths::new());

    let config = Config::from_env();
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let guard = RawModeGuard::acquire()?;
    let result = match input::spawn_reader() {
        Ok(keys) => {
            let alarm = SoundAlarm::new(config.alarm_path.clone());
            let mut app = App::new(config, io::stdout(), keys, alarm);
            rt.block_on(app.run())
        }
        Err(e) => Err(pomodoro::PomodoroError::InputRead(e)),
    };

    // Restore the terminal before anything else reaches the screen
    drop(guard);

    if let Err(err) = result {
        tracing::error!("{err}");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file; the screen belongs to the timer
fn init_logging(paths: &Paths) {
    if std::fs::create_dir_all(&paths.data).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())
    else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}
