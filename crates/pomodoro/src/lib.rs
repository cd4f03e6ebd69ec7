//! pomodoro - Interactive terminal countdown timer
//!
//! A main menu offers focus and break sessions. A running session shows a
//! live countdown with Stop, Pause/Resume and Quit, and plays an alarm when
//! it reaches zero. Completed sessions are listed above the main menu for
//! the rest of the run.
//!
//! Keys:
//! - Up/Down: move the highlight (wraps around)
//! - Enter: choose the highlighted entry
//! - Ctrl-C: quit immediately

pub mod alarm;
pub mod app;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod error;
pub mod input;
pub mod main_menu;
pub mod menu;
pub mod paths;
pub mod render;
pub mod terminal;

pub use alarm::{Alarm, SoundAlarm};
pub use app::App;
pub use config::{Config, Preset};
pub use countdown::{CountdownSession, CountdownState, Outcome};
pub use error::{PomodoroError, Result};
pub use input::KeyEvent;
pub use main_menu::MainMenu;
pub use menu::Menu;
pub use paths::Paths;
