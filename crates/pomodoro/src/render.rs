//! Terminal text for each screen
//!
//! Pure functions: every frame is built as a string from the current state.
//! Lines end in CRLF since the terminal is in raw mode.

use std::time::Duration;

use crate::countdown::{whole_seconds, CountdownSession};
use crate::main_menu::MainMenu;

/// Home the cursor and clear the screen
pub const CLEAR: &str = "\x1b[H\x1b[2J";

const BAR_WIDTH: u64 = 10;
const HISTORY_SEPARATOR: &str = " | ";

/// Full frame for a running or paused countdown
pub fn countdown_screen(session: &CountdownSession, clear: bool) -> String {
    let mut out = String::new();
    if clear {
        out.push_str(CLEAR);
    }
    out.push_str(&format!(
        "[{}] \r\n",
        progress_bar(session.remaining(), session.total())
    ));
    out.push_str(&format!(
        "[{:>6}] {} : {} \r\n",
        format_remaining(session.remaining()),
        session.title(),
        session.state().message()
    ));
    out.push_str(&session.menu().render());
    out
}

/// Main menu frame, with the completed history above the options
pub fn main_menu_screen(menu: &MainMenu, clear: bool) -> String {
    let mut out = String::new();
    if clear {
        out.push_str(CLEAR);
    }
    if !menu.completed_labels().is_empty() {
        out.push_str("Completed: ");
        out.push_str(&menu.completed_labels().join(HISTORY_SEPARATOR));
        out.push_str("\r\n");
    }
    out.push_str(&menu.menu().render());
    out
}

/// Farewell printed once on exit: thanks, project info, session count
pub fn goodbye(completed: &[String]) -> String {
    format!(
        "Thank you for using the application\r\n{} {} - {}\r\nSessions completed: {}\r\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION"),
        completed.len()
    )
}

/// Ten characters: '#' for time used, '-' for time left
pub fn progress_bar(remaining: Duration, total: Duration) -> String {
    let total = total.as_secs();
    let empty = if total == 0 {
        0
    } else {
        (whole_seconds(remaining) * BAR_WIDTH / total).min(BAR_WIDTH)
    };
    let filled = BAR_WIDTH - empty;
    format!(
        "{}{}",
        "#".repeat(filled as usize),
        "-".repeat(empty as usize)
    )
}

/// Compact h/m/s notation after rounding: "24m59s", "1m0s", "59s", "1h0m0s"
pub fn format_remaining(remaining: Duration) -> String {
    let secs = whole_seconds(remaining);
    let (hours, minutes, seconds) = (secs / 3600, secs % 3600 / 60, secs % 60);
    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
