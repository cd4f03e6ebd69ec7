//! Countdown session state machine
//!
//! One `CountdownSession` lives for a single run of the timer. Keys and
//! clock ticks are fed through [`CountdownSession::apply`], which mutates the
//! session and reports the side effects the caller must perform. The caller
//! supplies the current instant, so the transitions can be exercised without
//! a terminal or a real clock.

use std::time::Duration;
use tokio::time::Instant;

use crate::config::Preset;
use crate::input::KeyEvent;
use crate::menu::Menu;

/// Inline menu entries
pub const STOP: usize = 0;
pub const PAUSE_RESUME: usize = 1;
pub const QUIT: usize = 2;

const STOP_LABEL: &str = "Stop (Return to main menu)";
const PAUSE_LABEL: &str = "Pause";
const RESUME_LABEL: &str = "Resume";
const QUIT_LABEL: &str = "Quit";

/// Lifecycle of a countdown session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Running,
    Paused,
    /// Remaining time reached zero
    Completed,
    /// "Stop" chosen; back to the main menu without credit
    StoppedByUser,
    /// "Quit" chosen or Ctrl-C; the whole application exits
    QuitRequested,
}

impl CountdownState {
    pub fn is_terminal(self) -> bool {
        self.outcome().is_some()
    }

    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Self::Running | Self::Paused => None,
            Self::Completed => Some(Outcome::Completed),
            Self::StoppedByUser => Some(Outcome::Stopped),
            Self::QuitRequested => Some(Outcome::Quit),
        }
    }

    /// Status message shown next to the title
    pub fn message(self) -> &'static str {
        match self {
            Self::Running => "Timer running ...",
            Self::Paused => "Timer paused !",
            Self::Completed => "Time is up !",
            // Never drawn: the session ends without a redraw
            Self::StoppedByUser | Self::QuitRequested => "Timer stopped",
        }
    }
}

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Stopped,
    Quit,
}

impl Outcome {
    pub fn should_exit(self) -> bool {
        matches!(self, Outcome::Quit)
    }
}

/// Inputs the session reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Key(KeyEvent),
    Tick,
}

/// Work the caller performs after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Redraw,
    /// Start the completion alarm without waiting for it
    PlayAlarm,
}

/// A single countdown run
#[derive(Debug, Clone)]
pub struct CountdownSession {
    title: String,
    total: Duration,
    /// Origin of the current running stretch
    started_at: Instant,
    /// Remaining time when `started_at` was taken
    baseline: Duration,
    remaining: Duration,
    state: CountdownState,
    menu: Menu,
}

impl CountdownSession {
    pub fn new(title: impl Into<String>, total: Duration, now: Instant) -> Self {
        Self {
            title: title.into(),
            total,
            started_at: now,
            baseline: total,
            remaining: total,
            state: CountdownState::Running,
            menu: Menu::new([STOP_LABEL, PAUSE_LABEL, QUIT_LABEL]),
        }
    }

    pub fn from_preset(preset: &Preset, now: Instant) -> Self {
        Self::new(&preset.title, preset.duration, now)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Time counted down so far; frozen while paused
    pub fn elapsed(&self) -> Duration {
        self.total.saturating_sub(self.remaining)
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn is_paused(&self) -> bool {
        self.state == CountdownState::Paused
    }

    /// Feed one event through the state machine.
    ///
    /// Events after the session reached a terminal state are ignored.
    pub fn apply(&mut self, event: SessionEvent, now: Instant) -> Vec<Effect> {
        if self.state.is_terminal() {
            return Vec::new();
        }

        let effects = match event {
            SessionEvent::Key(KeyEvent::Terminate) => {
                self.state = CountdownState::QuitRequested;
                Vec::new()
            }
            SessionEvent::Key(KeyEvent::MoveUp) => {
                self.menu.move_up();
                vec![Effect::Redraw]
            }
            SessionEvent::Key(KeyEvent::MoveDown) => {
                self.menu.move_down();
                vec![Effect::Redraw]
            }
            SessionEvent::Key(KeyEvent::Confirm) => self.confirm(now),
            SessionEvent::Tick => self.tick(now),
        };

        tracing::debug!(state = ?self.state, remaining = ?self.remaining, "countdown {:?}", event);
        effects
    }

    fn confirm(&mut self, now: Instant) -> Vec<Effect> {
        match self.menu.selected() {
            STOP => {
                self.state = CountdownState::StoppedByUser;
                Vec::new()
            }
            PAUSE_RESUME => {
                if self.is_paused() {
                    self.resume(now);
                    return vec![Effect::Redraw];
                }
                self.remaining = self.remaining_at(now);
                if whole_seconds(self.remaining) == 0 {
                    // Nothing left to pause; the session is over
                    return self.complete();
                }
                self.pause();
                vec![Effect::Redraw]
            }
            _ => {
                self.state = CountdownState::QuitRequested;
                Vec::new()
            }
        }
    }

    fn pause(&mut self) {
        self.state = CountdownState::Paused;
        self.menu.relabel(PAUSE_RESUME, RESUME_LABEL);
    }

    fn resume(&mut self, now: Instant) {
        self.started_at = now;
        self.baseline = self.remaining;
        self.state = CountdownState::Running;
        self.menu.relabel(PAUSE_RESUME, PAUSE_LABEL);
    }

    fn tick(&mut self, now: Instant) -> Vec<Effect> {
        if self.is_paused() {
            return Vec::new();
        }

        self.remaining = self.remaining_at(now);
        if whole_seconds(self.remaining) == 0 {
            return self.complete();
        }
        vec![Effect::Redraw]
    }

    fn complete(&mut self) -> Vec<Effect> {
        self.remaining = Duration::ZERO;
        self.state = CountdownState::Completed;
        vec![Effect::Redraw, Effect::PlayAlarm]
    }

    fn remaining_at(&self, now: Instant) -> Duration {
        self.baseline
            .saturating_sub(now.saturating_duration_since(self.started_at))
    }
}

/// Round to the nearest whole second
pub fn whole_seconds(d: Duration) -> u64 {
    (d.as_millis() as u64 + 500) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    fn focus(now: Instant) -> CountdownSession {
        CountdownSession::new("Focus time", Duration::from_secs(25 * 60), now)
    }

    fn key(k: KeyEvent) -> SessionEvent {
        SessionEvent::Key(k)
    }

    #[test]
    fn test_starts_running_with_full_time() {
        let session = focus(Instant::now());
        assert_eq!(session.state(), CountdownState::Running);
        assert_eq!(session.remaining(), Duration::from_secs(1500));
        assert_eq!(session.elapsed(), Duration::ZERO);
        assert_eq!(session.menu().selected(), STOP);
    }

    #[test]
    fn test_tick_recomputes_from_wall_clock() {
        let t0 = Instant::now();
        let mut session = focus(t0);
        let effects = session.apply(SessionEvent::Tick, t0 + 10 * SECOND);
        assert_eq!(effects, vec![Effect::Redraw]);
        assert_eq!(session.remaining(), Duration::from_secs(1490));

        // A skipped tick does not lose time
        session.apply(SessionEvent::Tick, t0 + 13 * SECOND);
        assert_eq!(session.remaining(), Duration::from_secs(1487));
    }

    #[test]
    fn test_up_wraps_to_quit() {
        let t0 = Instant::now();
        let mut session = focus(t0);
        let effects = session.apply(key(KeyEvent::MoveUp), t0);
        assert_eq!(effects, vec![Effect::Redraw]);
        assert_eq!(session.menu().selected(), QUIT);
        assert_eq!(session.state(), CountdownState::Running);
    }

    #[test]
    fn test_pause_freezes_and_resume_preserves_remaining() {
        let t0 = Instant::now();
        let mut session = focus(t0);
        session.apply(key(KeyEvent::MoveDown), t0);

        session.apply(key(KeyEvent::Confirm), t0 + Duration::from_millis(10_400));
        assert_eq!(session.state(), CountdownState::Paused);
        assert_eq!(session.menu().options()[PAUSE_RESUME], "Resume");
        let before = session.remaining();
        assert_eq!(before, Duration::from_millis(1_489_600));

        // Ticks while paused change nothing
        assert!(session.apply(SessionEvent::Tick, t0 + 100 * SECOND).is_empty());
        assert_eq!(session.remaining(), before);

        session.apply(key(KeyEvent::Confirm), t0 + 200 * SECOND);
        assert_eq!(session.state(), CountdownState::Running);
        assert_eq!(session.menu().options()[PAUSE_RESUME], "Pause");
        assert_eq!(session.remaining(), before);

        session.apply(SessionEvent::Tick, t0 + 201 * SECOND);
        assert_eq!(session.remaining(), before - SECOND);
    }

    #[test]
    fn test_stop_regardless_of_pause() {
        let t0 = Instant::now();

        let mut running = focus(t0);
        running.apply(key(KeyEvent::Confirm), t0 + SECOND);
        assert_eq!(running.state(), CountdownState::StoppedByUser);
        assert_eq!(running.state().outcome(), Some(Outcome::Stopped));

        let mut paused = focus(t0);
        paused.apply(key(KeyEvent::MoveDown), t0);
        paused.apply(key(KeyEvent::Confirm), t0);
        paused.apply(key(KeyEvent::MoveUp), t0);
        paused.apply(key(KeyEvent::Confirm), t0);
        assert_eq!(paused.state(), CountdownState::StoppedByUser);
    }

    #[test]
    fn test_quit_option_requests_exit() {
        let t0 = Instant::now();
        let mut session = focus(t0);
        session.apply(key(KeyEvent::MoveUp), t0);
        let effects = session.apply(key(KeyEvent::Confirm), t0);
        assert!(effects.is_empty());
        assert_eq!(session.state(), CountdownState::QuitRequested);
        assert!(session.state().outcome().unwrap().should_exit());
    }

    #[test]
    fn test_terminate_bypasses_menu() {
        let t0 = Instant::now();
        for paused in [false, true] {
            let mut session = focus(t0);
            if paused {
                session.apply(key(KeyEvent::MoveDown), t0);
                session.apply(key(KeyEvent::Confirm), t0);
            }
            let effects = session.apply(key(KeyEvent::Terminate), t0 + SECOND);
            assert!(effects.is_empty(), "no redraw on terminate");
            assert_eq!(session.state(), CountdownState::QuitRequested);
        }
    }

    #[test]
    fn test_completion_plays_alarm_once_and_is_final() {
        let t0 = Instant::now();
        let mut session = focus(t0);
        session.apply(SessionEvent::Tick, t0 + 1499 * SECOND);
        assert_eq!(session.state(), CountdownState::Running);

        let effects = session.apply(SessionEvent::Tick, t0 + 1500 * SECOND);
        assert_eq!(effects, vec![Effect::Redraw, Effect::PlayAlarm]);
        assert_eq!(session.state(), CountdownState::Completed);
        assert_eq!(session.remaining(), Duration::ZERO);

        for event in [
            SessionEvent::Tick,
            key(KeyEvent::Confirm),
            key(KeyEvent::MoveDown),
            key(KeyEvent::Terminate),
        ] {
            assert!(session.apply(event, t0 + 1600 * SECOND).is_empty());
            assert_eq!(session.state(), CountdownState::Completed);
        }
        assert!(!session.state().outcome().unwrap().should_exit());
    }

    #[test]
    fn test_completes_when_rounded_to_zero() {
        let t0 = Instant::now();
        let mut session = CountdownSession::new("Short", 2 * SECOND, t0);
        session.apply(SessionEvent::Tick, t0 + Duration::from_millis(1400));
        assert_eq!(session.state(), CountdownState::Running);
        session.apply(SessionEvent::Tick, t0 + Duration::from_millis(1600));
        assert_eq!(session.state(), CountdownState::Completed);
    }

    #[test]
    fn test_pause_in_last_half_second_completes() {
        let t0 = Instant::now();
        let mut session = CountdownSession::new("Short", 2 * SECOND, t0);
        session.apply(key(KeyEvent::MoveDown), t0);
        session.apply(SessionEvent::Tick, t0 + Duration::from_millis(1400));
        assert_eq!(session.state(), CountdownState::Running);

        let effects = session.apply(key(KeyEvent::Confirm), t0 + Duration::from_millis(1600));
        assert_eq!(effects, vec![Effect::Redraw, Effect::PlayAlarm]);
        assert_eq!(session.state(), CountdownState::Completed);
        assert_eq!(session.remaining(), Duration::ZERO);
        assert_eq!(session.menu().options()[PAUSE_RESUME], "Pause");
    }

    #[test]
    fn test_pause_with_a_second_left_still_pauses() {
        let t0 = Instant::now();
        let mut session = CountdownSession::new("Short", 2 * SECOND, t0);
        session.apply(key(KeyEvent::MoveDown), t0);
        let effects = session.apply(key(KeyEvent::Confirm), t0 + Duration::from_millis(1400));
        assert_eq!(effects, vec![Effect::Redraw]);
        assert_eq!(session.state(), CountdownState::Paused);
        assert_eq!(session.remaining(), Duration::from_millis(600));
    }

    #[test]
    fn test_message_per_state() {
        assert_eq!(CountdownState::Running.message(), "Timer running ...");
        assert_eq!(CountdownState::Paused.message(), "Timer paused !");
        assert_eq!(CountdownState::Completed.message(), "Time is up !");
    }

    #[test]
    fn test_whole_seconds_rounds() {
        assert_eq!(whole_seconds(Duration::from_millis(499)), 0);
        assert_eq!(whole_seconds(Duration::from_millis(500)), 1);
        assert_eq!(whole_seconds(Duration::from_millis(1_489_600)), 1490);
    }

    #[test]
    fn test_from_preset() {
        let preset = Preset::new("Small break", "Small break", 5);
        let session = CountdownSession::from_preset(&preset, Instant::now());
        assert_eq!(session.title(), "Small break");
        assert_eq!(session.total(), Duration::from_secs(300));
    }
}
