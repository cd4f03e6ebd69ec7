//! Session orchestration
//!
//! Alternates between the main menu and countdown sessions until the user
//! quits. Key events and clock ticks are merged in a single loop on one
//! task, so controller state is only ever touched from here.

use std::io::{self, Write};
use tokio::time::Instant;

use crate::alarm::Alarm;
use crate::clock::Clock;
use crate::config::{Config, Preset};
use crate::countdown::{CountdownSession, Effect, Outcome, SessionEvent};
use crate::error::{PomodoroError, Result};
use crate::input::{InputReceiver, KeyEvent};
use crate::main_menu::{MainMenu, MenuStep, Selection};
use crate::render;

/// Top-level driver owning the input channel and the output stream
pub struct App<W: Write, A: Alarm> {
    config: Config,
    out: W,
    input: InputReceiver,
    alarm: A,
}

impl<W: Write, A: Alarm> App<W, A> {
    pub fn new(config: Config, out: W, input: InputReceiver, alarm: A) -> Self {
        Self {
            config,
            out,
            input,
            alarm,
        }
    }

    /// Run until the user quits; returns the labels of completed sessions.
    ///
    /// The goodbye text is written on every successful exit, whether the
    /// user chose Quit or pressed Ctrl-C.
    pub async fn run(&mut self) -> Result<Vec<String>> {
        let mut main_menu = MainMenu::new(&self.config.presets);

        loop {
            self.draw(&render::main_menu_screen(&main_menu, self.config.clear_screen))?;

            let key = key_event(self.input.recv().await)?;
            let index = match main_menu.handle(key) {
                MenuStep::Redraw => continue,
                MenuStep::Selected(Selection::Quit) => break,
                MenuStep::Selected(Selection::Preset(index)) => index,
            };

            let preset = self.config.presets[index].clone();
            match self.run_countdown(&preset).await? {
                Outcome::Completed => main_menu.record_completion(&preset.label),
                Outcome::Stopped => {}
                Outcome::Quit => break,
            }
        }

        let labels = main_menu.into_completed_labels();
        tracing::info!(completed = labels.len(), "exiting");
        self.draw(&render::goodbye(&labels))?;
        Ok(labels)
    }

    /// Drive one countdown to a terminal state
    async fn run_countdown(&mut self, preset: &Preset) -> Result<Outcome> {
        tracing::info!(title = %preset.title, duration = ?preset.duration, "countdown started");

        let mut session = CountdownSession::from_preset(preset, Instant::now());
        let mut clock = Clock::start(self.config.tick_interval);
        self.draw(&render::countdown_screen(&session, self.config.clear_screen))?;

        let outcome = loop {
            let event = tokio::select! {
                msg = self.input.recv() => key_event(msg).map(SessionEvent::Key),
                _ = clock.tick() => Ok(SessionEvent::Tick),
            }?;

            for effect in session.apply(event, Instant::now()) {
                match effect {
                    Effect::Redraw => {
                        self.draw(&render::countdown_screen(&session, self.config.clear_screen))?
                    }
                    Effect::PlayAlarm => self.alarm.play(),
                }
            }

            if let Some(outcome) = session.state().outcome() {
                break outcome;
            }
        };
        clock.stop();

        tracing::info!(title = %preset.title, ?outcome, elapsed = ?session.elapsed(), "countdown ended");
        Ok(outcome)
    }

    fn draw(&mut self, frame: &str) -> Result<()> {
        self.out
            .write_all(frame.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(PomodoroError::Output)
    }
}

/// Unwrap one message from the input channel
fn key_event(msg: Option<io::Result<KeyEvent>>) -> Result<KeyEvent> {
    match msg {
        Some(Ok(key)) => Ok(key),
        Some(Err(e)) => Err(PomodoroError::InputRead(e)),
        None => Err(PomodoroError::InputClosed),
    }
}
