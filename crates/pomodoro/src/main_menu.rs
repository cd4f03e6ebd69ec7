//! Main menu state machine and completed-session history

use crate::config::Preset;
use crate::input::KeyEvent;
use crate::menu::Menu;

const QUIT_LABEL: &str = "Quit";

/// What the user picked from the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Index into the configured presets
    Preset(usize),
    Quit,
}

/// Result of feeding one key to the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuStep {
    /// Still awaiting a selection; the highlight moved
    Redraw,
    Selected(Selection),
}

/// Main menu navigation plus the labels of every completed session.
///
/// The history only grows and lives as long as the process.
#[derive(Debug, Clone)]
pub struct MainMenu {
    menu: Menu,
    presets: usize,
    completed_labels: Vec<String>,
}

impl MainMenu {
    pub fn new(presets: &[Preset]) -> Self {
        let options = presets
            .iter()
            .map(Preset::menu_entry)
            .chain(std::iter::once(QUIT_LABEL.to_string()));
        Self {
            menu: Menu::new(options),
            presets: presets.len(),
            completed_labels: Vec::new(),
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn completed_labels(&self) -> &[String] {
        &self.completed_labels
    }

    pub fn into_completed_labels(self) -> Vec<String> {
        self.completed_labels
    }

    pub fn record_completion(&mut self, label: impl Into<String>) {
        self.completed_labels.push(label.into());
    }

    pub fn handle(&mut self, key: KeyEvent) -> MenuStep {
        match key {
            KeyEvent::MoveUp => {
                self.menu.move_up();
                MenuStep::Redraw
            }
            KeyEvent::MoveDown => {
                self.menu.move_down();
                MenuStep::Redraw
            }
            KeyEvent::Confirm => MenuStep::Selected(self.selection_at(self.menu.selected())),
            KeyEvent::Terminate => MenuStep::Selected(Selection::Quit),
        }
    }

    fn selection_at(&self, index: usize) -> Selection {
        if index < self.presets {
            Selection::Preset(index)
        } else {
            Selection::Quit
        }
    }
}
