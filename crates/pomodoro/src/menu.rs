//! Vertical option list with a wrapping highlight

/// Marker drawn in front of the highlighted entry
const HIGHLIGHT: &str = ">>>";
const PLAIN: &str = "   ";

/// A list of labelled options and the index currently highlighted.
///
/// Moving past either end wraps around, so the highlight is always a
/// valid index for the options on display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    options: Vec<String>,
    selected: usize,
}

impl Menu {
    /// Create a menu highlighting the first option
    ///
    /// # Panics
    ///
    /// Panics if `options` is empty.
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        assert!(!options.is_empty(), "a menu needs at least one option");
        Self {
            options,
            selected: 0,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn move_up(&mut self) {
        self.shift(-1);
    }

    pub fn move_down(&mut self) {
        self.shift(1);
    }

    fn shift(&mut self, delta: isize) {
        let len = self.options.len() as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }

    /// Replace the text of one entry, keeping the highlight where it is
    pub fn relabel(&mut self, index: usize, label: impl Into<String>) {
        if let Some(option) = self.options.get_mut(index) {
            *option = label.into();
        }
    }

    /// One CRLF-terminated line per option, the highlighted one marked
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (index, option) in self.options.iter().enumerate() {
            out.push_str(if index == self.selected { HIGHLIGHT } else { PLAIN });
            out.push_str(option);
            out.push_str("\r\n");
        }
        out
    }
}
