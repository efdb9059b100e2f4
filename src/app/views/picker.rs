use crossterm::event::KeyCode;

use crate::{
    app::utils::{edit_text, next_index, prev_index},
    models::TickerDirectory,
};

/// Free-text ticker input with a filtered suggestion list drawn from the
/// directory. With no directory loaded, typed symbols are used as-is.
#[derive(Clone, Debug, Default)]
pub struct TickerPicker {
    input: String,
    selected: Option<usize>,
}

impl TickerPicker {
    pub fn with_input(input: &str) -> Self {
        Self {
            input: input.to_string(),
            selected: None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn suggestions<'a>(&self, directory: &'a TickerDirectory) -> Vec<&'a str> {
        directory.filter(&self.input)
    }

    pub fn handle_key(&mut self, code: KeyCode, directory: &TickerDirectory) {
        match code {
            KeyCode::Down => {
                self.selected = next_index(self.selected, self.suggestions(directory).len())
            }
            KeyCode::Up => {
                self.selected = prev_index(self.selected, self.suggestions(directory).len())
            }
            KeyCode::Char(_) | KeyCode::Backspace => {
                edit_text(&mut self.input, code);
                self.selected = None;
            }
            _ => {}
        }
    }

    /// The highlighted suggestion if there is one, otherwise the typed text.
    pub fn value(&self, directory: &TickerDirectory) -> String {
        self.selected
            .and_then(|i| self.suggestions(directory).get(i).map(|s| s.to_string()))
            .unwrap_or_else(|| self.input.trim().to_string())
    }
}
