use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use crossterm::event::KeyCode;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(field.trim(), DATE_FORMAT)
        .with_context(|| format!("Failed to parse date '{}', expected YYYY-MM-DD", field.trim()))
}

pub fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

pub fn next_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) if i + 1 < len => i + 1,
        _ => 0,
    })
}

pub fn prev_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(0) | None => len - 1,
        Some(i) => (i - 1).min(len - 1),
    })
}

/// Applies a printable key or backspace to a single-line text field.
pub fn edit_text(field: &mut String, code: KeyCode) {
    match code {
        KeyCode::Char(c) => field.push(c),
        KeyCode::Backspace => {
            field.pop();
        }
        _ => {}
    }
}
