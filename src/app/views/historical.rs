use std::sync::Arc;

use crossterm::event::KeyCode;
use strum::IntoEnumIterator;

use super::picker::TickerPicker;
use crate::{
    app::{
        context::AppContext,
        dispatcher::QueryDispatcher,
        utils::{edit_text, parse_date, today},
    },
    models::ExportFormat,
    services::{read_table, series_text},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HistoryField {
    Ticker,
    Start,
    End,
}

pub struct HistoricalView {
    picker: TickerPicker,
    start: String,
    end: String,
    focus: HistoryField,
    export_format: ExportFormat,
    message: Option<String>,
    dispatcher: QueryDispatcher,
}

impl Default for HistoricalView {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoricalView {
    pub fn new() -> Self {
        Self {
            picker: TickerPicker::default(),
            start: today(),
            end: today(),
            focus: HistoryField::Ticker,
            export_format: ExportFormat::default(),
            message: None,
            dispatcher: QueryDispatcher::new(),
        }
    }

    pub fn picker(&self) -> &TickerPicker {
        &self.picker
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub fn focus(&self) -> HistoryField {
        self.focus
    }

    pub fn export_format(&self) -> ExportFormat {
        self.export_format
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.dispatcher.is_busy()
    }

    /// Returns a message for a popup when the key finished an export.
    pub fn handle_key(&mut self, code: KeyCode, ctx: &AppContext) -> Option<String> {
        match code {
            KeyCode::Tab => {
                self.focus = match self.focus {
                    HistoryField::Ticker => HistoryField::Start,
                    HistoryField::Start => HistoryField::End,
                    HistoryField::End => HistoryField::Ticker,
                }
            }
            KeyCode::BackTab => {
                self.focus = match self.focus {
                    HistoryField::Ticker => HistoryField::End,
                    HistoryField::Start => HistoryField::Ticker,
                    HistoryField::End => HistoryField::Start,
                }
            }
            KeyCode::Enter => self.submit(ctx),
            KeyCode::F(2) => self.cycle_export_format(),
            KeyCode::F(3) => return Some(self.export(ctx)),
            _ => match self.focus {
                HistoryField::Ticker => self.picker.handle_key(code, ctx.directory()),
                HistoryField::Start => edit_text(&mut self.start, code),
                HistoryField::End => edit_text(&mut self.end, code),
            },
        }
        None
    }

    pub fn submit(&mut self, ctx: &AppContext) {
        let symbol = ctx.directory().canonical(&self.picker.value(ctx.directory()));
        if symbol.is_empty() {
            self.message = Some(String::from("Choose a ticker first"));
            return;
        }

        let (start, end) = match (parse_date(&self.start), parse_date(&self.end)) {
            (Ok(start), Ok(end)) => (start, end),
            (Err(err), _) | (_, Err(err)) => {
                self.message = Some(format!("{:#}", err));
                return;
            }
        };

        let yahoo = Arc::clone(ctx.yahoo());
        let series = Arc::clone(ctx.series());

        self.message = Some(format!("Fetching {}...", symbol));
        self.dispatcher.dispatch(async move {
            series_text(yahoo.as_ref(), &series, &symbol, start, end).await
        });
    }

    pub fn cycle_export_format(&mut self) {
        let formats: Vec<ExportFormat> = ExportFormat::iter().collect();
        let idx = formats
            .iter()
            .position(|f| *f == self.export_format)
            .unwrap_or(0);
        self.export_format = formats[(idx + 1) % formats.len()];
    }

    pub fn export(&self, ctx: &AppContext) -> String {
        match read_table(ctx.series()).export(self.export_format, ctx.config().export_dir()) {
            Ok(path) => format!("Data successfully exported to {}", path.display()),
            Err(err) => format!("Export failed: {:#}", err),
        }
    }

    pub fn poll(&mut self) {
        if let Some(text) = self.dispatcher.try_complete() {
            self.message = Some(text);
        }
    }
}
