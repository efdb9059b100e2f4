use std::sync::Arc;

use crossterm::event::KeyCode;

use super::picker::TickerPicker;
use crate::{
    app::{
        context::AppContext,
        dispatcher::QueryDispatcher,
        utils::{edit_text, parse_date, today},
    },
    models::QuoteRequest,
    services::quote_text,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SpotField {
    Ticker,
    Date,
    Adjusted,
}

impl SpotField {
    fn next(self) -> Self {
        match self {
            SpotField::Ticker => SpotField::Date,
            SpotField::Date => SpotField::Adjusted,
            SpotField::Adjusted => SpotField::Ticker,
        }
    }

    fn prev(self) -> Self {
        match self {
            SpotField::Ticker => SpotField::Adjusted,
            SpotField::Date => SpotField::Ticker,
            SpotField::Adjusted => SpotField::Date,
        }
    }
}

pub struct SpotQuotesView {
    picker: TickerPicker,
    date: String,
    adjusted: bool,
    focus: SpotField,
    result: Option<String>,
    dispatcher: QueryDispatcher,
}

impl Default for SpotQuotesView {
    fn default() -> Self {
        Self::new()
    }
}

impl SpotQuotesView {
    pub fn new() -> Self {
        Self {
            picker: TickerPicker::default(),
            date: today(),
            adjusted: true,
            focus: SpotField::Ticker,
            result: None,
            dispatcher: QueryDispatcher::new(),
        }
    }

    pub fn picker(&self) -> &TickerPicker {
        &self.picker
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn adjusted(&self) -> bool {
        self.adjusted
    }

    pub fn focus(&self) -> SpotField {
        self.focus
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.dispatcher.is_busy()
    }

    pub fn handle_key(&mut self, code: KeyCode, ctx: &AppContext) {
        match code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Enter => self.submit(ctx),
            _ => match self.focus {
                SpotField::Ticker => self.picker.handle_key(code, ctx.directory()),
                SpotField::Date => edit_text(&mut self.date, code),
                SpotField::Adjusted => {
                    if matches!(code, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) {
                        self.adjusted = !self.adjusted;
                    }
                }
            },
        }
    }

    pub fn submit(&mut self, ctx: &AppContext) {
        let symbol = self.picker.value(ctx.directory());
        if symbol.is_empty() {
            self.result = Some(String::from("Choose a ticker first"));
            return;
        }

        let date = match parse_date(&self.date) {
            Ok(date) => date,
            Err(err) => {
                self.result = Some(format!("{:#}", err));
                return;
            }
        };

        let request = QuoteRequest::new(symbol, date, self.adjusted);
        let polygon = Arc::clone(ctx.polygon());
        let directory = Arc::clone(ctx.directory());

        self.result = Some(String::from("waiting for the query to complete..."));
        self.dispatcher
            .dispatch(async move { quote_text(polygon.as_ref(), &directory, &request).await });
    }

    pub fn poll(&mut self) {
        if let Some(text) = self.dispatcher.try_complete() {
            self.result = Some(text);
        }
    }
}
