//! Turns fetcher results into the text the UI shows. Every error ends here as
//! a message, so the screens have a single "show result" path.
use std::sync::RwLock;

use chrono::NaiveDate;
use log::warn;

use crate::{
    api::{HistoryProvider, NewsProvider, QuoteProvider},
    error::SeriesError,
    models::{QuoteRequest, SeriesTable, TickerDirectory},
};

pub async fn quote_text<P>(provider: &P, directory: &TickerDirectory, request: &QuoteRequest) -> String
where
    P: QuoteProvider,
{
    let symbol = request.symbol();
    let ticker = directory
        .resolve(symbol)
        .map(|info| info.ticker().as_str())
        .unwrap_or(symbol.as_str());

    match provider
        .get_daily_close(ticker, *request.date(), *request.adjusted())
        .await
    {
        Ok(close) => format!("Closing price for {}: {}", symbol.to_ascii_uppercase(), close),
        Err(err) => {
            warn!("Quote query for {} on {} failed: {}", symbol, request.date(), err);
            err.to_string()
        }
    }
}

pub async fn series_text<H>(
    provider: &H,
    table: &RwLock<SeriesTable>,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> String
where
    H: HistoryProvider,
{
    if start > end {
        return String::from("Start date must not be after end date");
    }

    if read_table(table).contains(symbol) {
        return SeriesError::DuplicateSymbol(symbol.to_string()).to_string();
    }

    let series = match provider.get_series(symbol, start, end).await {
        Ok(series) => series,
        Err(err) => {
            warn!("History query for {} failed: {}", symbol, err);
            return err.to_string();
        }
    };

    let rows = series.len();
    let mut guard = table.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    match guard.concat(series) {
        Ok(()) => format!("Added {} ({} rows)", symbol, rows),
        Err(err) => err.to_string(),
    }
}

pub async fn news_text<N>(provider: &N, topic: &str) -> String
where
    N: NewsProvider,
{
    match provider.search(topic).await {
        Ok(items) => items
            .iter()
            .map(|item| {
                let mut entry = format!("{} | {}", item.published(), item.title());
                if !item.description().is_empty() {
                    entry.push_str(&format!("\n  {}", item.description()));
                }
                entry.push_str(&format!("\n  {}\n  {}", item.source(), item.link()));
                entry
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
        Err(err) => {
            warn!("News query for {} failed: {}", topic, err);
            err.to_string()
        }
    }
}

pub fn read_table(table: &RwLock<SeriesTable>) -> std::sync::RwLockReadGuard<'_, SeriesTable> {
    table.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}
