use std::future::Future;

use chrono::NaiveDate;

use crate::{
    error::QueryError,
    models::{HistoricalSeries, NewsItem, QuoteResult},
};

pub trait QuoteProvider: Send + Sync {
    /// Closing price of `ticker` on `date`, optionally adjusted for splits.
    fn get_daily_close(
        &self,
        ticker: &str,
        date: NaiveDate,
        adjusted: bool,
    ) -> impl Future<Output = QuoteResult> + Send;
}

pub trait HistoryProvider: Send + Sync {
    /// Daily OHLC rows for `symbol` between `start` and `end`, both inclusive.
    fn get_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = Result<HistoricalSeries, QueryError>> + Send;
}

pub trait NewsProvider: Send + Sync {
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<NewsItem>, QueryError>> + Send;
}
