use std::collections::HashSet;

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Eq, Getters, PartialEq, Serialize, new)]
pub struct TickerInfo {
    /// Provider code, e.g. `X:BTCUSD`.
    ticker: String,
    /// Display form, e.g. `BTC-USD`.
    symbol: String,
    base_currency_name: String,
    currency_name: String,
    currency_symbol: String,
}

/// Symbols loaded once at startup. Empty means the directory endpoint was
/// unreachable.
#[derive(Clone, Debug, Default)]
pub struct TickerDirectory {
    tickers: Vec<TickerInfo>,
}

impl TickerDirectory {
    pub fn new(tickers: Vec<TickerInfo>) -> Self {
        let mut seen = HashSet::new();
        let tickers = tickers
            .into_iter()
            .filter(|ticker| seen.insert(ticker.symbol().clone()))
            .collect();

        Self { tickers }
    }

    pub fn is_available(&self) -> bool {
        !self.tickers.is_empty()
    }

    pub fn tickers(&self) -> &[TickerInfo] {
        &self.tickers
    }

    /// Exact match first, then an ASCII case-insensitive one, so `btc-usd`
    /// finds `BTC-USD`.
    pub fn resolve(&self, symbol: &str) -> Option<&TickerInfo> {
        let symbol = symbol.trim();
        self.tickers
            .iter()
            .find(|ticker| ticker.symbol() == symbol)
            .or_else(|| {
                self.tickers
                    .iter()
                    .find(|ticker| ticker.symbol().eq_ignore_ascii_case(symbol))
            })
    }

    /// Directory spelling of `symbol`, or the trimmed input when unknown.
    pub fn canonical(&self, symbol: &str) -> String {
        self.resolve(symbol)
            .map(|info| info.symbol().clone())
            .unwrap_or_else(|| symbol.trim().to_string())
    }

    /// Case-insensitive substring match over display symbols; an empty input
    /// returns every symbol.
    pub fn filter(&self, input: &str) -> Vec<&str> {
        let needle = input.trim().to_ascii_lowercase();
        self.tickers
            .iter()
            .map(|ticker| ticker.symbol().as_str())
            .filter(|symbol| needle.is_empty() || symbol.to_ascii_lowercase().contains(&needle))
            .collect()
    }
}
