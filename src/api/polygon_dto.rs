use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::TickerInfo;

#[derive(Debug, Deserialize, Getters, new)]
pub struct PolygonTickerDto {
    ticker: String,
    #[serde(default)]
    base_currency_name: String,
    #[serde(default)]
    currency_name: String,
    #[serde(default)]
    currency_symbol: String,
}

impl PolygonTickerDto {
    pub fn to_ticker_info(&self) -> Option<TickerInfo> {
        let symbol = transform_ticker(&self.ticker)?;
        Some(TickerInfo::new(
            self.ticker.clone(),
            symbol,
            self.base_currency_name.clone(),
            self.currency_name.clone(),
            self.currency_symbol.clone(),
        ))
    }
}

/// Only the fields the close lookup reads; the rest of the body is ignored.
#[derive(Debug, Deserialize, Getters, new)]
pub struct PolygonDailyDto {
    status: Option<String>,
    close: Option<Decimal>,
    error: Option<String>,
    message: Option<String>,
}

/// `X:BTCUSD` -> `BTC-USD`. The quote currency is the last three characters
/// after the prefix. Returns `None` when there is no prefix or no base left.
pub fn transform_ticker(raw: &str) -> Option<String> {
    let (_, pair) = raw.split_once(':')?;
    if pair.contains(':') || pair.len() <= 3 || !pair.is_char_boundary(pair.len() - 3) {
        return None;
    }

    let (base, quote) = pair.split_at(pair.len() - 3);
    Some(format!("{}-{}", base, quote))
}
