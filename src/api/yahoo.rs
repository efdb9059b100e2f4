use anyhow::{Context, Result};
use chrono::{DateTime, Days, NaiveDate, NaiveTime};
use log::warn;
use reqwest::Client;

use super::{
    provider::HistoryProvider,
    utils::{make_request, parse_response_object},
    yahoo_dto::{ChartResponseDto, ChartResultDto},
};
use crate::{
    config::Config,
    error::QueryError,
    models::{HistoricalSeries, OhlcRow},
};

// The chart endpoint rejects requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

#[derive(Clone, Debug)]
pub struct YahooApi {
    client: Client,
    base_url: String,
}

impl YahooApi {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .with_context(|| "Failed to build history client")?;

        Ok(Self {
            client,
            base_url: config.history_url().clone(),
        })
    }

    pub fn chart_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let period2 = end
            .checked_add_days(Days::new(1))
            .unwrap_or(end)
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();

        format!(
            "{}/{}?period1={}&period2={}&interval=1d",
            self.base_url, symbol, period1, period2
        )
    }
}

impl HistoryProvider for YahooApi {
    async fn get_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HistoricalSeries, QueryError> {
        let url = self.chart_url(symbol, start, end);
        let res = make_request(&self.client, &url, None).await?;
        let chart = parse_response_object::<ChartResponseDto>(res)?;

        parse_chart(symbol, chart)
    }
}

pub fn parse_chart(symbol: &str, response: ChartResponseDto) -> Result<HistoricalSeries, QueryError> {
    let chart = response.chart();

    if let Some(error) = chart.error() {
        if error.code() == "Not Found" {
            return Err(QueryError::NoData(symbol.to_string()));
        }
        return Err(QueryError::Upstream(format!(
            "{}: {}",
            error.code(),
            error.description()
        )));
    }

    let Some(result) = chart.result().as_ref().and_then(|results| results.first()) else {
        return Err(QueryError::NoData(symbol.to_string()));
    };

    let rows = collect_rows(symbol, result);
    if rows.is_empty() {
        return Err(QueryError::NoData(symbol.to_string()));
    }

    Ok(HistoricalSeries::new(symbol.to_string(), rows))
}

fn collect_rows(symbol: &str, result: &ChartResultDto) -> Vec<OhlcRow> {
    let Some(quote) = result.indicators().quote().first() else {
        return Vec::new();
    };

    let mut rows = Vec::with_capacity(result.timestamp().len());
    let mut skipped = 0;

    for (i, ts) in result.timestamp().iter().enumerate() {
        let cell = |values: &Vec<Option<f64>>| values.get(i).copied().flatten();
        let date = DateTime::from_timestamp(*ts, 0).map(|dt| dt.date_naive());

        match (
            date,
            cell(quote.open()),
            cell(quote.high()),
            cell(quote.low()),
            cell(quote.close()),
        ) {
            (Some(date), Some(open), Some(high), Some(low), Some(close)) => {
                rows.push(OhlcRow::new(date, open, high, low, close))
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("[{}] skipped {} incomplete rows", symbol, skipped);
    }

    rows
}
