use chrono::NaiveDate;
use log::{info, warn};
use reqwest::Client;
use serde_json::Value;

use super::{
    polygon_dto::{PolygonDailyDto, PolygonTickerDto},
    provider::QuoteProvider,
    utils::{make_request, parse_response_array, parse_response_object},
};
use crate::{
    config::Config,
    error::QueryError,
    models::{QuoteResult, TickerInfo},
};

#[derive(Clone, Debug)]
pub struct PolygonApi {
    client: Client,
    base_url: String,
    tickers_route: String,
    daily_route: String,
    api_key: String,
}

impl PolygonApi {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url().clone(),
            tickers_route: config.tickers_route().clone(),
            daily_route: config.daily_route().clone(),
            api_key: config.api_key().clone(),
        }
    }

    /// Fetches the crypto symbol directory. Any failure yields an empty list.
    pub async fn load_tickers(&self) -> Vec<TickerInfo> {
        match self.fetch_tickers().await {
            Ok(tickers) => {
                info!("Loaded {} tickers", tickers.len());
                tickers
            }
            Err(err) => {
                warn!("Failed to load ticker directory: {}", err);
                Vec::new()
            }
        }
    }

    async fn fetch_tickers(&self) -> Result<Vec<TickerInfo>, QueryError> {
        let url = format!("{}{}", self.base_url, self.tickers_route);
        let res = make_request(&self.client, &url, Some(&self.api_key)).await?;

        let results = res
            .get("results")
            .ok_or(QueryError::DirectoryUnavailable)?;

        let dtos = parse_response_array::<PolygonTickerDto>(results.clone(), "ticker directory")?;

        Ok(dtos
            .iter()
            .filter_map(PolygonTickerDto::to_ticker_info)
            .collect())
    }

    pub fn daily_url(&self, ticker: &str, date: NaiveDate, adjusted: bool) -> String {
        let route = self
            .daily_route
            .replace("{stocksTicker}", ticker)
            .replace("{date}", &date.format("%Y-%m-%d").to_string())
            .replace("{adjusted}", if adjusted { "true" } else { "false" });

        format!("{}{}", self.base_url, route)
    }
}

impl QuoteProvider for PolygonApi {
    async fn get_daily_close(&self, ticker: &str, date: NaiveDate, adjusted: bool) -> QuoteResult {
        let url = self.daily_url(ticker, date, adjusted);
        let res = make_request(&self.client, &url, Some(&self.api_key)).await?;

        parse_daily_close(res, date)
    }
}

pub fn parse_daily_close(data: Value, date: NaiveDate) -> QuoteResult {
    let dto = parse_response_object::<PolygonDailyDto>(data)?;

    if dto.status().as_deref() == Some("ERROR") {
        let message = dto
            .error()
            .clone()
            .or_else(|| dto.message().clone())
            .unwrap_or_else(|| String::from("Unknown provider error"));
        return Err(QueryError::Upstream(message));
    }

    (*dto.close())
        .ok_or_else(|| QueryError::NoData(date.format("%Y-%m-%d").to_string()))
}
