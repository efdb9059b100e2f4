use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::{
    api::{NewsApi, PolygonApi, YahooApi},
    config::Config,
    models::{SeriesTable, TickerDirectory},
};

/// Everything the screens share: configuration, API clients, the ticker
/// directory loaded at startup and the series accumulated on the chart.
pub struct AppContext {
    config: Config,
    polygon: Arc<PolygonApi>,
    yahoo: Arc<YahooApi>,
    news: Arc<NewsApi>,
    directory: Arc<TickerDirectory>,
    series: Arc<RwLock<SeriesTable>>,
}

impl AppContext {
    pub async fn init(config: Config) -> Result<Self> {
        info!("Starting with market data from {}", config.base_url());

        let polygon = PolygonApi::new(&config);
        let yahoo = YahooApi::new(&config)?;
        let news = NewsApi::new(&config).with_context(|| "Failed to build news parser")?;

        let directory = TickerDirectory::new(polygon.load_tickers().await);
        if !directory.is_available() {
            warn!("Ticker directory unavailable; symbol search disabled");
        }

        Ok(Self::from_parts(config, polygon, yahoo, news, directory))
    }

    pub fn from_parts(
        config: Config,
        polygon: PolygonApi,
        yahoo: YahooApi,
        news: NewsApi,
        directory: TickerDirectory,
    ) -> Self {
        Self {
            config,
            polygon: Arc::new(polygon),
            yahoo: Arc::new(yahoo),
            news: Arc::new(news),
            directory: Arc::new(directory),
            series: Arc::new(RwLock::new(SeriesTable::new())),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn polygon(&self) -> &Arc<PolygonApi> {
        &self.polygon
    }

    pub fn yahoo(&self) -> &Arc<YahooApi> {
        &self.yahoo
    }

    pub fn news(&self) -> &Arc<NewsApi> {
        &self.news
    }

    pub fn directory(&self) -> &Arc<TickerDirectory> {
        &self.directory
    }

    pub fn series(&self) -> &Arc<RwLock<SeriesTable>> {
        &self.series
    }

    /// Swaps in an empty table. Workers still holding the old one write into
    /// it harmlessly.
    pub fn reset_series(&mut self) {
        self.series = Arc::new(RwLock::new(SeriesTable::new()));
    }

    pub fn shutdown(self) {
        info!("Shutting down");
    }
}
