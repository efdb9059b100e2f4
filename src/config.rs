use std::path::PathBuf;

use anyhow::{Context, Result};
use derive_getters::Getters;

pub const DEFAULT_BASE_URL: &str = "https://api.polygon.io";
pub const DEFAULT_TICKERS_ROUTE: &str =
    "/v3/reference/tickers?market=crypto&active=true&sort=ticker&order=asc&limit=1000";
pub const DEFAULT_DAILY_ROUTE: &str = "/v1/open-close/{stocksTicker}/{date}?adjusted={adjusted}";
pub const DEFAULT_HISTORY_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
pub const DEFAULT_NEWS_URL: &str = "https://news.google.com/rss/search";
pub const DEFAULT_LOG_FILE: &str = "crypto-quotes.log";

#[derive(Clone, Debug, Getters)]
pub struct Config {
    api_key: String,
    base_url: String,
    tickers_route: String,
    daily_route: String,
    history_url: String,
    news_url: String,
    export_dir: PathBuf,
    log_file: PathBuf,
}

impl Config {
    /// Reads the configuration from the process environment. Call
    /// `dotenv::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let api_key = lookup("POLYGON_API_KEY")
            .filter(|value| !value.trim().is_empty())
            .with_context(|| "Missing POLYGON_API_KEY in environment")?;

        let export_dir = get_or("EXPORT_DIR", ".");
        let export_dir = PathBuf::from(shellexpand::tilde(&export_dir).into_owned());

        Ok(Self {
            api_key,
            base_url: get_or("POLYGON_BASE_URL", DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            tickers_route: get_or("POLYGON_TICKERS_ROUTE", DEFAULT_TICKERS_ROUTE),
            daily_route: get_or("POLYGON_DAILY_ROUTE", DEFAULT_DAILY_ROUTE),
            history_url: get_or("HISTORY_URL", DEFAULT_HISTORY_URL)
                .trim_end_matches('/')
                .to_string(),
            news_url: get_or("NEWS_URL", DEFAULT_NEWS_URL),
            export_dir,
            log_file: PathBuf::from(get_or("LOG_FILE", DEFAULT_LOG_FILE)),
        })
    }

    /// Same settings pointed at other hosts; used to aim the clients at a
    /// local server.
    pub fn with_endpoints(mut self, base_url: &str, history_url: &str, news_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self.history_url = history_url.trim_end_matches('/').to_string();
        self.news_url = news_url.to_string();
        self
    }
}
