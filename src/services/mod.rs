pub mod query_service;

pub use query_service::{news_text, quote_text, read_table, series_text};
