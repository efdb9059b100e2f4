pub mod news;
pub mod polygon;
pub mod polygon_dto;
pub mod provider;
pub mod utils;
pub mod yahoo;
pub mod yahoo_dto;

pub use news::NewsApi;
pub use polygon::PolygonApi;
pub use provider::{HistoryProvider, NewsProvider, QuoteProvider};
pub use yahoo::YahooApi;
