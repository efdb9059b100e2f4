pub mod historical;
pub mod news;
pub mod picker;
pub mod spot;

pub use historical::{HistoricalView, HistoryField};
pub use news::{NEWS_TOPICS, NewsView};
pub use picker::TickerPicker;
pub use spot::{SpotField, SpotQuotesView};
