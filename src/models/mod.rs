pub mod news;
pub mod quote;
pub mod series;
pub mod ticker;

pub use news::NewsItem;
pub use quote::{QuoteRequest, QuoteResult};
pub use series::{ExportFormat, HistoricalSeries, OhlcRow, SeriesTable};
pub use ticker::{TickerDirectory, TickerInfo};
