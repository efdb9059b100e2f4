use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

use crate::error::QueryError;

#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct QuoteRequest {
    symbol: String,
    date: NaiveDate,
    adjusted: bool,
}

/// A closing price or the reason there is none.
pub type QuoteResult = Result<Decimal, QueryError>;
