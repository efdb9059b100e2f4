use derive_getters::Getters;
use serde::Deserialize;

#[derive(Debug, Deserialize, Getters)]
pub struct ChartResponseDto {
    chart: ChartDto,
}

#[derive(Debug, Deserialize, Getters)]
pub struct ChartDto {
    result: Option<Vec<ChartResultDto>>,
    error: Option<ChartErrorDto>,
}

#[derive(Debug, Deserialize, Getters)]
pub struct ChartResultDto {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: IndicatorsDto,
}

#[derive(Debug, Deserialize, Getters)]
pub struct IndicatorsDto {
    #[serde(default)]
    quote: Vec<QuoteIndicatorDto>,
}

#[derive(Debug, Deserialize, Getters)]
pub struct QuoteIndicatorDto {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize, Getters)]
pub struct ChartErrorDto {
    code: String,
    #[serde(default)]
    description: String,
}
