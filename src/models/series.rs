use std::{
    collections::BTreeMap,
    fs::{self, File},
    path::{Path, PathBuf},
};

use anyhow::{Context, Error, Result};
use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_xlsxwriter::Workbook;
use serde::Serialize;
use strum_macros::{Display, EnumIter};

use crate::error::SeriesError;

#[derive(Clone, Debug, Getters, PartialEq, Serialize, new)]
pub struct OhlcRow {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

#[derive(Clone, Debug, Getters, PartialEq)]
pub struct HistoricalSeries {
    symbol: String,
    rows: Vec<OhlcRow>,
}

impl HistoricalSeries {
    /// Rows are stored in ascending date order regardless of input order.
    pub fn new(symbol: String, mut rows: Vec<OhlcRow>) -> Self {
        rows.sort_by(|a, b| a.date().cmp(b.date()));
        Self { symbol, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default, Display, EnumIter, Eq, PartialEq)]
pub enum ExportFormat {
    #[default]
    #[strum(serialize = "csv")]
    Csv,
    #[strum(serialize = "xlsx")]
    Xlsx,
    #[strum(serialize = "json")]
    Json,
    #[strum(serialize = "html")]
    Html,
}

/// Several series side by side, outer-joined on date. A symbol without a row
/// on a given date holds `None` in that cell.
#[derive(Clone, Debug, Default)]
pub struct SeriesTable {
    symbols: Vec<String>,
    rows: BTreeMap<NaiveDate, Vec<Option<OhlcRow>>>,
}

impl SeriesTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Symbols are compared ignoring ASCII case.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s.eq_ignore_ascii_case(symbol))
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn concat(&mut self, series: HistoricalSeries) -> Result<(), SeriesError> {
        if self.contains(series.symbol()) {
            return Err(SeriesError::DuplicateSymbol(series.symbol().clone()));
        }

        let width = self.symbols.len();
        for cells in self.rows.values_mut() {
            cells.push(None);
        }

        let HistoricalSeries { symbol, rows } = series;
        for row in rows {
            let cells = self
                .rows
                .entry(*row.date())
                .or_insert_with(|| vec![None; width + 1]);
            cells[width] = Some(row);
        }

        self.symbols.push(symbol);
        Ok(())
    }

    pub fn rows(&self) -> impl Iterator<Item = (&NaiveDate, &[Option<OhlcRow>])> {
        self.rows.iter().map(|(date, cells)| (date, cells.as_slice()))
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.rows.keys()
    }

    pub fn closes(&self, symbol: &str) -> Vec<(NaiveDate, Option<f64>)> {
        let Some(idx) = self.symbols.iter().position(|s| s == symbol) else {
            return Vec::new();
        };

        self.rows
            .iter()
            .map(|(date, cells)| (*date, cells[idx].as_ref().map(|row| *row.close())))
            .collect()
    }

    pub fn file_name(&self, format: ExportFormat) -> String {
        format!("{}_historical_data.{}", self.symbols.join("&"), format)
    }

    pub fn export(&self, format: ExportFormat, dir: &Path) -> Result<PathBuf> {
        if self.is_empty() {
            return Err(Error::msg("No data to export"));
        }

        let path = dir.join(self.file_name(format));
        match format {
            ExportFormat::Csv => self.write_csv(&path)?,
            ExportFormat::Xlsx => self.write_xlsx(&path)?,
            ExportFormat::Json => self.write_json(&path)?,
            ExportFormat::Html => self.write_html(&path)?,
        }

        Ok(path)
    }

    fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create CSV file at path: {}", path.display()))?;

        writer.write_record(self.header())?;
        for (date, cells) in self.rows() {
            writer.write_record(text_record(date, cells))?;
        }

        writer.flush()?;
        Ok(())
    }

    fn write_xlsx(&self, path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();

        for (col, title) in self.header().iter().enumerate() {
            sheet.write_string(0, col as u16, title)?;
        }

        for (i, (date, cells)) in self.rows().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, date.format("%Y-%m-%d").to_string())?;
            for (j, cell) in cells.iter().enumerate() {
                let Some(ohlc) = cell else { continue };
                let first = 1 + j as u16 * 4;
                sheet.write_number(row, first, *ohlc.open())?;
                sheet.write_number(row, first + 1, *ohlc.high())?;
                sheet.write_number(row, first + 2, *ohlc.low())?;
                sheet.write_number(row, first + 3, *ohlc.close())?;
            }
        }

        workbook
            .save(path)
            .with_context(|| format!("Failed to create XLSX file at path: {}", path.display()))?;
        Ok(())
    }

    fn write_html(&self, path: &Path) -> Result<()> {
        let mut html = String::from("<table border=\"1\">\n  <thead>\n    <tr>");
        for title in self.header() {
            html.push_str(&format!("<th>{}</th>", escape_html(&title)));
        }
        html.push_str("</tr>\n  </thead>\n  <tbody>\n");

        for (date, cells) in self.rows() {
            html.push_str("    <tr>");
            for value in text_record(date, cells) {
                html.push_str(&format!("<td>{}</td>", escape_html(&value)));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("  </tbody>\n</table>\n");

        fs::write(path, html)
            .with_context(|| format!("Failed to create HTML file at path: {}", path.display()))?;
        Ok(())
    }

    /// `date` followed by `{symbol} open|high|low|close` for every symbol.
    fn header(&self) -> Vec<String> {
        let mut header = vec![String::from("date")];
        for symbol in &self.symbols {
            for field in ["open", "high", "low", "close"] {
                header.push(format!("{} {}", symbol, field));
            }
        }
        header
    }

    fn write_json(&self, path: &Path) -> Result<()> {
        let document: BTreeMap<String, BTreeMap<&str, Option<&OhlcRow>>> = self
            .rows()
            .map(|(date, cells)| {
                let by_symbol = self
                    .symbols
                    .iter()
                    .map(String::as_str)
                    .zip(cells.iter().map(Option::as_ref))
                    .collect();
                (date.format("%Y-%m-%d").to_string(), by_symbol)
            })
            .collect();

        let file = File::create(path)
            .with_context(|| format!("Failed to create JSON file at path: {}", path.display()))?;
        serde_json::to_writer_pretty(file, &document)?;
        Ok(())
    }
}

/// One table row as text; a gap becomes four empty cells.
fn text_record(date: &NaiveDate, cells: &[Option<OhlcRow>]) -> Vec<String> {
    let mut record = vec![date.format("%Y-%m-%d").to_string()];
    for cell in cells {
        match cell {
            Some(row) => {
                record.push(row.open().to_string());
                record.push(row.high().to_string());
                record.push(row.low().to_string());
                record.push(row.close().to_string());
            }
            None => record.extend(std::iter::repeat_n(String::new(), 4)),
        }
    }
    record
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
