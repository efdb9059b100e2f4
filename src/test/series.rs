#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::Value;

    use crate::{
        error::SeriesError,
        models::{ExportFormat, HistoricalSeries, OhlcRow, SeriesTable},
    };

    fn ymd(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, d).unwrap()
    }

    fn series(symbol: &str, days: &[u32], base: f64) -> HistoricalSeries {
        let rows = days
            .iter()
            .map(|d| {
                let close = base + *d as f64;
                OhlcRow::new(ymd(*d), close - 1.0, close + 1.0, close - 2.0, close)
            })
            .collect();
        HistoricalSeries::new(symbol.to_string(), rows)
    }

    #[test]
    fn new_series_is_sorted_by_date() {
        let s = series("BTC-USD", &[5, 2, 9, 3], 100.0);

        let days: Vec<NaiveDate> = s.rows().iter().map(|r| *r.date()).collect();
        assert_eq!(days, vec![ymd(2), ymd(3), ymd(5), ymd(9)]);
    }

    #[test]
    fn concat_outer_joins_on_date() {
        let mut table = SeriesTable::new();
        table.concat(series("BTC-USD", &[2, 3, 4], 100.0)).unwrap();
        table.concat(series("ETH-USD", &[3, 4, 5], 10.0)).unwrap();

        assert_eq!(table.symbols(), ["BTC-USD", "ETH-USD"]);
        assert_eq!(table.len(), 4);

        assert_eq!(
            table.closes("BTC-USD"),
            vec![
                (ymd(2), Some(102.0)),
                (ymd(3), Some(103.0)),
                (ymd(4), Some(104.0)),
                (ymd(5), None),
            ]
        );
        assert_eq!(
            table.closes("ETH-USD"),
            vec![
                (ymd(2), None),
                (ymd(3), Some(13.0)),
                (ymd(4), Some(14.0)),
                (ymd(5), Some(15.0)),
            ]
        );

        for (_, cells) in table.rows() {
            assert_eq!(cells.len(), 2);
        }
    }

    #[test]
    fn concat_rejects_duplicate_symbol() {
        let mut table = SeriesTable::new();
        table.concat(series("BTC-USD", &[2, 3], 100.0)).unwrap();

        let result = table.concat(series("BTC-USD", &[4], 100.0));

        assert_eq!(
            result,
            Err(SeriesError::DuplicateSymbol(String::from("BTC-USD")))
        );
        assert_eq!(table.symbols().len(), 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn closes_of_unknown_symbol_is_empty() {
        let mut table = SeriesTable::new();
        table.concat(series("BTC-USD", &[2], 100.0)).unwrap();

        assert!(table.closes("DOGE-USD").is_empty());
    }

    #[test]
    fn file_name_joins_symbols() {
        let mut table = SeriesTable::new();
        table.concat(series("BTC-USD", &[2], 100.0)).unwrap();
        table.concat(series("ETH-USD", &[2], 10.0)).unwrap();

        assert_eq!(
            table.file_name(ExportFormat::Csv),
            "BTC-USD&ETH-USD_historical_data.csv"
        );
        assert_eq!(
            table.file_name(ExportFormat::Json),
            "BTC-USD&ETH-USD_historical_data.json"
        );
    }

    #[test]
    fn export_empty_table_fails() {
        let dir = tempfile::tempdir().unwrap();

        let err = SeriesTable::new()
            .export(ExportFormat::Csv, dir.path())
            .unwrap_err();

        assert_eq!(err.to_string(), "No data to export");
    }

    #[test]
    fn export_csv_leaves_gaps_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = SeriesTable::new();
        table.concat(series("BTC-USD", &[2, 3], 100.5)).unwrap();
        table.concat(series("ETH-USD", &[3], 10.5)).unwrap();

        let path = table.export(ExportFormat::Csv, dir.path()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(
            lines[0],
            "date,BTC-USD open,BTC-USD high,BTC-USD low,BTC-USD close,ETH-USD open,ETH-USD high,ETH-USD low,ETH-USD close"
        );
        assert_eq!(lines[1], "2023-01-02,101.5,103.5,100.5,102.5,,,,");
        assert_eq!(lines[2], "2023-01-03,102.5,104.5,101.5,103.5,12.5,14.5,11.5,13.5");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn export_json_marks_gaps_null() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = SeriesTable::new();
        table.concat(series("BTC-USD", &[2, 3], 100.0)).unwrap();
        table.concat(series("ETH-USD", &[3], 10.0)).unwrap();

        let path = table.export(ExportFormat::Json, dir.path()).unwrap();
        let document: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert!(document["2023-01-02"]["ETH-USD"].is_null());
        assert_eq!(document["2023-01-02"]["BTC-USD"]["close"], 102.0);
        assert_eq!(document["2023-01-03"]["ETH-USD"]["close"], 13.0);
    }

    #[test]
    fn export_html_writes_table_with_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = SeriesTable::new();
        table.concat(series("BTC-USD", &[2, 3], 100.5)).unwrap();
        table.concat(series("ETH-USD", &[3], 10.5)).unwrap();

        let path = table.export(ExportFormat::Html, dir.path()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        assert!(path.ends_with("BTC-USD&ETH-USD_historical_data.html"));
        assert!(content.starts_with("<table"));
        assert!(content.contains("<th>date</th><th>BTC-USD open</th>"));
        assert!(content.contains("<th>ETH-USD close</th></tr>"));
        assert!(content.contains(
            "<tr><td>2023-01-02</td><td>101.5</td><td>103.5</td><td>100.5</td><td>102.5</td><td></td><td></td><td></td><td></td></tr>"
        ));
        assert_eq!(content.matches("<tr>").count(), 3);
    }

    #[test]
    fn export_xlsx_writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = SeriesTable::new();
        table.concat(series("BTC-USD", &[2, 3], 100.0)).unwrap();
        table.concat(series("ETH-USD", &[3], 10.0)).unwrap();

        let path = table.export(ExportFormat::Xlsx, dir.path()).unwrap();
        let bytes = std::fs::read(&path).unwrap();

        assert!(path.ends_with("BTC-USD&ETH-USD_historical_data.xlsx"));
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn concat_duplicate_check_ignores_case() {
        let mut table = SeriesTable::new();
        table.concat(series("BTC-USD", &[2], 100.0)).unwrap();

        assert!(table.contains("btc-usd"));
        assert_eq!(
            table.concat(series("btc-usd", &[2], 100.0)),
            Err(SeriesError::DuplicateSymbol(String::from("btc-usd")))
        );
    }
}
