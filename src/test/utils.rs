#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crossterm::event::KeyCode;

    use crate::{
        app::{
            screen::{Nav, Screen},
            utils::{edit_text, next_index, parse_date, prev_index},
            views::TickerPicker,
        },
        models::{TickerDirectory, TickerInfo},
    };

    fn info(ticker: &str, symbol: &str) -> TickerInfo {
        TickerInfo::new(
            ticker.to_string(),
            symbol.to_string(),
            String::new(),
            String::new(),
            String::new(),
        )
    }

    fn directory() -> TickerDirectory {
        TickerDirectory::new(vec![
            info("X:BTCUSD", "BTC-USD"),
            info("X:BTCEUR", "BTC-EUR"),
            info("X:ETHUSD", "ETH-USD"),
            info("X:BTCUSD", "BTC-USD"),
        ])
    }

    #[test]
    fn parse_date_accepts_iso() {
        assert_eq!(
            parse_date(" 2023-01-05 ").unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 5).unwrap()
        );
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        let err = parse_date("01/05/23").unwrap_err();

        assert!(err.to_string().contains("01/05/23"));
    }

    #[test]
    fn indices_wrap_around() {
        assert_eq!(next_index(None, 3), Some(0));
        assert_eq!(next_index(Some(2), 3), Some(0));
        assert_eq!(prev_index(Some(0), 3), Some(2));
        assert_eq!(prev_index(None, 3), Some(2));
        assert_eq!(next_index(Some(1), 0), None);
    }

    #[test]
    fn edit_text_handles_backspace() {
        let mut field = String::from("2023");
        edit_text(&mut field, KeyCode::Char('-'));
        edit_text(&mut field, KeyCode::Backspace);
        edit_text(&mut field, KeyCode::Backspace);

        assert_eq!(field, "202");
    }

    #[test]
    fn screen_transitions() {
        assert_eq!(
            Screen::Home.transition(Nav::Open(Screen::CryptoNews)),
            Screen::CryptoNews
        );
        assert_eq!(
            Screen::SpotQuotes.transition(Nav::Open(Screen::CryptoNews)),
            Screen::SpotQuotes
        );
        assert_eq!(Screen::HistoricalQuotes.transition(Nav::Back), Screen::Home);
        assert_eq!(
            Screen::HistoricalQuotes.transition(Nav::Refresh),
            Screen::HistoricalQuotes
        );
        assert_eq!(Screen::Home.transition(Nav::Back), Screen::Home);
    }

    #[test]
    fn directory_drops_duplicate_symbols() {
        let directory = directory();

        assert_eq!(directory.tickers().len(), 3);
        assert_eq!(directory.resolve("ETH-USD").unwrap().ticker(), "X:ETHUSD");
        assert!(directory.resolve("DOGE-USD").is_none());
    }

    #[test]
    fn resolve_falls_back_to_case_insensitive_match() {
        let directory = directory();

        assert_eq!(directory.resolve("eth-usd").unwrap().ticker(), "X:ETHUSD");
        assert_eq!(directory.resolve(" Btc-Eur ").unwrap().symbol(), "BTC-EUR");
        assert_eq!(directory.canonical("btc-usd"), "BTC-USD");
        assert_eq!(directory.canonical(" doge-usd "), "doge-usd");
    }

    #[test]
    fn directory_filter_is_case_insensitive() {
        let directory = directory();

        assert_eq!(directory.filter("btc"), vec!["BTC-USD", "BTC-EUR"]);
        assert_eq!(directory.filter("-usd"), vec!["BTC-USD", "ETH-USD"]);
        assert_eq!(directory.filter("").len(), 3);
        assert!(TickerDirectory::default().filter("btc").is_empty());
    }

    #[test]
    fn picker_prefers_selected_suggestion() {
        let directory = directory();
        let mut picker = TickerPicker::default();

        for c in "eur".chars() {
            picker.handle_key(KeyCode::Char(c), &directory);
        }
        assert_eq!(picker.value(&directory), "eur");

        picker.handle_key(KeyCode::Down, &directory);
        assert_eq!(picker.value(&directory), "BTC-EUR");

        picker.handle_key(KeyCode::Backspace, &directory);
        assert_eq!(picker.selected(), None);
        assert_eq!(picker.value(&directory), "eu");
    }

    #[test]
    fn picker_uses_typed_text_without_directory() {
        let picker = TickerPicker::with_input(" X:BTCUSD ");

        assert_eq!(picker.value(&TickerDirectory::default()), "X:BTCUSD");
    }
}
