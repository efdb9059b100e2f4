#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use crate::{
        api::{
            PolygonApi, QuoteProvider,
            polygon::parse_daily_close,
            polygon_dto::{PolygonTickerDto, transform_ticker},
        },
        error::QueryError,
        test::stub::{closed_url, serve_once, test_config},
    };

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 5).unwrap()
    }

    #[test]
    fn transform_ticker_strips_prefix() {
        assert_eq!(transform_ticker("X:BTCUSD").as_deref(), Some("BTC-USD"));
        assert_eq!(transform_ticker("X:SHIBEUR").as_deref(), Some("SHIB-EUR"));
        assert_eq!(transform_ticker("X:1INCHUSD").as_deref(), Some("1INCH-USD"));
    }

    #[test]
    fn transform_ticker_keeps_case() {
        assert_eq!(transform_ticker("X:btcUsd").as_deref(), Some("btc-Usd"));
    }

    #[test]
    fn transform_ticker_rejects_malformed() {
        assert_eq!(transform_ticker("BTCUSD"), None);
        assert_eq!(transform_ticker("X:USD"), None);
        assert_eq!(transform_ticker("X:"), None);
    }

    #[test]
    fn transform_ticker_is_injective() {
        let bases = ["BTC", "ETH", "B", "BTCU", "A-B", "USDT"];
        let quotes = ["USD", "EUR", "SDU", "BTC"];

        let mut seen = HashSet::new();
        for base in bases {
            for quote in quotes {
                let raw = format!("X:{}{}", base, quote);
                let transformed = transform_ticker(&raw).unwrap();
                assert_eq!(transformed, format!("{}-{}", base, quote));
                assert!(seen.insert(transformed), "collision for {}", raw);
            }
        }

        assert_eq!(seen.len(), bases.len() * quotes.len());
    }

    #[test]
    fn ticker_dto_converts_to_ticker_info() {
        let dto = PolygonTickerDto::new(
            String::from("X:ETHUSD"),
            String::from("Ethereum"),
            String::from("United States dollar"),
            String::from("USD"),
        );
        let info = dto.to_ticker_info().unwrap();

        assert_eq!(info.ticker(), "X:ETHUSD");
        assert_eq!(info.symbol(), "ETH-USD");
        assert_eq!(info.base_currency_name(), "Ethereum");
    }

    #[test]
    fn parse_daily_close_returns_close() {
        let result = parse_daily_close(json!({"status": "OK", "close": 123.45}), date());

        assert_eq!(result.unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_daily_close_ignores_unused_fields() {
        let result = parse_daily_close(
            json!({
                "status": "OK",
                "symbol": ["X:BTCUSD"],
                "from": 20230105,
                "open": "n/a",
                "high": null,
                "low": {"value": 1},
                "close": 16625.08
            }),
            date(),
        );

        assert_eq!(result.unwrap(), dec!(16625.08));
    }

    #[test]
    fn parse_daily_close_missing_close_is_no_data() {
        let result = parse_daily_close(
            json!({"status": "NOT_FOUND", "message": "Data not found."}),
            date(),
        );

        match result {
            Err(QueryError::NoData(key)) => assert_eq!(key, "2023-01-05"),
            other => panic!("expected NoData, got {:?}", other),
        }
    }

    #[test]
    fn parse_daily_close_error_envelope_is_upstream() {
        let result = parse_daily_close(json!({"status": "ERROR", "error": "not found"}), date());

        match result {
            Err(QueryError::Upstream(message)) => assert_eq!(message, "not found"),
            other => panic!("expected Upstream, got {:?}", other),
        }
    }

    #[test]
    fn daily_url_fills_route_template() {
        let api = PolygonApi::new(&test_config("https://api.example.com/"));

        assert_eq!(
            api.daily_url("X:BTCUSD", date(), true),
            "https://api.example.com/v1/open-close/X:BTCUSD/2023-01-05?adjusted=true"
        );
        assert!(api.daily_url("X:BTCUSD", date(), false).ends_with("adjusted=false"));
    }

    #[tokio::test]
    async fn load_tickers_returns_empty_on_network_failure() {
        let api = PolygonApi::new(&test_config(&closed_url().await));

        assert!(api.load_tickers().await.is_empty());
    }

    #[tokio::test]
    async fn load_tickers_returns_empty_on_error_envelope() {
        let (url, _request) = serve_once(
            "401 Unauthorized",
            r#"{"status":"ERROR","error":"Unknown API Key"}"#,
        )
        .await;
        let api = PolygonApi::new(&test_config(&url));

        assert!(api.load_tickers().await.is_empty());
    }

    #[tokio::test]
    async fn load_tickers_parses_results_with_bearer_auth() {
        let body = json!({
            "results": [
                {"ticker": "X:BTCUSD", "base_currency_name": "Bitcoin", "currency_name": "United States dollar", "currency_symbol": "USD"},
                {"ticker": "X:ETHEUR", "base_currency_name": "Ethereum", "currency_name": "Euro", "currency_symbol": "EUR"},
                {"ticker": "BROKEN"}
            ],
            "status": "OK"
        })
        .to_string();
        let (url, request) = serve_once("200 OK", &body).await;
        let api = PolygonApi::new(&test_config(&url));

        let tickers = api.load_tickers().await;
        let request = request.await.unwrap();

        let symbols: Vec<&str> = tickers.iter().map(|t| t.symbol().as_str()).collect();
        assert_eq!(symbols, vec!["BTC-USD", "ETH-EUR"]);
        assert!(request.starts_with(
            "GET /v3/reference/tickers?market=crypto&active=true&sort=ticker&order=asc&limit=1000 "
        ));
        assert!(request.to_lowercase().contains("authorization: bearer test-key"));
    }

    #[tokio::test]
    async fn get_daily_close_over_http() {
        let (url, request) = serve_once("200 OK", r#"{"status":"OK","symbol":"X:BTCUSD","close":16625.08}"#).await;
        let api = PolygonApi::new(&test_config(&url));

        let close = api.get_daily_close("X:BTCUSD", date(), false).await.unwrap();
        let request = request.await.unwrap();

        assert_eq!(close, dec!(16625.08));
        assert!(request.starts_with("GET /v1/open-close/X:BTCUSD/2023-01-05?adjusted=false "));
    }

    #[tokio::test]
    async fn get_daily_close_not_found_status_is_no_data() {
        let (url, _request) = serve_once(
            "404 Not Found",
            r#"{"status":"NOT_FOUND","message":"Data not found."}"#,
        )
        .await;
        let api = PolygonApi::new(&test_config(&url));

        let result = api.get_daily_close("X:BTCUSD", date(), true).await;

        assert!(matches!(result, Err(QueryError::NoData(key)) if key == "2023-01-05"));
    }

    #[tokio::test]
    async fn get_daily_close_network_failure_is_connectivity() {
        let api = PolygonApi::new(&test_config(&closed_url().await));

        let result = api.get_daily_close("X:BTCUSD", date(), true).await;

        assert!(matches!(result, Err(QueryError::Connectivity(_))));
    }

    #[tokio::test]
    async fn get_daily_close_non_json_error_page_is_upstream() {
        let (url, _request) = serve_once("502 Bad Gateway", "<html>bad gateway</html>").await;
        let api = PolygonApi::new(&test_config(&url));

        let result = api.get_daily_close("X:BTCUSD", date(), true).await;

        match result {
            Err(QueryError::Upstream(message)) => assert_eq!(message, "Request failed: 502 Bad Gateway"),
            other => panic!("expected Upstream, got {:?}", other),
        }
    }
}
