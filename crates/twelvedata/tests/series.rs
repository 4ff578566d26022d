use httpmock::{Method::GET, MockServer};

use twelvedata::TwelveDataClient;

const SERIES: &str = r#"{
  "meta": {"symbol": "AAPL", "interval": "1h", "currency": "USD"},
  "values": [
    {"datetime": "2026-08-30 15:00:00", "open": "104.2", "high": "105.4", "low": "104.0", "close": "105.0", "volume": "1200345"},
    {"datetime": "2026-08-30 14:00:00", "open": "100.1", "high": "100.9", "low": "99.8", "close": "100.0", "volume": "1100210"}
  ],
  "status": "ok"
}"#;

#[tokio::test]
async fn percent_change_compares_latest_and_previous_close() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/time_series")
            .query_param("symbol", "AAPL")
            .query_param("interval", "1h")
            .query_param("outputsize", "2")
            .query_param("apikey", "key");
        then.status(200)
            .header("content-type", "application/json")
            .body(SERIES);
    });

    let client = TwelveDataClient::new("key")
        .unwrap()
        .with_base_url(&server.base_url());
    let change = client.percent_change("AAPL", "1h").await.unwrap();

    mock.assert();
    assert!((change - 0.05).abs() < 1e-9, "got {change}");
}

#[tokio::test]
async fn api_level_error_body_maps_to_api_error() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/time_series");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"code": 401, "message": "apikey is invalid", "status": "error"}"#);
    });

    let client = TwelveDataClient::new("bad")
        .unwrap()
        .with_base_url(&server.base_url());
    let result = client.time_series("AAPL", "1h", 2).await;

    match result {
        Err(common::WatchError::Api(message)) => assert!(message.contains("apikey is invalid")),
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn a_single_bar_is_not_enough_for_a_change() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/time_series");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"values": [{"datetime": "2026-08-30 15:00:00", "open": "1", "high": "1", "low": "1", "close": "1"}], "status": "ok"}"#);
    });

    let client = TwelveDataClient::new("key")
        .unwrap()
        .with_base_url(&server.base_url());
    assert!(client.percent_change("AAPL", "1h").await.is_err());
}
