use httpmock::{Method::GET, MockServer};

use marketaux::MarketauxClient;

const FIXTURE: &str = r#"{
  "meta": {"found": 2, "returned": 2, "limit": 20, "page": 1},
  "data": [
    {
      "uuid": "a1",
      "title": "Chipmaker faces recall over power units",
      "description": "Regulators opened a probe.",
      "url": "https://news.example.com/story/1?utm_source=feed",
      "source": "example.com",
      "published_at": "2026-08-30T09:15:00.000000Z",
      "entities": [
        {"symbol": "CHIP", "sentiment_score": -0.42},
        {"symbol": "PWR", "sentiment_score": -0.18}
      ]
    },
    {
      "uuid": "a2",
      "title": "Quiet session on the index",
      "snippet": "Little movement overall.",
      "url": "https://other.example.org/markets/today",
      "source": "example.org",
      "published_at": "2026-08-30T08:00:00.000000Z",
      "entities": []
    }
  ]
}"#;

#[tokio::test]
async fn latest_news_reshapes_articles() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/news/all")
            .query_param("api_token", "tok")
            .query_param("language", "en")
            .query_param("filter_entities", "true")
            .query_param("limit", "20")
            .query_param("symbols", "CHIP,PWR");
        then.status(200)
            .header("content-type", "application/json")
            .body(FIXTURE);
    });

    let client = MarketauxClient::new("tok")
        .unwrap()
        .with_base_url(&server.base_url());
    let symbols = vec!["CHIP".to_string(), "PWR".to_string()];
    let items = client.latest_news(&symbols, None, 20).await.unwrap();

    mock.assert();
    assert_eq!(items.len(), 2);

    let first = &items[0];
    assert_eq!(first.title, "Chipmaker faces recall over power units");
    assert_eq!(first.sentiment, Some(-0.42));
    assert_eq!(first.symbols, vec!["CHIP".to_string(), "PWR".to_string()]);
    assert_eq!(first.snippet, "Regulators opened a probe.");

    let second = &items[1];
    assert_eq!(second.sentiment, None);
    assert!(second.symbols.is_empty());
    assert_eq!(second.snippet, "Little movement overall.");
}

#[tokio::test]
async fn upstream_failure_keeps_status_and_body() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/v1/news/all");
        then.status(401)
            .header("content-type", "application/json")
            .body(r#"{"error":{"code":"invalid_api_token"}}"#);
    });

    let client = MarketauxClient::new("bad")
        .unwrap()
        .with_base_url(&server.base_url());
    let result = client.latest_news(&[], Some("earnings"), 5).await;

    match result {
        Err(common::WatchError::Upstream { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("invalid_api_token"));
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}
