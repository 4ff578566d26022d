use httpmock::{Method::POST, MockServer};

use common::Notifier;
use telegram::{TelegramClient, TelegramNotifier};

#[tokio::test]
async fn send_message_returns_the_parsed_reply() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST).path("/bottest-token/sendMessage");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"ok":true,"result":{"message_id":42}}"#);
    });

    let client = TelegramClient::new("test-token", "12345")
        .unwrap()
        .with_base_url(&server.base_url());
    let reply = client.send_message("hello", None).await.unwrap();

    mock.assert();
    assert_eq!(reply["ok"], true);
    assert_eq!(reply["result"]["message_id"], 42);
}

#[tokio::test]
async fn notifier_treats_ok_false_as_failure() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/bottest-token/sendMessage");
        then.status(400)
            .header("content-type", "application/json")
            .body(r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#);
    });

    let client = TelegramClient::new("test-token", "12345")
        .unwrap()
        .with_base_url(&server.base_url());
    let result = TelegramNotifier::new(client).send("subject", "body").await;

    assert!(result.is_err());
}

#[tokio::test]
async fn non_json_reply_maps_to_an_upstream_error() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/bottest-token/sendMessage");
        then.status(502).body("bad gateway");
    });

    let client = TelegramClient::new("test-token", "12345")
        .unwrap()
        .with_base_url(&server.base_url());
    let result = client.send_message("hello", None).await;

    match result {
        Err(common::WatchError::Upstream { status, .. }) => assert_eq!(status, 502),
        other => panic!("expected upstream error, got {other:?}"),
    }
}
