use httpmock::{Method::POST, MockServer};

use mailer::{BrevoMailer, ResendMailer, WebhookMailer};

#[tokio::test]
async fn brevo_posts_with_api_key_header() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v3/smtp/email")
            .header("api-key", "brevo-key")
            .json_body_partial(
                r#"{
                    "sender": {"email": "alerts@example.com"},
                    "to": [{"email": "ops@example.com"}],
                    "subject": "test subject"
                }"#,
            );
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"messageId":"<1@example.com>"}"#);
    });

    let mailer = BrevoMailer::new("brevo-key", "alerts@example.com", "ops@example.com")
        .unwrap()
        .with_base_url(&server.base_url());
    mailer.send("test subject", "plain body", "").await.unwrap();

    mock.assert();
}

#[tokio::test]
async fn resend_failure_surfaces_status_and_body() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/emails");
        then.status(422)
            .header("content-type", "application/json")
            .body(r#"{"name":"validation_error","message":"Invalid `from` field"}"#);
    });

    let mailer = ResendMailer::new("resend-key", "not-an-address", "ops@example.com")
        .unwrap()
        .with_base_url(&server.base_url());
    let result = mailer.send("subject", "", "<p>hi</p>").await;

    match result {
        Err(common::WatchError::Upstream { status, body }) => {
            assert_eq!(status, 422);
            assert!(body.contains("validation_error"));
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn webhook_carries_the_shared_secret() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST).path("/mail").json_body_partial(
            r#"{
                "secret": "s3cret",
                "to": "ops@example.com",
                "subject": "hello"
            }"#,
        );
        then.status(200).body("OK");
    });

    let mailer = WebhookMailer::new(
        &format!("{}/mail", server.base_url()),
        "s3cret",
        "ops@example.com",
    )
    .unwrap();
    mailer.send("hello", "body", "").await.unwrap();

    mock.assert();
}
