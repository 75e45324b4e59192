//! Telegram client against a mock HTTP server.

use weatherbot_core::{NotifyError, Notifier, TelegramClient};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path, query_param},
};

const TOKEN: &str = "123:abc";

fn client(server: &MockServer) -> TelegramClient {
    #[allow(clippy::expect_used)]
    TelegramClient::with_base_url(TOKEN.into(), server.uri()).expect("client should build")
}

#[tokio::test]
async fn send_posts_chat_id_and_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .and(body_json(serde_json::json!({"chat_id": 42, "text": "привет"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "result": {"message_id": 5, "chat": {"id": 42}, "date": 0, "text": "привет"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).send(42, "привет").await.unwrap();
}

#[tokio::test]
async fn api_error_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        })))
        .mount(&server)
        .await;

    let err = client(&server).send(42, "text").await.unwrap_err();

    match err {
        NotifyError::Api { code, description } => {
            assert_eq!(code, Some(400));
            assert_eq!(description, "Bad Request: chat not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_failure_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client(&server).send(42, "text").await.unwrap_err();

    assert!(matches!(err, NotifyError::Status { .. }));
    assert!(!err.to_string().contains(TOKEN));
}

#[tokio::test]
async fn get_updates_passes_offset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/bot{TOKEN}/getUpdates")))
        .and(query_param("offset", "11"))
        .and(query_param("timeout", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "result": [
                {"update_id": 11, "message": {"message_id": 1, "chat": {"id": 42}, "text": "/weather"}},
                {"update_id": 12, "edited_message": {"message_id": 1, "chat": {"id": 42}}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updates = client(&server).get_updates(Some(11), 0).await.unwrap();

    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].message.as_ref().and_then(|m| m.text.as_deref()), Some("/weather"));
    assert!(updates[1].message.is_none());
}
