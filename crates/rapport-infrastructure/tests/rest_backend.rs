use chrono::NaiveDate;
use rapport_core::chat::{ChatBackend, ChatRequest};
use rapport_core::credential::BearerToken;
use rapport_core::note::NotesBackend;
use rapport_infrastructure::RestBackend;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token() -> BearerToken {
    BearerToken::new("test_key").unwrap()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn backend(server: &MockServer) -> RestBackend {
    RestBackend::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_notes_sends_bearer_and_decodes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notes/client-1/2024-01-01"))
        .and(header("Authorization", "Bearer test_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "subjectId": "client-1",
                "conversation": [
                    {"text": "Called client", "timestamp": "2024-01-01T10:00:00Z", "author": "agent1"}
                ],
                "status": [
                    {"text": "Awaiting signature", "timestamp": "2024-01-01T09:00:00.123+00:00", "author": "agent2"}
                ]
            }
        })))
        .mount(&mock_server)
        .await;

    let payload = backend(&mock_server)
        .fetch_notes(&token(), "client-1", date())
        .await
        .unwrap();

    assert_eq!(payload.subject_id, "client-1");
    assert_eq!(payload.conversation[0].author, "agent1");
    assert_eq!(payload.status[0].text, "Awaiting signature");
}

#[tokio::test]
async fn test_fetch_notes_non_success_is_invalid_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notes/client-1/2024-01-01"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such client"))
        .mount(&mock_server)
        .await;

    let err = backend(&mock_server)
        .fetch_notes(&token(), "client-1", date())
        .await
        .unwrap_err();

    assert!(err.is_invalid_status());
    assert_eq!(err.resource(), Some("notes"));
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_fetch_notes_bad_schema_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notes/client-1/2024-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .mount(&mock_server)
        .await;

    let err = backend(&mock_server)
        .fetch_notes(&token(), "client-1", date())
        .await
        .unwrap_err();

    assert!(err.is_decode());
}

#[tokio::test]
async fn test_fetch_transcript_sessions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sessions/client-1/2024-01-01"))
        .and(header("Authorization", "Bearer test_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sessions": {
                "g1": [
                    {"type": "ai_analysis", "content": "summary... NOTES: Follow up next week", "timestamp": "2024-01-01T12:00:00Z"},
                    {"type": "user_message", "content": "hi"}
                ]
            }
        })))
        .mount(&mock_server)
        .await;

    let sessions = backend(&mock_server)
        .fetch_transcript_sessions(&token(), "client-1", date())
        .await
        .unwrap();

    assert_eq!(sessions.flatten().count(), 2);
}

#[tokio::test]
async fn test_fetch_transcript_sessions_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sessions/client-1/2024-01-01"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let err = backend(&mock_server)
        .fetch_transcript_sessions(&token(), "client-1", date())
        .await
        .unwrap_err();

    assert!(err.is_invalid_status());
    assert_eq!(err.resource(), Some("sessions"));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let backend = RestBackend::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

    let err = backend
        .fetch_notes(&token(), "client-1", date())
        .await
        .unwrap_err();

    assert!(err.is_transport());
}

#[tokio::test]
async fn test_send_chat_decodes_keyed_reply() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(header("Authorization", "Bearer test_key"))
        .and(body_json(json!({ "message": "Summarize Acme", "clientId": "acme" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "Acme is happy." })))
        .mount(&mock_server)
        .await;

    let request = ChatRequest {
        message: "Summarize Acme".to_string(),
        client_id: Some("acme".to_string()),
    };
    let reply = backend(&mock_server)
        .send_chat(&token(), &request)
        .await
        .unwrap();

    assert_eq!(reply.into_text(), "Acme is happy.");
}

#[tokio::test]
async fn test_send_chat_bare_string_reply() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("Plain answer")))
        .mount(&mock_server)
        .await;

    let request = ChatRequest {
        message: "hello".to_string(),
        client_id: None,
    };
    let reply = backend(&mock_server)
        .send_chat(&token(), &request)
        .await
        .unwrap();

    assert_eq!(reply.into_text(), "Plain answer");
}
