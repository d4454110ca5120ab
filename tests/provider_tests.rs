//! OpenAI-compatible provider tests against a wiremock server.

use loanline::error::LoanlineError;
use loanline::provider::openai_compatible::OpenAiCompatibleProvider;
use loanline::provider::CompletionProvider;
use loanline::types::{GenerationSettings, Turn};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> OpenAiCompatibleProvider {
    OpenAiCompatibleProvider::new("deepseek", "deepseek-chat", "sk-test", server.uri())
}

fn prompt() -> Vec<Turn> {
    vec![Turn::system("be a loan agent"), Turn::user("hi")]
}

#[tokio::test]
async fn complete_extracts_reply_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "deepseek-chat",
            "temperature": 0.7,
            "max_tokens": 500,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Good day!" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = provider_for(&server)
        .complete(&prompt(), &GenerationSettings::default())
        .await
        .unwrap();

    assert_eq!(reply, "Good day!");
}

#[tokio::test]
async fn non_success_status_is_a_remote_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(&prompt(), &GenerationSettings::default())
        .await
        .unwrap_err();

    assert!(matches!(err, LoanlineError::Api { status: 500, .. }), "got {err:?}");
    assert!(err.is_remote_unavailable());
}

#[tokio::test]
async fn auth_rejection_maps_to_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(&prompt(), &GenerationSettings::default())
        .await
        .unwrap_err();

    assert!(matches!(err, LoanlineError::Authentication(_)), "got {err:?}");
    assert!(err.is_remote_unavailable());
}

#[tokio::test]
async fn unparseable_payload_fails_closed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": "this is not an array"
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(&prompt(), &GenerationSettings::default())
        .await
        .unwrap_err();

    assert!(err.is_remote_unavailable(), "shape mismatch must fail closed: {err:?}");
}

#[tokio::test]
async fn empty_choices_fails_closed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(&prompt(), &GenerationSettings::default())
        .await
        .unwrap_err();

    assert!(matches!(err, LoanlineError::Api { status: 200, .. }), "got {err:?}");
}

#[tokio::test]
async fn absent_content_yields_apology_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        })))
        .mount(&server)
        .await;

    let reply = provider_for(&server)
        .complete(&prompt(), &GenerationSettings::default())
        .await
        .unwrap();

    assert_eq!(reply, loanline::fallback::APOLOGY_REPLY);
}

#[tokio::test]
async fn wire_messages_preserve_roles_and_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "system", "content": "be a loan agent" },
                { "role": "user", "content": "hi" },
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "ok" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = provider_for(&server)
        .complete(&prompt(), &GenerationSettings::default())
        .await
        .unwrap();
    assert_eq!(reply, "ok");
}
