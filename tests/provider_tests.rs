use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use synthsearch::error::SynthesisError;
use synthsearch::provider::{CompletionProvider, OpenAiClient};
use synthsearch::synthesizer::ResultSynthesizer;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod test_helpers {
    use super::*;

    pub const API_KEY: &str = "test-key";
    pub const MODEL: &str = "gpt-4o-mini";

    pub fn client_for(server: &MockServer, timeout: Duration) -> OpenAiClient {
        OpenAiClient::new(API_KEY, server.uri(), MODEL, timeout).unwrap()
    }

    pub fn envelope(content: &str) -> Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    pub async fn mount_reply(server: &MockServer, template: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(template)
            .expect(1)
            .mount(server)
            .await;
    }
}

use test_helpers::*;

#[tokio::test]
async fn test_request_shape_and_auth() {
    let server = MockServer::start().await;
    let expected_body = json!({
        "model": MODEL,
        "messages": [
            {
                "role": "system",
                "content": "You are a helpful assistant that returns a JSON array of up to 10 search results. Each result must be an object with keys: url, title, description. Return only valid JSON (no explanation)."
            },
            {
                "role": "user",
                "content": "Search the web and return results for: \"rust\""
            }
        ],
        "temperature": 0.0
    });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("content-type", "application/json"))
        .and(body_json(expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope("[]")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let text = client
        .complete(&ResultSynthesizer::build_request("rust"))
        .await
        .unwrap();
    assert_eq!(text, "[]");
}

#[tokio::test]
async fn test_trailing_slash_on_base_url() {
    let server = MockServer::start().await;
    mount_reply(&server, ResponseTemplate::new(200).set_body_json(envelope("ok"))).await;

    let base_url = format!("{}/", server.uri());
    let client = OpenAiClient::new(API_KEY, base_url, MODEL, Duration::from_secs(5)).unwrap();
    assert_eq!(client.endpoint(), format!("{}/chat/completions", server.uri()));
    let text = client
        .complete(&ResultSynthesizer::build_request("q"))
        .await
        .unwrap();
    assert_eq!(text, "ok");
}

#[tokio::test]
async fn test_non_success_status_is_upstream_error() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(429).set_body_string("rate limited: org-secret"),
    )
    .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = client
        .complete(&ResultSynthesizer::build_request("q"))
        .await
        .unwrap_err();

    assert!(err.is_upstream());
    match err {
        SynthesisError::Upstream { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "rate limited: org-secret");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope("[]"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_millis(200));
    let err = client
        .complete(&ResultSynthesizer::build_request("q"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SynthesisError::UpstreamTimeout(d) if d == Duration::from_millis(200)
    ));
    assert!(err.is_upstream());
}

#[tokio::test]
async fn test_missing_content_is_empty_text() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"choices": []})),
    )
    .await;

    let client = client_for(&server, Duration::from_secs(5));
    let text = client
        .complete(&ResultSynthesizer::build_request("q"))
        .await
        .unwrap();
    assert_eq!(text, "");
}

#[tokio::test]
async fn test_non_json_envelope_is_internal_error() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_string("<html>gateway</html>"),
    )
    .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = client
        .complete(&ResultSynthesizer::build_request("q"))
        .await
        .unwrap_err();
    assert!(matches!(err, SynthesisError::Internal(_)));
}

#[tokio::test]
async fn test_unreachable_provider_is_internal_error() {
    // Port 1 is never served in the test environment.
    let client =
        OpenAiClient::new(API_KEY, "http://127.0.0.1:1", MODEL, Duration::from_secs(5)).unwrap();

    let err = client
        .complete(&ResultSynthesizer::build_request("q"))
        .await
        .unwrap_err();
    assert!(matches!(err, SynthesisError::Internal(_)));
}

#[tokio::test]
async fn test_synthesize_end_to_end_with_prose_wrapped_json() {
    let server = MockServer::start().await;
    let content = r#"Sure! Here you go:
```json
[
  {"url": "https://www.rust-lang.org", "title": "Rust", "description": "A language"},
  {"link": "https://crates.io", "name": "crates.io", "snippet": "Package registry"}
]
```
Let me know if you need more."#;
    mount_reply(&server, ResponseTemplate::new(200).set_body_json(envelope(content))).await;

    let client = client_for(&server, Duration::from_secs(5));
    let synthesizer = ResultSynthesizer::new(Arc::new(client));
    let results = synthesizer.synthesize("rust").await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results.as_slice()[0].url, "https://www.rust-lang.org");
    assert_eq!(results.as_slice()[1].url, "https://crates.io");
    assert_eq!(results.as_slice()[1].title, "crates.io");
    assert_eq!(results.as_slice()[1].description, "Package registry");
}
