use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use sortli_core::{
    ClassificationService, CompletionPort, CompletionRequest, ModelPolicy, PortError,
};
use sortli_server::{AppState, DEFAULT_MAX_BODY_BYTES, app};
use tower::ServiceExt;

enum Reply {
    Content(&'static str),
    Status(u16),
    NoCredential,
}

struct ScriptedPort {
    reply: Reply,
    models: Mutex<Vec<String>>,
}

impl ScriptedPort {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            models: Mutex::new(Vec::new()),
        })
    }

    fn models(&self) -> Vec<String> {
        self.models.lock().expect("models lock").clone()
    }
}

#[async_trait]
impl CompletionPort for ScriptedPort {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, PortError> {
        self.models
            .lock()
            .expect("models lock")
            .push(request.model.clone());
        match self.reply {
            Reply::Content(content) => Ok(content.to_owned()),
            Reply::Status(status) => Err(PortError::UpstreamStatus {
                status,
                body: String::from("bad gateway"),
            }),
            Reply::NoCredential => Err(PortError::MissingCredential),
        }
    }
}

fn router(port: &Arc<ScriptedPort>) -> Router {
    router_with_limit(port, DEFAULT_MAX_BODY_BYTES)
}

fn router_with_limit(port: &Arc<ScriptedPort>, max_body_bytes: usize) -> Router {
    let shared: Arc<ScriptedPort> = Arc::clone(port);
    let service = ClassificationService::new(shared, ModelPolicy::default());
    app(AppState {
        service: Arc::new(service),
        max_body_bytes,
    })
}

fn photo_body(encoded_len: usize) -> String {
    format!(
        r#"{{"imageBase64":"data:image/jpeg;base64,{}"}}"#,
        "A".repeat(encoded_len)
    )
}

async fn post_json(router: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::ORIGIN, "https://app.example")
                .body(Body::from(body.to_owned()))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    let status = response.status();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*"),
        "every response carries the CORS origin header"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let value = serde_json::from_slice(&bytes).expect("body is JSON");
    (status, value)
}

#[tokio::test]
async fn banana_peel_scenario() {
    let port = ScriptedPort::new(Reply::Content(
        r#"{"type":"wet","confidence":92,"reasoning":"organic food waste"}"#,
    ));
    let (status, body) = post_json(
        router(&port),
        "/classify-waste",
        r#"{"description":"banana peel"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "type": "wet",
            "label": "Wet Waste",
            "confidence": 92,
            "reasoning": "organic food waste",
            "suggestions": [
                "Compostable",
                "Use green bin",
                "Avoid plastic bags",
                "Can be used for composting"
            ]
        })
    );
    assert_eq!(port.models(), vec![String::from("google/gemini-2.5-flash-lite")]);
}

#[tokio::test]
async fn missing_input_is_bad_request_without_upstream_call() {
    let port = ScriptedPort::new(Reply::Content("{}"));
    let (status, body) = post_json(router(&port), "/classify-waste", "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Description or image is required" }));
    assert!(port.models().is_empty(), "no upstream call expected");
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let port = ScriptedPort::new(Reply::Content("{}"));
    let (status, body) = post_json(router(&port), "/classify-waste", "not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().expect("error message");
    assert!(message.starts_with("Invalid request body"), "got {message}");
    assert!(port.models().is_empty(), "no upstream call expected");
}

#[tokio::test]
async fn upstream_failure_is_server_error_without_fallback() {
    let port = ScriptedPort::new(Reply::Status(503));
    let (status, body) = post_json(
        router(&port),
        "/functions/v1/classify-waste",
        r#"{"imageBase64":"data:image/jpeg;base64,AAAA"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "AI Gateway error: 503" }));
    assert_eq!(port.models(), vec![String::from("google/gemini-2.5-flash")]);
}

#[tokio::test]
async fn large_photo_is_classified() {
    let port = ScriptedPort::new(Reply::Content(
        r#"{"type":"ewaste","confidence":90,"reasoning":"circuit board"}"#,
    ));
    let body = photo_body(4 * 1024 * 1024);
    let (status, body) = post_json(router(&port), "/classify-waste", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "ewaste");
    assert_eq!(port.models(), vec![String::from("google/gemini-2.5-flash")]);
}

#[tokio::test]
async fn oversized_body_is_json_error() {
    let port = ScriptedPort::new(Reply::Content("{}"));
    let body = photo_body(8 * 1024);
    let (status, body) = post_json(router_with_limit(&port, 1024), "/classify-waste", &body).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    let message = body["error"].as_str().expect("error message");
    assert!(message.contains("length limit exceeded"), "got {message}");
    assert!(port.models().is_empty(), "no upstream call expected");
}

#[tokio::test]
async fn missing_credential_is_server_error() {
    let port = ScriptedPort::new(Reply::NoCredential);
    let (status, body) = post_json(
        router(&port),
        "/classify-waste",
        r#"{"description":"paint thinner"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "AI gateway credential not configured" }));
}

#[tokio::test]
async fn unreadable_reply_returns_fallback() {
    let port = ScriptedPort::new(Reply::Content("Sorry, I cannot help with that."));
    let (status, body) = post_json(
        router(&port),
        "/classify-waste",
        r#"{"description":"mystery item"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "dry");
    assert_eq!(body["label"], "Dry Waste");
    assert_eq!(body["confidence"], 75);
    assert_eq!(body["reasoning"], "Unable to classify precisely");
}

#[tokio::test]
async fn preflight_has_empty_body_and_permissive_headers() {
    let port = ScriptedPort::new(Reply::Content("{}"));
    let response = router(&port)
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/classify-waste")
                .header(header::ORIGIN, "https://app.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(
                    header::ACCESS_CONTROL_REQUEST_HEADERS,
                    "authorization, x-client-info, apikey, content-type",
                )
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
    let allowed = headers
        .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .and_then(|value| value.to_str().ok())
        .expect("allow-headers present")
        .to_ascii_lowercase();
    for name in ["authorization", "x-client-info", "apikey", "content-type"] {
        assert!(allowed.contains(name), "{name} missing from {allowed}");
    }

    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    assert!(bytes.is_empty(), "preflight body must be empty");
    assert!(port.models().is_empty(), "preflight must not classify");
}

#[tokio::test]
async fn bare_options_is_answered() {
    let port = ScriptedPort::new(Reply::Content("{}"));
    let response = router(&port)
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/functions/v1/classify-waste")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn categories_list_the_taxonomy() {
    let port = ScriptedPort::new(Reply::Content("{}"));
    let response = router(&port)
        .oneshot(
            Request::builder()
                .uri("/categories")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let body: Value = serde_json::from_slice(&bytes).expect("body is JSON");
    let types: Vec<&str> = body
        .as_array()
        .expect("array of categories")
        .iter()
        .filter_map(|entry| entry["type"].as_str())
        .collect();
    assert_eq!(types, vec!["wet", "dry", "ewaste", "hazardous"]);
    assert_eq!(body[2]["label"], "E-Waste");
}
