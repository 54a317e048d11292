//! Shared helpers for relay integration tests.
//!
//! Builds the real application router (same middleware stack as
//! production) around stub forwarding strategies, and provides a
//! hand-rolled multipart body builder so tests control the exact wire
//! shape of submissions.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use tower::ServiceExt;

use clothswap_api::config::{ForwardMode, ServerConfig};
use clothswap_api::router::build_app_router;
use clothswap_api::state::AppState;
use clothswap_n8n::{
    ForwardError, ForwardStrategy, N8nApi, N8nApiError, ObjectStorage, StorageError, Submission,
    UrlForwarder,
};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        webhook_url: "http://localhost:9/webhook/clothswap".to_string(),
        forward_mode: ForwardMode::Raw,
        storage_upload_url: None,
        storage_api_key: None,
    }
}

/// Build the full application router around the given forwarder.
pub fn build_test_app(forwarder: Arc<dyn ForwardStrategy>) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        forwarder,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Stub forwarders
// ---------------------------------------------------------------------------

/// Forwarder that records the submission and returns a canned response.
pub struct RecordingForwarder {
    pub response: serde_json::Value,
    pub seen: Mutex<Vec<SeenSubmission>>,
}

/// What the stub observed about one submission.
pub struct SeenSubmission {
    pub source_filename: String,
    pub source_len: usize,
    pub garment_filename: Option<String>,
    pub prompt: Option<String>,
}

impl RecordingForwarder {
    pub fn returning(response: serde_json::Value) -> Arc<Self> {
        Arc::new(Self {
            response,
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ForwardStrategy for RecordingForwarder {
    async fn forward(&self, submission: Submission) -> Result<serde_json::Value, ForwardError> {
        self.seen.lock().unwrap().push(SeenSubmission {
            source_filename: submission.source_image.filename,
            source_len: submission.source_image.bytes.len(),
            garment_filename: submission.reference_garment.map(|g| g.filename),
            prompt: submission.prompt,
        });
        Ok(self.response.clone())
    }
}

/// Forwarder that always fails with an upstream error.
pub struct FailingForwarder {
    pub status: u16,
    pub body: String,
}

#[async_trait]
impl ForwardStrategy for FailingForwarder {
    async fn forward(&self, _submission: Submission) -> Result<serde_json::Value, ForwardError> {
        Err(ForwardError::Api(N8nApiError::ApiError {
            status: self.status,
            body: self.body.clone(),
        }))
    }
}

/// Storage stub for exercising the real `UrlForwarder` contract checks.
///
/// Uploads always fail, which is fine: the tests using it only reach
/// the pre-upload validation path.
pub struct UnreachableStorage;

#[async_trait]
impl ObjectStorage for UnreachableStorage {
    async fn upload(
        &self,
        _filename: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        Err(StorageError::MissingUrl)
    }
}

/// A real `UrlForwarder` wired to stub collaborators.
pub fn url_mode_forwarder() -> Arc<dyn ForwardStrategy> {
    Arc::new(UrlForwarder::new(
        N8nApi::new("http://localhost:9/webhook/clothswap".to_string()),
        Arc::new(UnreachableStorage),
    ))
}

// ---------------------------------------------------------------------------
// Multipart helpers
// ---------------------------------------------------------------------------

/// Fixed boundary for hand-built multipart bodies.
pub const BOUNDARY: &str = "clothswap-test-boundary";

/// One part of a hand-built multipart body.
pub enum Part<'a> {
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

/// Assemble a `multipart/form-data` body from the given parts.
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File {
                name,
                filename,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// POST a multipart body to the clothswap endpoint.
pub async fn post_clothswap(app: Router, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri("/api/clothswap")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// GET a path on the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a `{"error": ...}` body with the expected message and status.
pub async fn assert_error_body(response: Response<Body>, status: StatusCode, message: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["error"], message);
}
