//! HTTP client for the n8n clothswap webhook.
//!
//! Wraps the webhook endpoint (multipart or JSON submission) using
//! [`reqwest`]. Exactly one attempt is made per call; retry policy is
//! deliberately absent.

use std::time::Duration;

/// Fallback webhook endpoint used when `N8N_WEBHOOK_URL` is unset.
pub const DEFAULT_WEBHOOK_URL: &str = "https://1caade28f2a1.ngrok-free.app/webhook/clothswap";

/// HTTP request timeout for a single webhook call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client for a single n8n webhook endpoint.
pub struct N8nApi {
    client: reqwest::Client,
    webhook_url: String,
}

/// Errors from the n8n webhook layer.
#[derive(Debug, thiserror::Error)]
pub enum N8nApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The webhook returned a non-2xx status code.
    #[error("Worker returned HTTP {status}: {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The webhook returned 2xx but the body was not parseable JSON.
    #[error("Worker response was not valid JSON: {0}")]
    InvalidBody(String),
}

impl N8nApi {
    /// Create a new client for a webhook endpoint.
    ///
    /// * `webhook_url` - Full webhook URL, e.g. `https://host/webhook/clothswap`.
    pub fn new(webhook_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            webhook_url,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling with the storage uploader).
    pub fn with_client(client: reqwest::Client, webhook_url: String) -> Self {
        Self {
            client,
            webhook_url,
        }
    }

    /// The configured webhook endpoint.
    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    /// Submit a multipart form (raw image bytes) to the webhook.
    ///
    /// Returns the worker's response body as untyped JSON; the caller
    /// owns extraction of any result URL from it.
    pub async fn submit_multipart(
        &self,
        form: reqwest::multipart::Form,
    ) -> Result<serde_json::Value, N8nApiError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .multipart(form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Submit a JSON body (storage URLs) to the webhook.
    pub async fn submit_json(
        &self,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, N8nApiError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or [`N8nApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, N8nApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(N8nApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful response body into untyped JSON.
    async fn parse_response(
        response: reqwest::Response,
    ) -> Result<serde_json::Value, N8nApiError> {
        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| N8nApiError::InvalidBody(e.to_string()))
    }
}
