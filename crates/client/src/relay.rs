//! Transport seam between the controller and the relay service.
//!
//! The controller talks to [`RelayTransport`] so its state machine can
//! be tested with canned responses; [`HttpRelay`] is the production
//! implementation posting the multipart form over [`reqwest`].

use std::time::Duration;

use async_trait::async_trait;

use clothswap_core::TransformationRequest;

/// Default relay endpoint for local development.
pub const DEFAULT_RELAY_URL: &str = "http://localhost:3000/api/clothswap";

/// HTTP request timeout for the relay call. Generous because the relay
/// awaits the worker synchronously.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Errors from the client-to-relay transport.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The relay returned a non-2xx status. The message prefers the
    /// relay's own `error` body, falling back to the status line.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Human-readable failure description.
        message: String,
    },

    /// The relay returned 2xx but the body was not parseable JSON.
    #[error("Relay response was not valid JSON: {0}")]
    InvalidBody(String),
}

/// One submission to the relay service.
#[async_trait]
pub trait RelayTransport: Send + Sync {
    /// Submit the form and return the relay's passthrough JSON body.
    ///
    /// Exactly one HTTP call is made per invocation; retries are the
    /// user's job via explicit reset-and-resubmit.
    async fn submit(
        &self,
        request: &TransformationRequest,
    ) -> Result<serde_json::Value, RelayError>;
}

/// Production transport: multipart POST to the relay endpoint.
pub struct HttpRelay {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRelay {
    /// Create a transport for the given relay endpoint URL.
    pub fn new(endpoint: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, endpoint }
    }

    /// Build the multipart form: `source_image` always, the garment
    /// only when selected, the prompt only when non-empty after trim.
    fn build_form(request: &TransformationRequest) -> Result<reqwest::multipart::Form, RelayError> {
        // The controller gates submit on a selected source; refusing
        // here keeps the transport safe for direct callers too.
        let source = request.source_image.as_ref().ok_or(RelayError::Status {
            status: 400,
            message: "Please select a source image".to_string(),
        })?;

        let mut form = reqwest::multipart::Form::new().part(
            "source_image",
            reqwest::multipart::Part::bytes(source.bytes.clone())
                .file_name(source.filename.clone())
                .mime_str(&source.content_type)?,
        );

        if let Some(garment) = &request.reference_garment {
            form = form.part(
                "reference_garment",
                reqwest::multipart::Part::bytes(garment.bytes.clone())
                    .file_name(garment.filename.clone())
                    .mime_str(&garment.content_type)?,
            );
        }

        if let Some(prompt) = request.trimmed_prompt() {
            form = form.text("prompt", prompt.to_string());
        }

        Ok(form)
    }
}

#[async_trait]
impl RelayTransport for HttpRelay {
    async fn submit(
        &self,
        request: &TransformationRequest,
    ) -> Result<serde_json::Value, RelayError> {
        let form = Self::build_form(request)?;

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the relay's own error message when the body has one.
            let message = match response.json::<serde_json::Value>().await {
                Ok(body) => body
                    .get("error")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string),
                Err(_) => None,
            }
            .unwrap_or_else(|| {
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("request failed")
                )
            });

            return Err(RelayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| RelayError::InvalidBody(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_displays_its_message() {
        let err = RelayError::Status {
            status: 400,
            message: "source_image file is required".into(),
        };
        assert_eq!(err.to_string(), "source_image file is required");
    }
}
