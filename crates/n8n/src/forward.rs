//! Forwarding strategies: how a relay submission becomes a worker call.
//!
//! The deployed relay picks exactly one strategy at startup; the two
//! are never selected per-request. Each strategy validates its own
//! required fields before any network traffic, so a rejected request
//! costs no outbound call.

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{N8nApi, N8nApiError};
use crate::storage::{ObjectStorage, StorageError};

/// One image asset inside a submission: declared metadata plus bytes.
#[derive(Debug, Clone)]
pub struct ImagePart {
    /// Original filename, re-emitted unchanged in raw-forwarding mode.
    pub filename: String,
    /// Declared media type.
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// A normalized relay submission, ready for forwarding.
///
/// The prompt is already trimmed; `None` means nothing was entered.
#[derive(Debug)]
pub struct Submission {
    /// The person photo (always present; enforced by the relay handler).
    pub source_image: ImagePart,
    /// The garment reference; required only in URL-forwarding mode.
    pub reference_garment: Option<ImagePart>,
    /// Optional garment description.
    pub prompt: Option<String>,
}

/// Errors from the forwarding layer.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    /// A field this strategy requires was absent from the submission.
    #[error("{0} file is required")]
    MissingField(&'static str),

    /// An object-storage upload failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The worker call failed (transport, non-2xx, or unparseable body).
    #[error(transparent)]
    Api(#[from] N8nApiError),
}

/// Translate one submission into exactly one worker call.
///
/// Consumes the submission so the image bytes live only for the single
/// outbound call's lifetime.
#[async_trait]
pub trait ForwardStrategy: Send + Sync {
    /// Forward the submission and return the worker's raw JSON response.
    async fn forward(&self, submission: Submission) -> Result<serde_json::Value, ForwardError>;
}

// ---------------------------------------------------------------------------
// Raw-forwarding
// ---------------------------------------------------------------------------

/// Re-emit received files unchanged as a new multipart body.
///
/// Fields are renamed for the worker contract: `source_image` becomes
/// `human_image`, `reference_garment` becomes `garment_image`. The
/// garment is optional in this mode.
pub struct RawForwarder {
    api: N8nApi,
}

impl RawForwarder {
    pub fn new(api: N8nApi) -> Self {
        Self { api }
    }
}

/// Build a multipart file part preserving filename and content type.
fn file_part(image: ImagePart) -> Result<reqwest::multipart::Part, ForwardError> {
    let part = reqwest::multipart::Part::bytes(image.bytes)
        .file_name(image.filename)
        .mime_str(&image.content_type)
        .map_err(|e| ForwardError::Api(N8nApiError::Request(e)))?;
    Ok(part)
}

#[async_trait]
impl ForwardStrategy for RawForwarder {
    async fn forward(&self, submission: Submission) -> Result<serde_json::Value, ForwardError> {
        let mut form =
            reqwest::multipart::Form::new().part("human_image", file_part(submission.source_image)?);

        if let Some(garment) = submission.reference_garment {
            form = form.part("garment_image", file_part(garment)?);
        }

        if let Some(prompt) = submission.prompt {
            form = form.text("prompt", prompt);
        }

        tracing::info!(url = %self.api.webhook_url(), "Forwarding raw multipart to worker");

        Ok(self.api.submit_multipart(form).await?)
    }
}

// ---------------------------------------------------------------------------
// URL-forwarding
// ---------------------------------------------------------------------------

/// Upload both assets to object storage, then send the worker URLs.
///
/// Unlike raw forwarding, the garment reference is required here; its
/// absence is rejected before any upload happens.
pub struct UrlForwarder {
    api: N8nApi,
    storage: Arc<dyn ObjectStorage>,
}

impl UrlForwarder {
    pub fn new(api: N8nApi, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { api, storage }
    }
}

#[async_trait]
impl ForwardStrategy for UrlForwarder {
    async fn forward(&self, submission: Submission) -> Result<serde_json::Value, ForwardError> {
        let garment = submission
            .reference_garment
            .ok_or(ForwardError::MissingField("reference_garment"))?;
        let source = submission.source_image;

        // Uploads are sequential; the worker call happens only after both.
        let human_image_url = self
            .storage
            .upload(&source.filename, &source.content_type, source.bytes)
            .await?;
        let garment_image_url = self
            .storage
            .upload(&garment.filename, &garment.content_type, garment.bytes)
            .await?;

        let mut body = serde_json::json!({
            "human_image_url": human_image_url,
            "garment_image_url": garment_image_url,
        });
        if let Some(prompt) = submission.prompt {
            body["prompt"] = serde_json::Value::String(prompt);
        }

        tracing::info!(url = %self.api.webhook_url(), "Forwarding storage URLs to worker");

        Ok(self.api.submit_json(&body).await?)
    }
}
