//! Object-storage upload capability.
//!
//! The URL-forwarding strategy needs "upload bytes, get a fetchable
//! URL" and nothing more, so the capability is a trait with a single
//! HTTP-backed implementation. The provider's contract beyond that is
//! deliberately unspecified.

use std::time::Duration;

use async_trait::async_trait;

/// HTTP request timeout for a single upload.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors from the object-storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("Storage upload failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The storage service returned a non-2xx status code.
    #[error("Storage service returned HTTP {status}: {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The storage service accepted the upload but returned no URL.
    #[error("Storage response contained no url field")]
    MissingUrl,
}

/// "Upload bytes, get a public URL" capability.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload one file's bytes and return a fetchable URL for them.
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError>;
}

/// Object storage backed by a plain HTTP upload endpoint.
///
/// Posts the bytes as a multipart `file` part and reads the public URL
/// from the JSON response (`url`, falling back to `data.url`).
pub struct HttpObjectStorage {
    client: reqwest::Client,
    upload_url: String,
    api_key: Option<String>,
}

impl HttpObjectStorage {
    /// Create a new uploader for an HTTP storage endpoint.
    ///
    /// * `upload_url` - Endpoint accepting multipart POST uploads.
    /// * `api_key` - Optional bearer token for the endpoint.
    pub fn new(upload_url: String, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(UPLOAD_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            upload_url,
            api_key,
        }
    }

    /// Pull the public URL out of a storage response body.
    fn url_from_response(body: &serde_json::Value) -> Result<String, StorageError> {
        body.get("url")
            .and_then(serde_json::Value::as_str)
            .or_else(|| {
                body.get("data")
                    .and_then(|d| d.get("url"))
                    .and_then(serde_json::Value::as_str)
            })
            .map(str::to_string)
            .ok_or(StorageError::MissingUrl)
    }
}

#[async_trait]
impl ObjectStorage for HttpObjectStorage {
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        let size = bytes.len();
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(StorageError::Request)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let mut request = self.client.post(&self.upload_url).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StorageError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = response.json().await?;
        let url = Self::url_from_response(&body)?;

        tracing::debug!(filename, size, url = %url, "Uploaded asset to object storage");

        Ok(url)
    }
}
