//! Handler for the clothswap submission endpoint.
//!
//! Walks the incoming multipart stream, validates the received parts,
//! and hands a normalized [`Submission`] to the configured forwarding
//! strategy. The worker's JSON response is returned to the caller
//! unmodified; the relay never extracts the result URL itself.

use axum::extract::{Multipart, State};
use axum::Json;

use clothswap_core::{validate_upload, CoreError};
use clothswap_n8n::{ImagePart, Submission};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/clothswap
///
/// Multipart fields: `source_image` (file, required), `reference_garment`
/// (file, required in URL-forwarding mode), `prompt` (text, optional).
/// Unknown fields are skipped. No required part is missing by the time
/// the first outbound byte is sent.
pub async fn submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<serde_json::Value>> {
    let submission = collect_submission(multipart).await?;

    tracing::info!(
        source = %submission.source_image.filename,
        has_garment = submission.reference_garment.is_some(),
        has_prompt = submission.prompt.is_some(),
        "Received clothswap submission"
    );

    let response = state.forwarder.forward(submission).await?;

    tracing::debug!(response = %response, "Worker raw response");

    Ok(Json(response))
}

/// Parse the multipart stream into a validated [`Submission`].
async fn collect_submission(mut multipart: Multipart) -> AppResult<Submission> {
    let mut source_image: Option<ImagePart> = None;
    let mut reference_garment: Option<ImagePart> = None;
    let mut prompt: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "source_image" => source_image = Some(read_image_part(field).await?),
            "reference_garment" => reference_garment = Some(read_image_part(field).await?),
            "prompt" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    prompt = Some(trimmed.to_string());
                }
            }
            // Unknown fields are ignored, not rejected.
            _ => {}
        }
    }

    let source_image = source_image.ok_or(CoreError::MissingField("source_image"))?;

    Ok(Submission {
        source_image,
        reference_garment,
        prompt,
    })
}

/// Read one file field into an [`ImagePart`], enforcing the upload rules.
async fn read_image_part(field: axum::extract::multipart::Field<'_>) -> AppResult<ImagePart> {
    let filename = field.file_name().unwrap_or("upload").to_string();
    let content_type = field.content_type().unwrap_or("").to_string();

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    validate_upload(bytes.len(), &content_type).map_err(CoreError::from)?;

    Ok(ImagePart {
        filename,
        content_type,
        bytes: bytes.to_vec(),
    })
}
