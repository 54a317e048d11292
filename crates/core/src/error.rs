//! Domain-level error type shared across the workspace.

use crate::validation::UploadError;

/// Domain errors produced by the ClothSwap pipeline.
///
/// HTTP-specific mapping (status codes, response bodies) lives in the
/// api crate; this enum only names what went wrong.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A selected or received file failed the upload rules.
    #[error(transparent)]
    Validation(#[from] UploadError),

    /// A required multipart field was absent from the submission.
    #[error("{0} file is required")]
    MissingField(&'static str),

    /// A well-formed worker response contained no recognizable result URL.
    #[error("No image URL found in response")]
    Extraction,
}
