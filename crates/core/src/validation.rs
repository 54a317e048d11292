//! Upload validation rules.
//!
//! Applied at file-selection time on the client (so submission can be
//! blocked early) and again by the relay on received multipart parts.

/// Maximum accepted upload size: 10 MiB.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Why a selected file was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    /// The file exceeds [`MAX_UPLOAD_BYTES`].
    #[error("File size must be less than 10MB")]
    TooLarge,

    /// The declared content type does not indicate an image.
    #[error("Please select an image file")]
    NotAnImage,
}

/// Validate a file's size and declared content type.
///
/// Size is checked first, then the content type must start with
/// `image/`. A failure rejects the file; it never changes job state.
pub fn validate_upload(size: usize, content_type: &str) -> Result<(), UploadError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge);
    }
    if !content_type.starts_with("image/") {
        return Err(UploadError::NotAnImage);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn accepts_small_png() {
        assert_matches!(validate_upload(1024, "image/png"), Ok(()));
    }

    #[test]
    fn accepts_exact_limit() {
        assert_matches!(validate_upload(MAX_UPLOAD_BYTES, "image/jpeg"), Ok(()));
    }

    #[test]
    fn rejects_one_byte_over_limit() {
        assert_matches!(
            validate_upload(MAX_UPLOAD_BYTES + 1, "image/png"),
            Err(UploadError::TooLarge)
        );
    }

    #[test]
    fn rejects_non_image_type() {
        assert_matches!(
            validate_upload(10, "application/pdf"),
            Err(UploadError::NotAnImage)
        );
    }

    #[test]
    fn rejects_empty_content_type() {
        assert_matches!(validate_upload(10, ""), Err(UploadError::NotAnImage));
    }

    #[test]
    fn size_check_wins_over_type_check() {
        // An oversized non-image reports the size problem.
        assert_matches!(
            validate_upload(MAX_UPLOAD_BYTES + 1, "text/plain"),
            Err(UploadError::TooLarge)
        );
    }

    #[test]
    fn error_messages_match_ui_copy() {
        assert_eq!(
            UploadError::TooLarge.to_string(),
            "File size must be less than 10MB"
        );
        assert_eq!(
            UploadError::NotAnImage.to_string(),
            "Please select an image file"
        );
    }
}
