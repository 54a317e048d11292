//! File loading for the CLI.
//!
//! A browser form supplies the declared content type with the file; on
//! the command line it has to be derived from the extension. Unknown
//! extensions map to `application/octet-stream` so the normal upload
//! validation rejects them.

use std::path::Path;

use clothswap_core::ImageUpload;

/// Map a file extension (lowercased) to a declared media type.
pub fn content_type_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Read a file from disk into an [`ImageUpload`].
///
/// Does not validate size or type; that stays with the controller's
/// selection path, exactly as a form selection would.
pub fn read_image_upload(path: &Path) -> std::io::Result<ImageUpload> {
    let bytes = std::fs::read(path)?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    let content_type = path
        .extension()
        .map(|e| content_type_for_extension(&e.to_string_lossy()))
        .unwrap_or("application/octet-stream")
        .to_string();

    Ok(ImageUpload {
        filename,
        content_type,
        bytes,
    })
}
