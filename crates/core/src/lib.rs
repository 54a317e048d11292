//! `clothswap-core` -- pure domain logic for the ClothSwap pipeline.
//!
//! Holds the job lifecycle states, upload validation rules, and the
//! result-URL extraction logic shared by the relay service and the
//! client controller. No I/O lives here.

pub mod error;
pub mod extract;
pub mod job;
pub mod validation;

pub use error::CoreError;
pub use extract::{extract_image_url, ExtractedUrl};
pub use job::{ImageUpload, JobState, TransformationRequest};
pub use validation::{validate_upload, UploadError, MAX_UPLOAD_BYTES};
