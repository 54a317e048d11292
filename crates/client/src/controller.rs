//! The job state controller.
//!
//! Owns the lifecycle of a single transformation request: collecting
//! inputs, validating them at selection time, submitting once, and
//! exposing terminal states. One controller drives one job at a time;
//! submits while a job is in flight are rejected, not queued.

use clothswap_core::{
    extract_image_url, validate_upload, CoreError, ExtractedUrl, ImageUpload, JobState,
    TransformationRequest,
};

use crate::relay::RelayTransport;

/// Suggested filename for downloading the result.
pub const DOWNLOAD_FILENAME: &str = "clothswap-result.png";

/// Inline error shown when submit is attempted without a source image.
const MISSING_SOURCE_MESSAGE: &str = "Please select a source image";

/// Drives one transformation attempt end-to-end.
#[derive(Debug, Default)]
pub struct JobController {
    state: JobState,
    form: TransformationRequest,
    result_url: Option<String>,
    error: Option<String>,
}

impl JobController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current lifecycle state.
    pub fn state(&self) -> JobState {
        self.state
    }

    /// The visible inline error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The extracted result URL, present once the job is `Done`.
    pub fn result_url(&self) -> Option<&str> {
        self.result_url.as_deref()
    }

    /// The current form contents.
    pub fn form(&self) -> &TransformationRequest {
        &self.form
    }

    // -- input collection ---------------------------------------------------

    /// Select the person photo, validating it immediately.
    ///
    /// On failure the offending file is rejected, the slot stays empty,
    /// a visible error is set, and the job state does not change.
    pub fn select_source_image(&mut self, upload: ImageUpload) {
        self.select_into(upload, Slot::Source);
    }

    /// Select the garment reference, validating it immediately.
    pub fn select_reference_garment(&mut self, upload: ImageUpload) {
        self.select_into(upload, Slot::Garment);
    }

    /// Deselect the person photo.
    pub fn clear_source_image(&mut self) {
        self.form.source_image = None;
    }

    /// Deselect the garment reference.
    pub fn clear_reference_garment(&mut self) {
        self.form.reference_garment = None;
    }

    /// Replace the prompt text. Input changes never transition state.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.form.prompt = prompt.into();
    }

    /// Whether submit is currently allowed.
    pub fn can_submit(&self) -> bool {
        self.form.source_image.is_some() && self.state == JobState::Idle
    }

    // -- lifecycle ----------------------------------------------------------

    /// Submit the current form through the given transport.
    ///
    /// A no-op while a job is in flight or in a terminal state, and a
    /// no-op with an inline error when no source image is selected --
    /// neither case triggers a network call. Otherwise transitions
    /// `Idle -> Uploading -> Processing`, awaits the single relay call,
    /// and lands in `Done` (URL extracted) or `Error`.
    pub async fn submit(&mut self, relay: &dyn RelayTransport) {
        if self.state != JobState::Idle {
            return;
        }

        self.error = None;

        if self.form.source_image.is_none() {
            self.error = Some(MISSING_SOURCE_MESSAGE.to_string());
            return;
        }

        self.state = JobState::Uploading;
        tracing::info!("Submitting transformation request");

        // The friendlier "processing" label applies as soon as the call
        // is dispatched; it is not gated on any acknowledgement.
        self.state = JobState::Processing;

        match relay.submit(&self.form).await {
            Ok(body) => match extract_image_url(&body) {
                ExtractedUrl::Found(url) => {
                    tracing::info!(url = %url, "Transformation complete");
                    self.result_url = Some(url);
                    self.state = JobState::Done;
                }
                ExtractedUrl::NotFound => {
                    tracing::warn!(response = %body, "Worker response held no result URL");
                    self.error = Some(CoreError::Extraction.to_string());
                    self.state = JobState::Error;
                }
            },
            Err(e) => {
                tracing::error!(error = %e, "Relay call failed");
                self.error = Some(e.to_string());
                self.state = JobState::Error;
            }
        }
    }

    /// Return to `Idle`, discarding all inputs, the result, and the error.
    ///
    /// Invocable from any state, most usefully from `Done` and `Error`.
    pub fn reset(&mut self) {
        self.state = JobState::Idle;
        self.form.clear();
        self.result_url = None;
        self.error = None;
    }

    /// The result as a direct download target: URL plus suggested
    /// filename. No reachability check is performed.
    pub fn download_target(&self) -> Option<(&str, &'static str)> {
        match (self.state, self.result_url.as_deref()) {
            (JobState::Done, Some(url)) => Some((url, DOWNLOAD_FILENAME)),
            _ => None,
        }
    }

    // -- helpers ------------------------------------------------------------

    fn select_into(&mut self, upload: ImageUpload, slot: Slot) {
        if let Err(e) = validate_upload(upload.bytes.len(), &upload.content_type) {
            self.error = Some(e.to_string());
            // Reject and clear the selection; state is untouched.
            match slot {
                Slot::Source => self.form.source_image = None,
                Slot::Garment => self.form.reference_garment = None,
            }
            return;
        }

        self.error = None;
        match slot {
            Slot::Source => self.form.source_image = Some(upload),
            Slot::Garment => self.form.reference_garment = Some(upload),
        }
    }
}

enum Slot {
    Source,
    Garment,
}
