//! Job lifecycle states and the client-side form model.

use serde::{Deserialize, Serialize};

/// Lifecycle stage of a single transformation attempt.
///
/// Exactly one state is live at a time per submission. `Done` and
/// `Error` are terminal until the user explicitly resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    /// Collecting inputs; nothing submitted yet.
    #[default]
    Idle,
    /// Submit accepted; the outbound call is being assembled.
    Uploading,
    /// The relay call has been dispatched; awaiting the worker.
    Processing,
    /// A result URL was extracted.
    Done,
    /// The attempt failed (transport, upstream, or extraction).
    Error,
}

impl JobState {
    /// Terminal states require an explicit reset before a new attempt.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Done | JobState::Error)
    }

    /// A job in flight blocks new submissions (disabled, not queued).
    pub fn is_busy(self) -> bool {
        matches!(self, JobState::Uploading | JobState::Processing)
    }
}

/// One selected image file: declared metadata plus owned bytes.
///
/// Bytes are allocated fresh per job and dropped once the request
/// completes; nothing retains them across submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original filename as selected.
    pub filename: String,
    /// Declared media type (e.g. `image/png`).
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// The client-side form model for one transformation request.
///
/// Lives only for a single submission. The source image must be
/// present and validated before submission is allowed.
#[derive(Debug, Default, Clone)]
pub struct TransformationRequest {
    /// The person photo (required before submit).
    pub source_image: Option<ImageUpload>,
    /// The garment reference (optional).
    pub reference_garment: Option<ImageUpload>,
    /// Free-text garment description; whitespace-only counts as absent.
    pub prompt: String,
}

impl TransformationRequest {
    /// The prompt with surrounding whitespace removed, or `None` when
    /// nothing meaningful was entered.
    pub fn trimmed_prompt(&self) -> Option<&str> {
        let trimmed = self.prompt.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }

    /// Discard all held inputs, returning the form to its initial state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
