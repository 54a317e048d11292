//! `clothswap-n8n` -- client for the upstream n8n transformation webhook.
//!
//! Wraps the webhook's HTTP surface ([`api`]), the object-storage upload
//! capability ([`storage`]), and the two mutually exclusive forwarding
//! strategies that translate a relay submission into the webhook's
//! expected payload ([`forward`]).

pub mod api;
pub mod forward;
pub mod storage;

pub use api::{N8nApi, N8nApiError, DEFAULT_WEBHOOK_URL};
pub use forward::{ForwardError, ForwardStrategy, ImagePart, RawForwarder, Submission, UrlForwarder};
pub use storage::{HttpObjectStorage, ObjectStorage, StorageError};
