//! `clothswap-client` -- the job state controller.
//!
//! Drives one transformation attempt end-to-end: collecting and
//! validating inputs, submitting to the relay service, and exposing
//! only terminal, renderable states. The binary entrypoint lives in
//! `main.rs`.

pub mod controller;
pub mod relay;
pub mod upload;

pub use controller::{JobController, DOWNLOAD_FILENAME};
pub use relay::{HttpRelay, RelayError, RelayTransport, DEFAULT_RELAY_URL};
