//! `clothswap-api` -- the Relay Service.
//!
//! Accepts a single multipart submission on `POST /api/clothswap`,
//! normalizes it into the payload contract of the configured forwarding
//! strategy, invokes the transformation worker exactly once, and returns
//! the worker's raw JSON response to the caller. Result-URL extraction
//! deliberately belongs to the client, not this service.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
