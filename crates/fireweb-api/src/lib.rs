//! HTTP client adapter for the transaction bridge API
//!
//! - client: [`ApiClient`] and one async operation per endpoint
//! - models: optional typed views over the returned payloads
//! - error: [`ApiError`] taxonomy (transport, timeout, HTTP status)

pub mod client;
pub mod error;
pub mod models;

pub use client::{decode_body, ApiClient};
pub use error::{ApiError, ApiErrorCode, ApiResult};
