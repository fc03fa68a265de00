//! HTTP client layer — `PerpexHttp` with per-endpoint retry policies.

pub mod client;
pub mod retry;

pub use client::PerpexHttp;
pub use retry::{RetryConfig, RetryPolicy};
