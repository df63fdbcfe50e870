//! Resilience features for Purview API interactions
//!
//! Provides the shared retry policy used by the request dispatcher. All API
//! surfaces share the same rate-limiting and transient-failure behaviour, so
//! there is exactly one policy implementation.

pub mod retry;

pub use retry::{FailureClass, RetryConfig, RetryPolicy, parse_retry_after};
