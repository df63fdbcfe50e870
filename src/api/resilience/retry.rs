//! Retry policy with exponential backoff for transient Purview API failures
//!
//! The retry loop itself lives in the dispatcher (`PurviewClient::send`); this
//! module owns the policy: which outcomes are retryable and how long to wait
//! before the next attempt. One policy instance is shared by every resource
//! client so rate-limiting behaviour is uniform across API surfaces.

use std::time::Duration;

use rand::Rng;

/// Configuration for retry behavior.
///
/// The backend does not formally specify its rate-limit window, so the
/// fallback backoff constants here are a client-side policy choice and stay
/// configurable rather than hardcoded at call sites.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts including the first one
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Conservative config for production
    pub fn conservative() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 1.5,
            jitter: true,
        }
    }

    /// No retries at all (single attempt), for tests and dry runs
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }
}

/// Classification of a single attempt's outcome
#[derive(Debug, Clone, PartialEq)]
pub enum FailureClass {
    /// HTTP 429 Too Many Requests
    RateLimited,
    /// HTTP 5xx server errors
    ServerError(u16),
    /// Transport-level errors (connect failure, timeout)
    Network,
    /// Non-retryable client errors (4xx except 429)
    ClientError(u16),
}

impl FailureClass {
    pub fn should_retry(&self) -> bool {
        match self {
            FailureClass::RateLimited => true,
            FailureClass::ServerError(_) => true,
            FailureClass::Network => true,
            FailureClass::ClientError(_) => false,
        }
    }

    pub fn from_status_code(status: u16) -> Self {
        match status {
            429 => FailureClass::RateLimited,
            500..=599 => FailureClass::ServerError(status),
            other => FailureClass::ClientError(other),
        }
    }

    /// Timeouts and connection failures are transient; anything else from the
    /// transport layer is treated as terminal.
    pub fn from_reqwest_error(error: &reqwest::Error) -> Self {
        if error.is_timeout() || error.is_connect() {
            FailureClass::Network
        } else if let Some(status) = error.status() {
            Self::from_status_code(status.as_u16())
        } else {
            FailureClass::Network
        }
    }
}

/// Retry policy implementing capped exponential backoff with optional jitter,
/// honoring `Retry-After` when the server provides one.
#[derive(Debug, Clone, Default)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts
    }

    /// Delay before the attempt following `attempt` (1-based). A server
    /// supplied `Retry-After` wins over the computed backoff.
    pub fn delay_after(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        match retry_after {
            Some(wait) => wait,
            None => self.backoff_delay(attempt),
        }
    }

    /// Capped exponential backoff
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let delay_ms = (self.config.base_delay.as_millis() as f64)
            * self.config.backoff_multiplier.powi(attempt as i32 - 1);

        let mut delay = Duration::from_millis(delay_ms as u64);
        if delay > self.config.max_delay {
            delay = self.config.max_delay;
        }

        if self.config.jitter {
            let jitter_factor = rand::thread_rng().gen_range(0.5..=1.5);
            delay = Duration::from_millis((delay.as_millis() as f64 * jitter_factor) as u64);
        }

        delay
    }
}

/// Parse an integer-seconds `Retry-After` header value
pub fn parse_retry_after(value: Option<&str>) -> Option<Duration> {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
