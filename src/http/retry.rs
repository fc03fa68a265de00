//! Retry policies for HTTP requests.
//!
//! Order submission is never retried automatically — re-sending a signed
//! order on an ambiguous failure risks placing it twice. Reads are safe to
//! retry and default to [`RetryPolicy::Idempotent`].

use std::time::Duration;

/// Retry policy for an HTTP request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// No retries. The default, and mandatory for order submission.
    #[default]
    None,
    /// Retry on transport failures, 5xx, and 429, with backoff and jitter.
    Idempotent,
    /// Caller-provided retry behavior.
    Custom(RetryConfig),
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retry attempts beyond the initial request.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Ceiling for the backoff delay.
    pub max_delay: Duration,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            retryable_statuses: vec![502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// The config used for idempotent (GET) requests.
    pub fn idempotent() -> Self {
        Self {
            retryable_statuses: vec![429, 502, 503, 504],
            ..Self::default()
        }
    }

    /// Delay before retry `attempt` (0-indexed): exponential backoff capped
    /// at `max_delay`, with ±25% jitter so synchronized clients don't stampede.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exp = self
            .base_delay
            .as_millis()
            .saturating_mul(1u128 << attempt.min(16)) as f64;
        let capped = exp.min(self.max_delay.as_millis() as f64);

        let jitter_range = capped * 0.25;
        let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
        Duration::from_millis((capped + jitter).max(0.0) as u64)
    }
}
