//! Low-level HTTP client — `PerpexHttp`.
//!
//! One method per venue endpoint, returning wire types; conversion to domain
//! types happens at the order-module boundary. Success bodies are decoded
//! strictly: an empty or non-JSON 2xx is a protocol error, never a silent
//! success.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{ProtocolError, SdkError, SdkResult, TransportError};
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::order::wire::{OrderResponse, OrdersResponse, PlaceOrderRequest};
use crate::order::OrderApi;

/// Default request timeout. Bounds the Submitting phase of a submission.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Low-level HTTP client for the Perpex REST API.
#[derive(Clone)]
pub struct PerpexHttp {
    base_url: String,
    client: Client,
}

impl PerpexHttp {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout).pool_max_idle_per_host(10);
        }
        #[cfg(target_arch = "wasm32")]
        {
            let _ = timeout; // browser fetch owns the timeout on WASM
        }

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().expect("failed to build HTTP client"),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Orders ───────────────────────────────────────────────────────────

    /// `GET /api/orders` — the full order collection, unfiltered.
    pub async fn get_orders(&self) -> SdkResult<OrdersResponse> {
        let url = format!("{}/api/orders", self.base_url);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    /// `POST /api/orders` — submit a signed order.
    ///
    /// Never retried: the body carries a signature over a specific message,
    /// and re-submitting on an ambiguous failure could place it twice.
    pub async fn place_order(&self, body: &PlaceOrderRequest) -> SdkResult<OrderResponse> {
        let url = format!("{}/api/orders", self.base_url);
        self.post(&url, body, RetryPolicy::None).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str, retry: RetryPolicy) -> SdkResult<T> {
        self.request_with_retry(reqwest::Method::GET, url, None::<&()>, retry)
            .await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> SdkResult<T> {
        self.request_with_retry(reqwest::Method::POST, url, Some(body), retry)
            .await
    }

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
        retry: RetryPolicy,
    ) -> SdkResult<T> {
        let config = match &retry {
            RetryPolicy::None => {
                return self.do_request(&method, url, body).await;
            }
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request::<T, B>(&method, url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let should_retry = match &e {
                        SdkError::Transport(TransportError::Status { status, .. }) => {
                            config.retryable_statuses.contains(status)
                        }
                        SdkError::Transport(TransportError::TimedOut) => true,
                        SdkError::Transport(TransportError::Request(re)) => {
                            #[cfg(not(target_arch = "wasm32"))]
                            let retryable = re.is_connect() || re.is_request();
                            #[cfg(target_arch = "wasm32")]
                            let retryable = re.is_request();
                            retryable
                        }
                        // Protocol errors are not transient; retrying can't fix them.
                        _ => false,
                    };

                    if should_retry && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(SdkError::Transport(TransportError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        }))
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> SdkResult<T> {
        let mut req = self.client.request(method.clone(), url);
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await.map_err(map_reqwest_error)?;
        let status = resp.status().as_u16();
        let body_text = resp.text().await.map_err(map_reqwest_error)?;

        if (200..300).contains(&status) {
            return decode_body(&body_text).map_err(SdkError::Protocol);
        }

        Err(SdkError::Transport(TransportError::Status {
            status,
            detail: extract_error_detail(&body_text),
        }))
    }
}

impl OrderApi for PerpexHttp {
    async fn fetch_orders(&self) -> SdkResult<Vec<OrderResponse>> {
        Ok(self.get_orders().await?.orders)
    }

    async fn submit_order(&self, body: &PlaceOrderRequest) -> SdkResult<OrderResponse> {
        self.place_order(body).await
    }
}

fn map_reqwest_error(e: reqwest::Error) -> SdkError {
    if e.is_timeout() {
        SdkError::Transport(TransportError::TimedOut)
    } else {
        SdkError::Transport(TransportError::Request(e))
    }
}

/// Strictly decode a success body.
pub(crate) fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, ProtocolError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ProtocolError::EmptyBody);
    }
    serde_json::from_str(trimmed).map_err(|e| ProtocolError::MalformedBody(e.to_string()))
}

/// Error envelope some venue endpoints return on failure.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(alias = "error")]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// Pull a human-readable detail out of a failure body, preferring the JSON
/// envelope's message and falling back to the raw text verbatim.
fn extract_error_detail(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        if let Some(detail) = envelope.message.or(envelope.details) {
            return detail;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no detail provided".to_string()
    } else {
        trimmed.to_string()
    }
}
