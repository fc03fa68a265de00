//! High-level client — `PerpexClient` with the shared registry and pipeline
//! factory.
//!
//! The registry handle created here is the one the pipeline records accepted
//! orders into; handing it to consumers explicitly replaces the old pattern
//! of pushing new orders through a process-global callback.

use std::sync::Arc;
use std::time::Duration;

use crate::http::PerpexHttp;
use crate::order::{OrderRegistry, SubmissionPipeline};
use crate::signer::WalletSigner;

/// The primary entry point for the Perpex SDK.
pub struct PerpexClient {
    http: PerpexHttp,
    registry: Arc<OrderRegistry<PerpexHttp>>,
}

impl PerpexClient {
    pub fn builder() -> PerpexClientBuilder {
        PerpexClientBuilder::default()
    }

    /// Low-level HTTP client.
    pub fn http(&self) -> &PerpexHttp {
        &self.http
    }

    /// Shared order registry.
    pub fn registry(&self) -> &Arc<OrderRegistry<PerpexHttp>> {
        &self.registry
    }

    /// Build a submission pipeline around `signer`, wired to this client's
    /// transport and registry.
    pub fn pipeline<S: WalletSigner>(&self, signer: S) -> SubmissionPipeline<S, PerpexHttp> {
        SubmissionPipeline::new(signer, self.http.clone(), self.registry.clone())
    }
}

impl Clone for PerpexClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            registry: self.registry.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct PerpexClientBuilder {
    base_url: String,
    timeout: Duration,
}

impl Default for PerpexClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl PerpexClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> PerpexClient {
        let http = PerpexHttp::with_timeout(&self.base_url, self.timeout);
        let registry = Arc::new(OrderRegistry::new(http.clone()));
        PerpexClient { http, registry }
    }
}
