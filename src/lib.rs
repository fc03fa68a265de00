//! # Perpex SDK
//!
//! Client-side order pipeline for the Perpex perpetual futures exchange,
//! usable from native and WASM (browser) hosts.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — shared newtypes, the fixed-point codec, the order domain
//!    (always available, WASM-safe)
//! 2. **Signer** — the wallet contract; signing happens in an external wallet
//! 3. **HTTP API** — `PerpexHttp` with per-endpoint retry policies
//! 4. **High-Level Client** — `PerpexClient` wiring transport, registry, and
//!    submission pipeline together
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use perpex::prelude::*;
//!
//! let client = PerpexClient::builder()
//!     .base_url("https://api.perpex.exchange")
//!     .build();
//!
//! let pipeline = client.pipeline(wallet);
//! let draft = OrderDraft {
//!     pair: PairId::new("ETH/USDC")?,
//!     side: Side::Buy,
//!     amount: "1.5".to_string(),
//!     kind: OrderKind::Limit { price: "3245.67".to_string() },
//! };
//! let order = pipeline.submit(&draft).await?;
//!
//! let open = client.registry().fetch_all(&order.owner).await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and the fixed-point codec.
pub mod shared;

/// Order domain: drafts, canonical messages, registry, submission pipeline.
pub mod order;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Signer ──────────────────────────────────────────────────────────

/// Wallet signer contract (implemented by the host, not this crate).
pub mod signer;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `PerpexClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes + codec
    pub use crate::shared::{
        decimal_to_lots, lots_to_decimal, Address, LotsError, PairId, Side, LOT_SCALE,
        MAX_SAFE_LOTS,
    };

    // Order domain
    pub use crate::order::{
        Order, OrderApi, OrderDraft, OrderKind, OrderMessage, OrderRegistry, OrderStatus,
        SignedOrderRequest, SubmissionPipeline, SubmissionState,
    };
    pub use crate::order::wire::{OrderResponse, OrdersResponse, PlaceOrderRequest};

    // Signer contract
    pub use crate::signer::{WalletConnection, WalletSigner};

    // Errors
    pub use crate::error::{
        ProtocolError, SdkError, SdkResult, SignerError, TransportError, ValidationError,
    };

    // Network
    pub use crate::network::{DEFAULT_API_URL, LOCAL_API_URL};

    // HTTP + high-level client
    #[cfg(feature = "http")]
    pub use crate::client::{PerpexClient, PerpexClientBuilder};
    #[cfg(feature = "http")]
    pub use crate::http::{PerpexHttp, RetryConfig, RetryPolicy};
}
