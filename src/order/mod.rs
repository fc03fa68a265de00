//! Order domain — drafts, canonical messages, submission, registry.

pub mod message;
pub mod registry;
pub mod submit;
pub mod wire;

mod convert;

use chrono::{DateTime, Utc};
use std::str::FromStr;

use crate::error::{ProtocolError, SdkResult};
use crate::shared::{lots_to_decimal, Address, PairId, Side};

pub use message::{OrderMessage, SignedOrderRequest};
pub use registry::OrderRegistry;
pub use submit::{SubmissionPipeline, SubmissionState};

// ─── OrderStatus ─────────────────────────────────────────────────────────────

/// Lifecycle status of an order. Assigned server-side; the client never edits
/// it locally, only replaces it wholesale on refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Resting, waiting to be filled.
    Pending,
    /// Partially filled, remainder still resting.
    PartiallyFilled,
    /// Completely filled.
    Filled,
    /// Cancelled before completion.
    Cancelled,
    /// Picked up by the epoch batcher.
    Batched,
    /// Settled on L1.
    Settled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::PartiallyFilled => "PartiallyFilled",
            OrderStatus::Filled => "Filled",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Batched => "Batched",
            OrderStatus::Settled => "Settled",
        }
    }

    /// Whether the order can still receive fills.
    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::PartiallyFilled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(OrderStatus::Pending),
            "PartiallyFilled" => Ok(OrderStatus::PartiallyFilled),
            "Filled" => Ok(OrderStatus::Filled),
            "Cancelled" => Ok(OrderStatus::Cancelled),
            "Batched" => Ok(OrderStatus::Batched),
            "Settled" => Ok(OrderStatus::Settled),
            other => Err(ProtocolError::UnknownStatus(other.to_string())),
        }
    }
}

// ─── Order ───────────────────────────────────────────────────────────────────

/// A validated, domain-level order as known to the venue.
///
/// Amounts and prices are integer lots; use the display helpers for
/// human-readable values.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub owner: Address,
    pub pair: PairId,
    pub amount: u64,
    pub filled_amount: u64,
    pub price: u64,
    pub side: Side,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Order size as a decimal string.
    pub fn amount_display(&self) -> String {
        lots_to_decimal(self.amount)
    }

    /// Order price as a decimal string.
    pub fn price_display(&self) -> String {
        lots_to_decimal(self.price)
    }

    /// Filled size as a decimal string.
    pub fn filled_display(&self) -> String {
        lots_to_decimal(self.filled_amount)
    }
}

// ─── OrderDraft ──────────────────────────────────────────────────────────────

/// Order parameters as entered in the UI, before quantization.
///
/// Amount and price are kept as the raw decimal strings the user typed;
/// quantization happens once, in [`OrderMessage::build`], at submit time.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub pair: PairId,
    pub side: Side,
    pub amount: String,
    pub kind: OrderKind,
}

/// Limit vs. market execution.
#[derive(Debug, Clone)]
pub enum OrderKind {
    Limit {
        price: String,
    },
    /// Market orders sign the currently displayed reference price; the venue
    /// verifies the same convention.
    Market {
        reference_price: String,
    },
}

// ─── OrderApi ────────────────────────────────────────────────────────────────

/// Transport seam consumed by the registry and the submission pipeline.
///
/// Implemented by [`PerpexHttp`](crate::http::PerpexHttp); test suites supply
/// their own doubles.
#[allow(async_fn_in_trait)]
pub trait OrderApi {
    /// Fetch the full order collection. The venue does not filter or
    /// paginate; owner filtering happens client-side.
    async fn fetch_orders(&self) -> SdkResult<Vec<wire::OrderResponse>>;

    /// Submit a signed order. Never retried automatically — a retry would
    /// require re-signing and could double-place.
    async fn submit_order(&self, body: &wire::PlaceOrderRequest) -> SdkResult<wire::OrderResponse>;
}
