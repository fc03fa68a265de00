//! Wire types for the venue's order REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::serde_util;

/// Body of `POST /api/orders`.
///
/// Field values are exactly the signed values; the venue re-derives the
/// canonical message from them plus `user_id`, so nothing here may diverge
/// from what the wallet signed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaceOrderRequest {
    /// Order owner's address (hex).
    pub user_id: String,
    /// Trading pair, `"BASE/QUOTE"`.
    pub pair_id: String,
    /// Order size in lots.
    pub amount: u64,
    /// Limit price in lots. Omitted only when no price was signed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    /// `true` = buy, `false` = sell.
    pub side: bool,
    /// Wallet signature over the canonical message (hex, 0x-prefixed).
    pub signature: String,
}

/// A single order as returned by the venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub user_id: String,
    pub pair_id: String,
    pub amount: u64,
    pub filled_amount: u64,
    pub price: u64,
    pub side: bool,
    pub status: String,
    #[serde(with = "serde_util::timestamp_secs")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_util::timestamp_secs")]
    pub updated_at: DateTime<Utc>,
}

/// Envelope of `GET /api/orders`.
///
/// The venue also sends pagination bookkeeping (`total`, `page`, `limit`);
/// serde drops unknown fields, which is all the tolerance needed.
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
}
