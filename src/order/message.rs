//! Canonical order messages and the signed request built from them.
//!
//! The wallet signs the exact string produced here, and the venue re-derives
//! the same string from the submitted numeric fields plus the owner address.
//! Any reordering, whitespace, or integer/float mismatch invalidates the
//! signature — which is why the message carries lots, never decimals, and why
//! serialization is locked to compact JSON in declared field order.

use serde::Serialize;

use super::wire;
use super::{OrderDraft, OrderKind};
use crate::error::ValidationError;
use crate::shared::{decimal_to_lots, Address, PairId, Side};

/// The message a wallet signs to place an order.
///
/// Field declaration order is the canonical wire order — `serde_json` emits
/// struct fields in this order, with no whitespace, matching what the venue
/// verifies byte-for-byte. Do not reorder.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OrderMessage {
    pub pair_id: PairId,
    pub amount: u64,
    pub price: u64,
    pub side: Side,
}

impl OrderMessage {
    /// Quantize a draft into a signable message.
    ///
    /// Both amount and price pass through the fixed-point codec; zero values
    /// are rejected here so no signature is ever requested for a vacuous
    /// order. No rounding happens past this point.
    pub fn build(draft: &OrderDraft) -> Result<Self, ValidationError> {
        let amount = decimal_to_lots(&draft.amount)?;
        if amount == 0 {
            return Err(ValidationError::ZeroAmount);
        }

        let price_text = match &draft.kind {
            OrderKind::Limit { price } => price,
            OrderKind::Market { reference_price } => reference_price,
        };
        let price = decimal_to_lots(price_text)?;
        if price == 0 {
            return Err(ValidationError::ZeroPrice);
        }

        Ok(Self {
            pair_id: draft.pair.clone(),
            amount,
            price,
            side: draft.side,
        })
    }

    /// The canonical string this message signs as.
    ///
    /// Deterministic: identical messages yield byte-identical output.
    pub fn canonical_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// An order message bound to its owner and signature.
///
/// Immutable once constructed — fields are private and the wire body is
/// serialized straight from the signed values, so nothing can drift between
/// signing and submission.
#[derive(Debug, Clone)]
pub struct SignedOrderRequest {
    owner: Address,
    message: OrderMessage,
    canonical: String,
    signature: String,
}

impl SignedOrderRequest {
    pub fn new(owner: Address, message: OrderMessage, canonical: String, signature: String) -> Self {
        Self {
            owner,
            message,
            canonical,
            signature,
        }
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn message(&self) -> &OrderMessage {
        &self.message
    }

    /// The exact string the wallet signed.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub(crate) fn to_wire(&self) -> wire::PlaceOrderRequest {
        wire::PlaceOrderRequest {
            user_id: self.owner.as_str().to_string(),
            pair_id: self.message.pair_id.as_str().to_string(),
            amount: self.message.amount,
            price: Some(self.message.price),
            side: self.message.side.as_bool(),
            signature: self.signature.clone(),
        }
    }
}
