//! Conversions: wire types → order domain types.

use super::wire;
use super::{Order, OrderStatus};
use crate::error::ProtocolError;
use crate::shared::{Address, PairId, Side, MAX_SAFE_LOTS};

impl TryFrom<wire::OrderResponse> for Order {
    type Error = ProtocolError;

    fn try_from(row: wire::OrderResponse) -> Result<Self, Self::Error> {
        if row.amount > MAX_SAFE_LOTS || row.price > MAX_SAFE_LOTS {
            return Err(ProtocolError::LotsOutOfRange { id: row.id });
        }

        if row.filled_amount > row.amount {
            return Err(ProtocolError::InconsistentFill {
                id: row.id,
                filled: row.filled_amount,
                amount: row.amount,
            });
        }

        let status: OrderStatus = row.status.parse()?;

        let pair = PairId::new(row.pair_id.as_str()).map_err(|_| ProtocolError::InvalidPair {
            id: row.id.clone(),
            pair: row.pair_id.clone(),
        })?;

        Ok(Order {
            id: row.id,
            owner: Address::from(row.user_id),
            pair,
            amount: row.amount,
            filled_amount: row.filled_amount,
            price: row.price,
            side: Side::from_bool(row.side),
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
