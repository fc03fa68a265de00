//! Client-side order registry — the source of truth for the signed-in user's
//! orders.
//!
//! Only the registry mutates the order list; consumers get cloned snapshots.
//! Refreshes may overlap, so every fetch is stamped with an issuance sequence
//! number and a response is applied only if it outranks everything applied so
//! far — an early fetch completing late must not overwrite newer data.

use std::sync::atomic::{AtomicU64, Ordering};

use async_lock::RwLock;

use super::wire;
use super::{Order, OrderApi};
use crate::error::{SdkError, SdkResult};
use crate::shared::Address;

/// Tracks the authenticated user's orders, most recent first.
pub struct OrderRegistry<A> {
    api: A,
    orders: RwLock<Vec<Order>>,
    /// Next fetch sequence number to hand out.
    issue_seq: AtomicU64,
    /// Highest sequence whose response has been applied.
    applied_seq: AtomicU64,
}

impl<A: OrderApi> OrderRegistry<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            orders: RwLock::new(Vec::new()),
            issue_seq: AtomicU64::new(0),
            applied_seq: AtomicU64::new(0),
        }
    }

    /// Refresh the full order list for `owner`.
    ///
    /// The venue returns every order unfiltered; ownership is matched here
    /// with case-insensitive address comparison. Transport failures degrade
    /// to an empty result; the stored list is left intact.
    ///
    /// Returns the registry state after this refresh settled, which is the
    /// fetched list unless a later-issued refresh already landed.
    pub async fn fetch_all(&self, owner: &Address) -> Vec<Order> {
        let seq = self.issue_seq.fetch_add(1, Ordering::AcqRel) + 1;

        let rows = match self.api.fetch_orders().await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(error = %e, "order fetch failed; degrading to empty list");
                return Vec::new();
            }
        };

        let orders = Self::select_owned(rows, owner);
        self.apply(seq, orders).await
    }

    /// Refresh a single order by id.
    ///
    /// The venue has no get-by-id endpoint, so this refetches the collection
    /// and selects locally. A missing id is the distinct, non-fatal
    /// [`SdkError::NotFound`] — it does not disturb the rest of the list.
    pub async fn refresh_one(&self, owner: &Address, order_id: &str) -> SdkResult<Order> {
        let orders = self.fetch_all(owner).await;
        orders
            .into_iter()
            .find(|o| o.id == order_id)
            .ok_or_else(|| SdkError::NotFound(order_id.to_string()))
    }

    /// Prepend a freshly accepted order before any fetch confirms it.
    ///
    /// The venue assigns a fresh id on acceptance, so no dedup is needed;
    /// the next [`fetch_all`](Self::fetch_all) reconciles by id with server
    /// data taking precedence.
    pub async fn insert_optimistic(&self, order: Order) {
        let mut guard = self.orders.write().await;
        guard.insert(0, order);
    }

    /// Read-only snapshot of the current order list.
    pub async fn snapshot(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }

    /// Drop all client-side state (unmount/logout). The venue keeps history.
    pub async fn clear(&self) {
        let mut guard = self.orders.write().await;
        guard.clear();
        // Anything issued before the clear is stale by definition.
        self.applied_seq
            .store(self.issue_seq.load(Ordering::Acquire), Ordering::Release);
    }

    /// Filter to `owner`, convert, and sort most-recent first. Malformed rows
    /// are skipped with a warning rather than poisoning the whole refresh.
    fn select_owned(rows: Vec<wire::OrderResponse>, owner: &Address) -> Vec<Order> {
        let mut orders: Vec<Order> = Vec::with_capacity(rows.len());
        for row in rows {
            if Address::from(row.user_id.as_str()) != *owner {
                continue;
            }
            match Order::try_from(row) {
                Ok(order) => orders.push(order),
                Err(e) => tracing::warn!(error = %e, "skipping malformed order"),
            }
        }
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    /// Apply a fetch response unless a later-issued one already landed.
    /// Returns the post-application state either way.
    async fn apply(&self, seq: u64, orders: Vec<Order>) -> Vec<Order> {
        let mut guard = self.orders.write().await;
        if seq > self.applied_seq.load(Ordering::Acquire) {
            self.applied_seq.store(seq, Ordering::Release);
            *guard = orders;
        } else {
            tracing::debug!(seq, "discarding stale order fetch response");
        }
        guard.clone()
    }
}
