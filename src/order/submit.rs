//! Order submission pipeline — build, sign, submit, record.
//!
//! One submission walks `Idle → Signing → Submitting → {Succeeded, Failed}`.
//! Validation and message building are synchronous and happen before anything
//! leaves the process; the network call never precedes the signature; the
//! transmitted body is serialized from the signed message itself. Failed is
//! terminal for the attempt — a retry is a fresh [`submit`](SubmissionPipeline::submit)
//! call that rebuilds and re-signs, because the draft may have changed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_lock::RwLock;

use super::message::{OrderMessage, SignedOrderRequest};
use super::registry::OrderRegistry;
use super::{Order, OrderApi, OrderDraft};
use crate::error::{SdkError, SdkResult, SignerError};
use crate::signer::{check_signature_format, WalletSigner};

/// Observable phase of the most recent submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    /// Awaiting wallet approval. May last indefinitely; the UI stays live.
    Signing,
    /// Signature obtained, network call in flight.
    Submitting,
    Succeeded,
    Failed,
}

/// Drives drafts through signing and submission, recording accepted orders
/// in the registry.
///
/// The registry handle is passed in explicitly — new orders reach the rest of
/// the app through it, not through any process-global hook.
pub struct SubmissionPipeline<S, A> {
    signer: S,
    api: A,
    registry: Arc<OrderRegistry<A>>,
    state: RwLock<SubmissionState>,
    /// Bumped by [`cancel_pending`](Self::cancel_pending); a signature that
    /// resolves under a stale epoch is discarded.
    epoch: AtomicU64,
}

impl<S, A> SubmissionPipeline<S, A>
where
    S: WalletSigner,
    A: OrderApi,
{
    pub fn new(signer: S, api: A, registry: Arc<OrderRegistry<A>>) -> Self {
        Self {
            signer,
            api,
            registry,
            state: RwLock::new(SubmissionState::Idle),
            epoch: AtomicU64::new(0),
        }
    }

    /// Current submission phase.
    pub async fn state(&self) -> SubmissionState {
        *self.state.read().await
    }

    /// Shared registry handle.
    pub fn registry(&self) -> &Arc<OrderRegistry<A>> {
        &self.registry
    }

    /// Invalidate any signature still pending approval.
    ///
    /// There is no way to abort the wallet's own prompt; instead, a signature
    /// arriving after this call is dropped on the floor and the attempt ends
    /// as [`SdkError::Cancelled`]. Call on navigation away or draft reset.
    pub fn cancel_pending(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
    }

    /// Return the pipeline to [`SubmissionState::Idle`] for a new attempt.
    pub async fn reset(&self) {
        *self.state.write().await = SubmissionState::Idle;
    }

    /// Submit a draft: quantize, sign, POST, record.
    ///
    /// On success the created [`Order`] has been optimistically inserted into
    /// the registry and is returned. Any failure leaves prior registry state
    /// intact and is scoped to this attempt.
    pub async fn submit(&self, draft: &OrderDraft) -> SdkResult<Order> {
        let outcome = self.submit_inner(draft).await;
        let final_state = if outcome.is_ok() {
            SubmissionState::Succeeded
        } else {
            SubmissionState::Failed
        };
        *self.state.write().await = final_state;
        outcome
    }

    async fn submit_inner(&self, draft: &OrderDraft) -> SdkResult<Order> {
        let connection = self.signer.connection();
        let owner = match (connection.is_connected, connection.address) {
            (true, Some(address)) => address,
            _ => {
                return Err(SdkError::Signer(SignerError::Unavailable(
                    "no connected account".to_string(),
                )))
            }
        };

        // Quantization and canonical encoding fail here, synchronously,
        // before a signature is ever requested.
        let message = OrderMessage::build(draft)?;
        let canonical = message.canonical_string()?;

        let epoch = self.epoch.load(Ordering::Acquire);
        *self.state.write().await = SubmissionState::Signing;
        tracing::debug!(pair = %message.pair_id, side = %message.side, "requesting wallet signature");

        let signature = self
            .signer
            .sign_message(&canonical)
            .await
            .map_err(SdkError::Signer)?;

        if self.epoch.load(Ordering::Acquire) != epoch {
            tracing::debug!("draft cleared while awaiting signature; discarding it");
            return Err(SdkError::Cancelled);
        }
        check_signature_format(&signature)?;

        let request = SignedOrderRequest::new(owner, message, canonical, signature);

        *self.state.write().await = SubmissionState::Submitting;
        let row = self.api.submit_order(&request.to_wire()).await?;
        let order = Order::try_from(row).map_err(SdkError::Protocol)?;

        tracing::debug!(order_id = %order.id, "order accepted");
        self.registry.insert_optimistic(order.clone()).await;

        Ok(order)
    }
}
