//! Wallet signer contract.
//!
//! Signing happens in an external wallet application; the SDK only consumes
//! the contract. A request may suspend indefinitely while the user decides —
//! callers must stay responsive during that wait and use
//! [`SubmissionPipeline::cancel_pending`](crate::order::SubmissionPipeline::cancel_pending)
//! if the draft is abandoned meanwhile.

use crate::error::{SignerError, ValidationError};
use crate::shared::Address;

/// Connection state reported by the wallet.
#[derive(Debug, Clone)]
pub struct WalletConnection {
    /// Address of the active account, if any.
    pub address: Option<Address>,
    /// Whether the wallet session is live.
    pub is_connected: bool,
}

impl WalletConnection {
    pub fn connected(address: Address) -> Self {
        Self {
            address: Some(address),
            is_connected: true,
        }
    }

    pub fn disconnected() -> Self {
        Self {
            address: None,
            is_connected: false,
        }
    }
}

/// A wallet capable of signing arbitrary messages for its active account.
///
/// Exactly one signature is requested per canonical message, and the message
/// is never mutated between signing and submission.
#[allow(async_fn_in_trait)]
pub trait WalletSigner {
    /// Current connection state.
    fn connection(&self) -> WalletConnection;

    /// Sign `message` with the active account's key.
    ///
    /// Resolves once the user approves in the wallet UI. May stay pending
    /// indefinitely; fails with [`SignerError::Rejected`] on refusal or
    /// [`SignerError::Unavailable`] when no account is usable.
    async fn sign_message(&self, message: &str) -> Result<String, SignerError>;
}

/// Check that a signature is 0x-prefixed 65-byte hex before it is submitted.
/// The venue rejects anything else.
pub fn check_signature_format(signature: &str) -> Result<(), ValidationError> {
    let hex_part = signature.strip_prefix("0x").unwrap_or(signature);
    if hex_part.len() != 130 {
        return Err(ValidationError::Signature(format!(
            "expected 65-byte hex signature, got {} hex chars",
            hex_part.len()
        )));
    }
    hex::decode(hex_part).map_err(|e| ValidationError::Signature(e.to_string()))?;
    Ok(())
}
