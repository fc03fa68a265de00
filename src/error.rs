//! Unified SDK error types.
//!
//! Every failure is scoped to the single action that produced it; nothing in
//! this crate panics on a bad input or a bad response.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    /// Bad or out-of-range user input, caught before signing.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The wallet could not produce a signature.
    #[error("signer error: {0}")]
    Signer(#[from] SignerError),

    /// Network failure or a non-success response from the venue.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The venue answered with a success status but an unusable body.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A refresh target that no longer exists. Non-fatal.
    #[error("order {0} not found")]
    NotFound(String),

    /// The draft was cleared or superseded while a signature was pending;
    /// the signature was discarded without being acted upon.
    #[error("submission cancelled before completion")]
    Cancelled,

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type alias for SDK operations.
pub type SdkResult<T> = Result<T, SdkError>;

/// Input validation errors. All of these fire synchronously, before any
/// signing or network activity.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error(transparent)]
    Lots(#[from] crate::shared::lots::LotsError),

    #[error("invalid pair id '{0}': expected BASE/QUOTE")]
    Pair(String),

    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("price must be greater than zero")]
    ZeroPrice,

    #[error("malformed signature: {0}")]
    Signature(String),
}

/// Wallet signer errors.
///
/// The signer is an external collaborator; these are the only failure modes
/// its contract admits.
#[derive(Error, Debug)]
pub enum SignerError {
    /// The user declined the signature request.
    #[error("signature request rejected by user")]
    Rejected,

    /// No connected account, or the wallet cannot be reached.
    #[error("wallet unavailable: {0}")]
    Unavailable(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum TransportError {
    #[cfg(feature = "http")]
    #[error("request failed: {0}")]
    Request(reqwest::Error),

    #[error("request timed out")]
    TimedOut,

    /// Non-success status. `detail` carries the server-supplied error text
    /// verbatim, for user display.
    #[error("server rejected request ({status}): {detail}")]
    Status { status: u16, detail: String },

    #[error("max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// Malformed success responses.
///
/// A 2xx with an unusable body is never treated as success.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("empty response body from server")]
    EmptyBody,

    #[error("malformed response body: {0}")]
    MalformedBody(String),

    #[error("unknown order status '{0}'")]
    UnknownStatus(String),

    #[error("order {id}: filled amount {filled} exceeds amount {amount}")]
    InconsistentFill { id: String, filled: u64, amount: u64 },

    #[error("order {id}: lot value exceeds the safe integer range")]
    LotsOutOfRange { id: String },

    #[error("order {id}: invalid pair '{pair}'")]
    InvalidPair { id: String, pair: String },
}
