//! Error types for event serialization, signing and verification.

use thiserror::Error;

/// Errors returned by event operations.
///
/// Malformed inputs are errors. A well-formed signature that does not verify
/// is not: [`Event::check_signature`](crate::Event::check_signature) returns
/// `Ok(false)` for it.
#[derive(Debug, Error)]
pub enum Error {
    /// The public key is not 32 bytes of hex or is not an x-only curve point.
    #[error("invalid public key in `{field}`: {reason}")]
    InvalidPublicKey { field: &'static str, reason: String },

    /// The private key is malformed or outside `[1, n-1]`.
    ///
    /// The key material itself is never included.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// The signature is not hex or does not decode to exactly 64 bytes.
    #[error("invalid signature encoding: {0}")]
    InvalidSignatureEncoding(String),

    /// The secure random source could not supply auxiliary randomness.
    #[error("randomness unavailable: {0}")]
    RandomnessUnavailable(String),

    /// The event carries no id.
    #[error("event has no id")]
    MissingId,

    /// The stored id does not match the id recomputed from the event fields.
    #[error("id mismatch: stored {expected}, computed {actual}")]
    IdMismatch { expected: String, actual: String },

    /// The signature is well-formed but does not verify.
    #[error("signature verification failed")]
    SignatureFailed,

    #[error("too many tags: {actual} exceeds maximum of {max}")]
    TooManyTags { max: usize, actual: usize },

    #[error("content too long: {actual} bytes exceeds maximum of {max}")]
    ContentTooLong { max: usize, actual: usize },

    /// The event JSON could not be decoded.
    #[error("malformed event: {0}")]
    MalformedEvent(String),
}

impl Error {
    pub(crate) fn public_key(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidPublicKey {
            field,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::MalformedEvent(e.to_string())
    }
}

/// Result type for event operations.
pub type Result<T> = std::result::Result<T, Error>;
