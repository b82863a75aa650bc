//! Identifier derivation: SHA-256 over the canonical bytes.
//!
//! `id = sha256(serialize(event))`
//!
//! The id is also the 32-byte message handed to the signature engine, so
//! verifiers only need the hash and the signature check, never any
//! content-specific logic.

use sha2::{Digest, Sha256};

use crate::canonical;
use crate::tag::Tag;
use crate::types::{EventId, Kind, Timestamp};

/// Hash canonical event bytes into an id.
pub fn derive_id(canonical_bytes: &[u8]) -> EventId {
    EventId(Sha256::digest(canonical_bytes).into())
}

/// Serialize the signed fields and hash them in one step.
pub fn compute_id(
    pubkey: &str,
    created_at: Timestamp,
    kind: Kind,
    tags: &[Tag],
    content: &str,
) -> EventId {
    derive_id(&canonical::serialize(pubkey, created_at, kind, tags, content))
}
