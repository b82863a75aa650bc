//! # Nostr Event Core
//!
//! Canonical serialization, content-addressed identifiers and BIP-340
//! Schnorr signatures for protocol events.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over events; the only outside input is auxiliary randomness
//! while signing.
//!
//! ## Key Types
//!
//! - [`Event`] - The signed unit: five signed fields plus `id` and `sig`
//! - [`EventId`] - SHA-256 of the canonical bytes, also the signed digest
//! - [`Keys`] - secp256k1 keypair with x-only [`PublicKey`]
//! - [`Entropy`] - Injected source of signing randomness
//!
//! ## Canonicalization
//!
//! Events are encoded as a positional JSON array, see [`canonical`].
//!
//! ```rust
//! use nostr_event_core::{EventBuilder, Keys, Tag};
//!
//! let keys = Keys::generate();
//! let event = EventBuilder::text_note("hello")
//!     .tag(Tag::new(["t", "intro"]))
//!     .sign(&keys)
//!     .unwrap();
//!
//! assert_eq!(event.id(), Some(event.compute_id()));
//! assert!(event.check_signature().unwrap());
//! ```

pub mod canonical;
pub mod crypto;
pub mod digest;
pub mod entropy;
pub mod error;
pub mod event;
pub mod tag;
pub mod types;
pub mod validation;

pub use canonical::{canonical_bytes, serialize};
pub use crypto::{sign_digest, verify_digest, Keys, PublicKey, Signature};
pub use digest::{compute_id, derive_id};
pub use entropy::{Entropy, FixedEntropy, OsEntropy, RngEntropy};
pub use error::{Error, Result};
pub use event::{Event, EventBuilder};
pub use tag::{Tag, Tags};
pub use types::{EventId, Kind, Timestamp};
pub use validation::{validate_event, ValidationConfig};
