//! # Nostr Event Testkit
//!
//! Testing utilities for `nostr-event-core`.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known events with expected canonical bytes, ids and
//!   signatures for cross-implementation verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Seeded signers, entropy doubles and a test log subscriber
//!
//! ## Golden Vectors
//!
//! ```rust
//! use nostr_event_testkit::vectors::{all_vectors, signed_event_from_vector};
//!
//! for vector in all_vectors() {
//!     let event = signed_event_from_vector(&vector);
//!     assert_eq!(event.id().unwrap().to_hex(), vector.expected_id);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use nostr_event_testkit::generators::{event_from_params, EventParams};
//!
//! proptest! {
//!     #[test]
//!     fn signed_events_check(params: EventParams) {
//!         let event = event_from_params(&params);
//!         prop_assert!(event.check_signature().unwrap());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use nostr_event_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::with_seed([0x42; 32]);
//! let note = fixture.make_text_note("hello");
//! assert!(note.verify().is_ok());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{init_tracing, multi_party_fixtures, CountingEntropy, TestFixture, UnavailableEntropy};
pub use generators::{event_from_params, unsigned_from_params, EventParams};
pub use vectors::{all_vectors, event_from_vector, signed_event_from_vector, verify_all_vectors, GoldenVector};
