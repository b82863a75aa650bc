//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::OnceLock;

use nostr_event_core::{
    Entropy, Error, Event, EventBuilder, EventId, FixedEntropy, Keys, Kind, PublicKey, Result, Tag,
    Timestamp,
};

/// A test fixture with a keypair and pinned signing randomness.
#[derive(Debug, Clone)]
pub struct TestFixture {
    pub keys: Keys,
    /// Auxiliary randomness for every signature this fixture makes.
    pub aux_rand: [u8; 32],
    /// Creation time stamped on built events.
    pub now: Timestamp,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self {
            keys: Keys::generate(),
            aux_rand: [0u8; 32],
            now: Timestamp::now(),
        }
    }

    /// Create with a deterministic keypair, time and randomness from a seed.
    ///
    /// Panics if `seed` is not a valid secret key (zero or not below the
    /// curve order).
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keys: Keys::from_secret_bytes(&seed).expect("fixture seed must be a valid secret key"),
            aux_rand: [0u8; 32],
            now: Timestamp::from_secs(1_700_000_000),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        self.keys.public_key()
    }

    /// Hex public key, as stored in `Event::pubkey`.
    pub fn pubkey_hex(&self) -> String {
        self.keys.public_key().to_hex()
    }

    /// Build and sign an event.
    pub fn make_event(&self, kind: Kind, tags: Vec<Tag>, content: &str) -> Event {
        EventBuilder::new(kind)
            .created_at(self.now)
            .tags(tags)
            .content(content)
            .sign_with(&self.keys, &mut FixedEntropy(self.aux_rand))
            .expect("fixture keys always sign")
    }

    /// Create a text note.
    pub fn make_text_note(&self, content: &str) -> Event {
        self.make_event(Kind::TEXT_NOTE, Vec::new(), content)
    }

    /// Create a reply referencing another event and its author.
    pub fn make_reply(&self, parent: &Event, content: &str) -> Event {
        let parent_id = parent.id().map(|id| id.to_hex()).unwrap_or_default();
        self.make_event(
            Kind::TEXT_NOTE,
            vec![
                Tag::new(["e", parent_id.as_str()]),
                Tag::new(["p", parent.pubkey.as_str()]),
            ],
            content,
        )
    }

    /// Create a deletion request for the given events.
    pub fn make_deletion(&self, targets: &[EventId], reason: &str) -> Event {
        let tags = targets
            .iter()
            .map(|id| Tag::new(["e".to_string(), id.to_hex()]))
            .collect();
        self.make_event(Kind::DELETION, tags, reason)
    }

    /// Create profile metadata.
    pub fn make_metadata(&self, metadata: &serde_json::Value) -> Event {
        self.make_event(Kind::METADATA, Vec::new(), &metadata.to_string())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0x11u8; 32];
            seed[0] = i as u8;
            TestFixture::with_seed(seed)
        })
        .collect()
}

/// An [`Entropy`] source that always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableEntropy;

impl Entropy for UnavailableEntropy {
    fn fill_aux(&mut self) -> Result<[u8; 32]> {
        Err(Error::RandomnessUnavailable("entropy source disabled".into()))
    }
}

/// An [`Entropy`] source that records how many times it was drawn from.
#[derive(Debug, Clone, Default)]
pub struct CountingEntropy {
    pub draws: usize,
}

impl Entropy for CountingEntropy {
    fn fill_aux(&mut self) -> Result<[u8; 32]> {
        self.draws += 1;
        let mut aux = [0u8; 32];
        aux[..8].copy_from_slice(&(self.draws as u64).to_be_bytes());
        Ok(aux)
    }
}

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Filter comes from `RUST_LOG`, defaulting to `warn`. Safe to call from
/// every test.
pub fn init_tracing() {
    static ONCE: OnceLock<()> = OnceLock::new();
    ONCE.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_text_note() {
        init_tracing();
        let fixture = TestFixture::new();
        let note = fixture.make_text_note("hello");

        assert_eq!(note.kind, Kind::TEXT_NOTE);
        assert_eq!(note.pubkey, fixture.pubkey_hex());
        assert!(note.check_signature().unwrap());
    }

    #[test]
    fn test_seeded_fixture_is_reproducible() {
        let a = TestFixture::with_seed([0x42; 32]).make_text_note("same");
        let b = TestFixture::with_seed([0x42; 32]).make_text_note("same");
        assert_eq!(a, b);
    }

    #[test]
    fn test_fixture_thread() {
        let parties = multi_party_fixtures(2);
        let root = parties[0].make_text_note("root");
        let reply = parties[1].make_reply(&root, "reply");

        assert_eq!(reply.tags.find("e").and_then(Tag::value), Some(root.id().unwrap().to_hex().as_str()));
        assert_eq!(reply.tags.find("p").and_then(Tag::value), Some(root.pubkey.as_str()));
        assert!(reply.verify().is_ok());
    }

    #[test]
    fn test_fixture_deletion() {
        let fixture = TestFixture::with_seed([0x42; 32]);
        let a = fixture.make_text_note("a");
        let b = fixture.make_text_note("b");
        let deletion = fixture.make_deletion(&[a.id().unwrap(), b.id().unwrap()], "oops");

        assert_eq!(deletion.kind, Kind::DELETION);
        let targets: Vec<_> = deletion.tags.values("e").collect();
        assert_eq!(targets, vec![a.id().unwrap().to_hex(), b.id().unwrap().to_hex()]);
    }

    #[test]
    fn test_fixture_metadata() {
        let fixture = TestFixture::with_seed([0x42; 32]);
        let event = fixture.make_metadata(&serde_json::json!({"name": "alice"}));

        assert_eq!(event.kind, Kind::METADATA);
        assert_eq!(event.content, r#"{"name":"alice"}"#);
    }

    #[test]
    fn test_multi_party() {
        let parties = multi_party_fixtures(3);

        // Each party has unique keys
        let pks: Vec<_> = parties.iter().map(|p| p.public_key()).collect();
        assert_ne!(pks[0], pks[1]);
        assert_ne!(pks[1], pks[2]);
        assert_ne!(pks[0], pks[2]);
    }

    #[test]
    fn test_unavailable_entropy_fails_signing() {
        let fixture = TestFixture::with_seed([0x42; 32]);
        let result = EventBuilder::text_note("x").sign_with(&fixture.keys, &mut UnavailableEntropy);
        assert!(matches!(result, Err(Error::RandomnessUnavailable(_))));
    }

    #[test]
    fn test_each_signature_draws_once() {
        let fixture = TestFixture::with_seed([0x42; 32]);
        let mut entropy = CountingEntropy::default();

        let mut event = fixture.make_text_note("count me");
        event.sign_with_keys(&fixture.keys, &mut entropy).unwrap();
        event.sign_with_keys(&fixture.keys, &mut entropy).unwrap();

        assert_eq!(entropy.draws, 2);
        assert!(event.check_signature().unwrap());
    }
}
