//! Event: the signed, content-addressed unit of the protocol.
//!
//! An event holds five signed fields (`pubkey`, `created_at`, `kind`, `tags`,
//! `content`) plus two derived ones (`id`, `sig`). Signing computes the digest
//! once and stores it as the id and signs it, so what is published as the id
//! is always exactly what was signed.
//!
//! The signed fields are public and can be changed after signing. Doing so
//! silently invalidates `id` and `sig`; re-sign after any change.

use serde::{Deserialize, Serialize};

use crate::canonical::canonical_bytes;
use crate::crypto::{Keys, PublicKey, Signature};
use crate::digest::derive_id;
use crate::entropy::{Entropy, OsEntropy};
use crate::error::{Error, Result};
use crate::tag::{Tag, Tags};
use crate::types::{EventId, Kind, Timestamp};
use crate::validation::{validate_event, ValidationConfig};

/// A protocol event.
///
/// Serializes to the wire object
/// `{"id","pubkey","created_at","kind","tags","content","sig"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// SHA-256 of the canonical bytes. `None` until signed or decoded.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_id"
    )]
    id: Option<EventId>,

    /// Author's x-only public key (hex).
    pub pubkey: String,

    /// Author-claimed creation time. Untrusted.
    pub created_at: Timestamp,

    pub kind: Kind,

    #[serde(default)]
    pub tags: Tags,

    #[serde(default)]
    pub content: String,

    /// Schnorr signature over the id (hex). Empty until signed.
    #[serde(default)]
    sig: String,
}

impl Event {
    /// Create an unsigned event.
    pub fn new(
        pubkey: impl Into<String>,
        created_at: Timestamp,
        kind: Kind,
        tags: impl Into<Tags>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            pubkey: pubkey.into(),
            created_at,
            kind,
            tags: tags.into(),
            content: content.into(),
            sig: String::new(),
        }
    }

    /// Decode an event from its JSON wire form.
    ///
    /// Nothing is verified here; see [`Event::check_signature`] and
    /// [`Event::verify`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode to the JSON wire form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Canonical bytes of the signed fields as currently held.
    pub fn serialize(&self) -> Vec<u8> {
        canonical_bytes(self)
    }

    /// Recompute the id from the current fields.
    pub fn compute_id(&self) -> EventId {
        derive_id(&self.serialize())
    }

    /// The stored id, if the event has been signed or decoded with one.
    pub fn id(&self) -> Option<EventId> {
        self.id
    }

    /// The stored signature as hex; empty if unsigned.
    pub fn sig(&self) -> &str {
        &self.sig
    }

    pub fn is_signed(&self) -> bool {
        self.id.is_some() && !self.sig.is_empty()
    }

    /// Sign with a hex-encoded secret key, using OS randomness.
    pub fn sign(&mut self, private_key_hex: &str) -> Result<()> {
        self.sign_with(private_key_hex, &mut OsEntropy)
    }

    /// Sign with a hex-encoded secret key and an explicit randomness source.
    ///
    /// On success `id` and `sig` are both replaced. On failure the event is
    /// left exactly as it was.
    pub fn sign_with<E: Entropy + ?Sized>(&mut self, private_key_hex: &str, entropy: &mut E) -> Result<()> {
        let keys = Keys::from_secret_hex(private_key_hex)?;
        self.sign_with_keys(&keys, entropy)
    }

    /// Sign with an already parsed keypair.
    ///
    /// `pubkey` must already hold the keypair's public key in lower-case hex;
    /// an unparsable, different or upper-case key is rejected as
    /// `InvalidPublicKey`.
    pub fn sign_with_keys<E: Entropy + ?Sized>(&mut self, keys: &Keys, entropy: &mut E) -> Result<()> {
        let author = PublicKey::parse("pubkey", &self.pubkey)?;
        if author != keys.public_key() {
            return Err(Error::public_key("pubkey", "does not match the signing key"));
        }
        if self.pubkey != author.to_hex() {
            return Err(Error::public_key("pubkey", "must be lower-case hex"));
        }

        let digest = self.compute_id();
        let signature = keys.sign(&digest, entropy)?;

        self.id = Some(digest);
        self.sig = signature.to_hex();

        tracing::debug!(id = %digest, kind = self.kind.as_u16(), "signed event");
        Ok(())
    }

    /// Check the signature against `pubkey` and the id recomputed from the
    /// current fields.
    ///
    /// Returns `Ok(false)` when the signature is well-formed but does not
    /// verify, including after any signed field was changed. Malformed
    /// `pubkey` or `sig` encodings are errors.
    pub fn check_signature(&self) -> Result<bool> {
        let author = PublicKey::parse("pubkey", &self.pubkey)?;
        let signature = Signature::from_hex(&self.sig)?;
        let digest = self.compute_id();

        let valid = author.verify(&digest, &signature);
        tracing::trace!(id = %digest, valid, "checked event signature");
        Ok(valid)
    }

    /// Full check with the default [`ValidationConfig`]: stored id matches the
    /// fields and the signature verifies.
    pub fn verify(&self) -> Result<()> {
        validate_event(self, &ValidationConfig::default())
    }
}

/// An absent, `null` or empty `id` decodes as unsigned, like an empty `sig`.
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<Option<EventId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => EventId::from_hex(&s)
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid event id: {e}"))),
    }
}

/// Builder for creating events.
#[derive(Debug, Clone)]
pub struct EventBuilder {
    kind: Kind,
    created_at: Option<Timestamp>,
    tags: Tags,
    content: String,
}

impl EventBuilder {
    /// Start building an event of the given kind.
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            created_at: None,
            tags: Tags::new(),
            content: String::new(),
        }
    }

    /// Start a text note.
    pub fn text_note(content: impl Into<String>) -> Self {
        Self::new(Kind::TEXT_NOTE).content(content)
    }

    /// Set the creation time. Defaults to the time of `build`.
    pub fn created_at(mut self, ts: Timestamp) -> Self {
        self.created_at = Some(ts);
        self
    }

    /// Append a tag.
    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Append several tags in order.
    pub fn tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        for tag in tags {
            self.tags.push(tag);
        }
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Build an unsigned event for the given author.
    pub fn build(self, pubkey: impl Into<String>) -> Event {
        Event::new(
            pubkey,
            self.created_at.unwrap_or_else(Timestamp::now),
            self.kind,
            self.tags,
            self.content,
        )
    }

    /// Build and sign with OS randomness.
    pub fn sign(self, keys: &Keys) -> Result<Event> {
        self.sign_with(keys, &mut OsEntropy)
    }

    /// Build and sign with an explicit randomness source.
    pub fn sign_with<E: Entropy + ?Sized>(self, keys: &Keys, entropy: &mut E) -> Result<Event> {
        let mut event = self.build(keys.public_key().to_hex());
        event.sign_with_keys(keys, entropy)?;
        Ok(event)
    }
}
