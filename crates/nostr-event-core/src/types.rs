//! Strong type definitions for events.
//!
//! Identifiers, timestamps and kinds are newtypes to prevent misuse at
//! compile time.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A 32-byte event identifier, computed as SHA-256(canonical_bytes(event)).
///
/// This is the content-address of an event and also the digest that gets
/// signed. Two events with the same signed fields have the same EventId.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub [u8; 32]);

impl EventId {
    /// Create a new EventId from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to lower-case hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut arr = [0u8; 32];
        hex::decode_to_slice(s, &mut arr)?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for EventId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for EventId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for EventId {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 32] = slice.try_into()?;
        Ok(Self(arr))
    }
}

impl Serialize for EventId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(|e| de::Error::custom(format!("invalid event id: {e}")))
    }
}

/// Creation time of an event in whole seconds since the Unix epoch (UTC).
///
/// Author-claimed and untrusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The Unix epoch.
    pub const EPOCH: Self = Self(0);

    /// Create from seconds since the Unix epoch.
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Seconds since the Unix epoch.
    pub const fn as_secs(&self) -> i64 {
        self.0
    }

    /// The current system time, sub-second part dropped.
    pub fn now() -> Self {
        Self::from(SystemTime::now())
    }
}

impl From<SystemTime> for Timestamp {
    /// Rounds toward the past, so times before the epoch with a fractional
    /// second land on the preceding whole second.
    fn from(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(since) => Self(since.as_secs() as i64),
            Err(err) => {
                let before = err.duration();
                let secs = before.as_secs() as i64;
                if before.subsec_nanos() > 0 {
                    Self(-secs - 1)
                } else {
                    Self(-secs)
                }
            }
        }
    }
}

impl From<i64> for Timestamp {
    fn from(secs: i64) -> Self {
        Self(secs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The semantic category of an event.
///
/// Open-ended: any `u16` is a valid kind. The associated constants name the
/// ones this crate knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kind(pub u16);

impl Kind {
    /// Profile metadata for the author.
    pub const METADATA: Self = Self(0);
    /// Short text note.
    pub const TEXT_NOTE: Self = Self(1);
    /// Relay recommendation.
    pub const RECOMMEND_SERVER: Self = Self(2);
    /// Follow list.
    pub const CONTACT_LIST: Self = Self(3);
    /// Encrypted direct message.
    pub const ENCRYPTED_DIRECT_MESSAGE: Self = Self(4);
    /// Request to delete earlier events.
    pub const DELETION: Self = Self(5);

    /// Convert to u16 for serialization.
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Human-readable name for the known kinds.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::METADATA => Some("metadata"),
            Self::TEXT_NOTE => Some("text-note"),
            Self::RECOMMEND_SERVER => Some("recommend-server"),
            Self::CONTACT_LIST => Some("contact-list"),
            Self::ENCRYPTED_DIRECT_MESSAGE => Some("encrypted-direct-message"),
            Self::DELETION => Some("deletion"),
            _ => None,
        }
    }
}

impl From<u16> for Kind {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", self.0, name),
            None => write!(f, "{}", self.0),
        }
    }
}
