//! Event validation: id and signature checks plus optional size limits.

use crate::error::{Error, Result};
use crate::event::Event;

/// What [`validate_event`] checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Require a stored id equal to the id recomputed from the fields.
    pub verify_id: bool,
    /// Require a signature that verifies against `pubkey`.
    pub verify_signature: bool,
    /// Maximum number of tags, if any.
    pub max_tags: Option<usize>,
    /// Maximum content length in bytes, if any.
    pub max_content_len: Option<usize>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            verify_id: true,
            verify_signature: true,
            max_tags: None,
            max_content_len: None,
        }
    }
}

impl ValidationConfig {
    /// Limits only; no cryptographic checks.
    pub fn limits_only() -> Self {
        Self {
            verify_id: false,
            verify_signature: false,
            ..Self::default()
        }
    }
}

/// Validate an event.
///
/// This performs, in order:
/// - Size limits
/// - Stored id vs recomputed id
/// - Signature verification
pub fn validate_event(event: &Event, config: &ValidationConfig) -> Result<()> {
    // 1. Limits
    if let Some(max) = config.max_tags {
        if event.tags.len() > max {
            return Err(Error::TooManyTags {
                max,
                actual: event.tags.len(),
            });
        }
    }
    if let Some(max) = config.max_content_len {
        if event.content.len() > max {
            return Err(Error::ContentTooLong {
                max,
                actual: event.content.len(),
            });
        }
    }

    // 2. Id
    if config.verify_id {
        let stored = event.id().ok_or(Error::MissingId)?;
        let computed = event.compute_id();
        if stored != computed {
            return Err(Error::IdMismatch {
                expected: stored.to_hex(),
                actual: computed.to_hex(),
            });
        }
    }

    // 3. Signature
    if config.verify_signature && !event.check_signature()? {
        return Err(Error::SignatureFailed);
    }

    tracing::trace!(id = ?event.id(), "event passed validation");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keys;
    use crate::event::EventBuilder;
    use crate::tag::Tag;
    use crate::types::{Kind, Timestamp};

    fn make_test_keys() -> Keys {
        Keys::from_secret_bytes(&[0x42; 32]).unwrap()
    }

    fn make_signed() -> Event {
        EventBuilder::text_note("hello")
            .created_at(Timestamp::from_secs(1_736_870_400))
            .tag(Tag::new(["t", "a"]))
            .tag(Tag::new(["t", "b"]))
            .sign(&make_test_keys())
            .unwrap()
    }

    #[test]
    fn test_valid_event() {
        assert!(validate_event(&make_signed(), &ValidationConfig::default()).is_ok());
    }

    #[test]
    fn test_missing_id() {
        let event = EventBuilder::text_note("hello").build(make_test_keys().public_key().to_hex());
        let result = validate_event(&event, &ValidationConfig::default());
        assert!(matches!(result, Err(Error::MissingId)));
    }

    #[test]
    fn test_id_mismatch_after_edit() {
        let mut event = make_signed();
        event.content = "tampered".into();

        let result = validate_event(&event, &ValidationConfig::default());
        match result {
            Err(Error::IdMismatch { expected, actual }) => {
                assert_eq!(expected, make_signed().id().unwrap().to_hex());
                assert_eq!(actual, event.compute_id().to_hex());
            }
            other => panic!("expected IdMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_signature_failed() {
        let mut event = make_signed();
        event.kind = Kind::METADATA;

        let config = ValidationConfig {
            verify_id: false,
            ..ValidationConfig::default()
        };
        assert!(matches!(validate_event(&event, &config), Err(Error::SignatureFailed)));
    }

    #[test]
    fn test_signature_encoding_error_propagates() {
        let mut event = make_signed();
        event.pubkey = "00".into();
        let config = ValidationConfig {
            verify_id: false,
            ..ValidationConfig::default()
        };
        assert!(matches!(
            validate_event(&event, &config),
            Err(Error::InvalidPublicKey { .. })
        ));
    }

    #[test]
    fn test_too_many_tags() {
        let config = ValidationConfig {
            max_tags: Some(1),
            ..ValidationConfig::default()
        };
        let result = validate_event(&make_signed(), &config);
        assert!(matches!(result, Err(Error::TooManyTags { max: 1, actual: 2 })));
    }

    #[test]
    fn test_content_too_long() {
        let config = ValidationConfig {
            max_content_len: Some(4),
            ..ValidationConfig::limits_only()
        };
        let result = validate_event(&make_signed(), &config);
        assert!(matches!(result, Err(Error::ContentTooLong { max: 4, actual: 5 })));
    }

    #[test]
    fn test_limits_only_skips_crypto() {
        let unsigned = EventBuilder::text_note("hi").build("not-a-key");
        assert!(validate_event(&unsigned, &ValidationConfig::limits_only()).is_ok());
    }
}
