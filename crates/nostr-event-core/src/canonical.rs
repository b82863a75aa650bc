//! Canonical JSON-array encoding for deterministic serialization.
//!
//! The signed fields of an event are written as a compact JSON array with six
//! positional elements:
//!
//! ```text
//! [0,<pubkey>,<created_at>,<kind>,<tags>,<content>]
//! ```
//!
//! - Element 0 is the format marker, always `0`
//! - Integers are plain decimal: no leading zeros, no fraction, no exponent
//! - Strings escape `"`, `\` and the C0 controls, nothing else; non-ASCII is
//!   written as raw UTF-8
//! - No insignificant whitespace
//!
//! **CRITICAL**: This encoding is FROZEN. Any change alters every event id and
//! breaks every existing signature.

use crate::event::Event;
use crate::tag::Tag;
use crate::types::{Kind, Timestamp};

/// The leading format marker.
pub const FORMAT_VERSION: u64 = 0;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Encode the signed fields of an event to canonical bytes.
///
/// Total: every combination of inputs has exactly one encoding, and distinct
/// inputs never share one.
pub fn serialize(
    pubkey: &str,
    created_at: Timestamp,
    kind: Kind,
    tags: &[Tag],
    content: &str,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(96 + pubkey.len() + content.len());

    buf.push(b'[');
    encode_uint(&mut buf, FORMAT_VERSION);
    buf.push(b',');
    encode_text(&mut buf, pubkey);
    buf.push(b',');
    encode_int(&mut buf, created_at.as_secs());
    buf.push(b',');
    encode_uint(&mut buf, u64::from(kind.as_u16()));
    buf.push(b',');
    encode_tags(&mut buf, tags);
    buf.push(b',');
    encode_text(&mut buf, content);
    buf.push(b']');

    buf
}

/// Encode an event's signed fields to canonical bytes.
pub fn canonical_bytes(event: &Event) -> Vec<u8> {
    serialize(
        &event.pubkey,
        event.created_at,
        event.kind,
        event.tags.as_slice(),
        &event.content,
    )
}

fn encode_uint(buf: &mut Vec<u8>, n: u64) {
    buf.extend_from_slice(n.to_string().as_bytes());
}

fn encode_int(buf: &mut Vec<u8>, n: i64) {
    buf.extend_from_slice(n.to_string().as_bytes());
}

fn encode_tags(buf: &mut Vec<u8>, tags: &[Tag]) {
    buf.push(b'[');
    for (i, tag) in tags.iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        encode_array(buf, tag.as_slice());
    }
    buf.push(b']');
}

fn encode_array(buf: &mut Vec<u8>, items: &[String]) {
    buf.push(b'[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        encode_text(buf, item);
    }
    buf.push(b']');
}

/// Write a JSON string literal.
///
/// Works on bytes: every byte of a multi-byte UTF-8 sequence is >= 0x80, so
/// only single-byte code points can ever need escaping.
fn encode_text(buf: &mut Vec<u8>, s: &str) {
    let bytes = s.as_bytes();
    buf.push(b'"');

    let mut start = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        let short: &[u8] = match byte {
            b'"' => b"\\\"",
            b'\\' => b"\\\\",
            0x08 => b"\\b",
            0x09 => b"\\t",
            0x0a => b"\\n",
            0x0c => b"\\f",
            0x0d => b"\\r",
            0x00..=0x1f => b"",
            _ => continue,
        };

        buf.extend_from_slice(&bytes[start..i]);
        if short.is_empty() {
            buf.extend_from_slice(b"\\u00");
            buf.push(HEX_DIGITS[(byte >> 4) as usize]);
            buf.push(HEX_DIGITS[(byte & 0x0f) as usize]);
        } else {
            buf.extend_from_slice(short);
        }
        start = i + 1;
    }

    buf.extend_from_slice(&bytes[start..]);
    buf.push(b'"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ZERO_KEY: &str = "0000000000000000000000000000000000000000000000000000000000000000";

    fn text(s: &str) -> String {
        let mut buf = Vec::new();
        encode_text(&mut buf, s);
        String::from_utf8(buf).unwrap()
    }

    /// The same array built through a generic JSON serializer.
    fn serde_json_form(
        pubkey: &str,
        created_at: i64,
        kind: u16,
        tags: &[Vec<String>],
        content: &str,
    ) -> Vec<u8> {
        let value = serde_json::json!([0, pubkey, created_at, kind, tags, content]);
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn test_minimal_event_layout() {
        let bytes = serialize(ZERO_KEY, Timestamp::EPOCH, Kind::TEXT_NOTE, &[], "");
        let expected = format!("[0,\"{}\",0,1,[],\"\"]", ZERO_KEY);
        assert_eq!(String::from_utf8(bytes).unwrap(), expected);
    }

    #[test]
    fn test_tags_keep_order_at_both_levels() {
        let tags = vec![
            Tag::new(["p", "bb", "wss://relay"]),
            Tag::new(["e", "aa"]),
            Tag::new(Vec::<String>::new()),
        ];
        let bytes = serialize("ab", Timestamp::from_secs(1), Kind::from(7), &tags, "x");
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"[0,"ab",1,7,[["p","bb","wss://relay"],["e","aa"],[]],"x"]"#
        );
    }

    #[test]
    fn test_numbers_are_plain_decimal() {
        let bytes = serialize("", Timestamp::from_secs(-42), Kind::from(u16::MAX), &[], "");
        assert_eq!(String::from_utf8(bytes).unwrap(), r#"[0,"",-42,65535,[],""]"#);

        let bytes = serialize("", Timestamp::from_secs(1_700_000_000), Kind::METADATA, &[], "");
        assert_eq!(String::from_utf8(bytes).unwrap(), r#"[0,"",1700000000,0,[],""]"#);
    }

    #[test]
    fn test_short_escapes() {
        assert_eq!(text("a\"b"), r#""a\"b""#);
        assert_eq!(text("a\\b"), r#""a\\b""#);
        assert_eq!(text("\u{8}\t\n\u{c}\r"), r#""\b\t\n\f\r""#);
    }

    #[test]
    fn test_other_controls_use_unicode_escape() {
        assert_eq!(text("\u{0}"), r#""\u0000""#);
        assert_eq!(text("\u{1f}"), r#""\u001f""#);
        assert_eq!(text("a\u{b}b"), r#""a\u000bb""#);
    }

    #[test]
    fn test_passthrough_characters() {
        // slash, DEL and non-ASCII are written verbatim
        assert_eq!(text("a/b"), "\"a/b\"");
        assert_eq!(text("\u{7f}"), "\"\u{7f}\"");
        assert_eq!(text("héllo 🌍 日本"), "\"héllo 🌍 日本\"");
    }

    #[test]
    fn test_escape_is_injective_on_lookalikes() {
        // a literal backslash-n and a newline must not collide
        assert_ne!(text("\\n"), text("\n"));
        assert_ne!(text("\\u0000"), text("\u{0}"));
    }

    #[test]
    fn test_matches_serde_json_for_realistic_event() {
        let tags = vec![
            vec!["e".to_string(), "5c83da77af1dec6d7289834998ad7aafbd9e2191396d75ec3cc27f5a77226f36".to_string()],
            vec!["p".to_string(), "f7234bd4c1394dda46d09f35bd384dd30cc552ad5541990f98844fb06676e9ca".to_string()],
        ];
        let content = "Hello \"nostr\"\n\tfrom a\\b → ✓";
        let tag_list: Vec<Tag> = tags.iter().cloned().map(Tag::from).collect();

        let ours = serialize(ZERO_KEY, Timestamp::from_secs(1_673_347_337), Kind::TEXT_NOTE, &tag_list, content);
        let theirs = serde_json_form(ZERO_KEY, 1_673_347_337, 1, &tags, content);
        assert_eq!(ours, theirs);
    }

    proptest! {
        #[test]
        fn prop_matches_serde_json(
            pubkey in "[0-9a-f]{64}",
            created_at in any::<i64>(),
            kind in any::<u16>(),
            tags in prop::collection::vec(prop::collection::vec(any::<String>(), 0..4), 0..4),
            content in any::<String>(),
        ) {
            let tag_list: Vec<Tag> = tags.iter().cloned().map(Tag::from).collect();
            let ours = serialize(&pubkey, Timestamp::from_secs(created_at), Kind::from(kind), &tag_list, &content);
            let theirs = serde_json_form(&pubkey, created_at, kind, &tags, &content);
            prop_assert_eq!(ours, theirs);
        }

        #[test]
        fn prop_output_parses_back(content in any::<String>()) {
            let bytes = serialize(ZERO_KEY, Timestamp::EPOCH, Kind::TEXT_NOTE, &[], &content);
            let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            prop_assert_eq!(value[5].as_str(), Some(content.as_str()));
        }

        #[test]
        fn prop_distinct_content_distinct_bytes(a in any::<String>(), b in any::<String>()) {
            prop_assume!(a != b);
            let x = serialize(ZERO_KEY, Timestamp::EPOCH, Kind::TEXT_NOTE, &[], &a);
            let y = serialize(ZERO_KEY, Timestamp::EPOCH, Kind::TEXT_NOTE, &[], &b);
            prop_assert_ne!(x, y);
        }
    }
}
