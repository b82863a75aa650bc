//! Golden test vectors for deterministic verification.
//!
//! Every vector pins the derived public key, the canonical bytes, the id and
//! the signature produced with all-zero auxiliary randomness. Any conforming
//! implementation must reproduce them exactly.

use nostr_event_core::{Event, FixedEntropy, Keys, Kind, Tag, Timestamp};

/// Auxiliary randomness used for every vector signature.
pub const VECTOR_AUX_RAND: [u8; 32] = [0u8; 32];

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Secret key bytes.
    pub secret_key: [u8; 32],
    pub created_at: i64,
    pub kind: u16,
    pub tags: &'static [&'static [&'static str]],
    pub content: &'static str,
    /// Expected x-only public key (hex).
    pub expected_pubkey: &'static str,
    /// Expected canonical serialization.
    pub expected_canonical: &'static str,
    /// Expected event id (hex).
    pub expected_id: &'static str,
    /// Expected signature (hex) with [`VECTOR_AUX_RAND`].
    pub expected_sig: &'static str,
}

impl GoldenVector {
    pub fn keys(&self) -> Keys {
        Keys::from_secret_bytes(&self.secret_key).expect("vector secret keys are valid scalars")
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.tags.iter().map(|t| Tag::new(t.iter().copied())).collect()
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "text_note",
            secret_key: [0x01; 32],
            created_at: 1700000000,
            kind: 1,
            tags: &[],
            content: "hello world",
            expected_pubkey: "1b84c5567b126440995d3ed5aaba0565d71e1834604819ff9c17f5e9d5dd078f",
            expected_canonical: "[0,\"1b84c5567b126440995d3ed5aaba0565d71e1834604819ff9c17f5e9d5dd078f\",1700000000,1,[],\"hello world\"]",
            expected_id: "ef00e16f6b8bc091ff2ebf87cb1d4a8d3d882983150a74806998b103cc2c20b8",
            expected_sig: "475dd4fd3d40f638353d12f6680a9274276fb7a2453c1b982751ff5b474bcf8a819a4ab3d4062c785de8b3e9a56bda02d3c2e852e21be4db178eca1cd067c981",
        },
        GoldenVector {
            name: "tagged_note",
            secret_key: [0x02; 32],
            created_at: 1736870400,
            kind: 1,
            tags: &[&["e", "5c83da77af1dec6d7289834998ad7aafbd9e2191396d75ec3cc27f5a77226f36", "wss://relay.example"], &["p", "f7234bd4c1394dda46d09f35bd384dd30cc552ad5541990f98844fb06676e9ca"], &["t", "nostr"]],
            content: "replying to you",
            expected_pubkey: "4d4b6cd1361032ca9bd2aeb9d900aa4d45d9ead80ac9423374c451a7254d0766",
            expected_canonical: "[0,\"4d4b6cd1361032ca9bd2aeb9d900aa4d45d9ead80ac9423374c451a7254d0766\",1736870400,1,[[\"e\",\"5c83da77af1dec6d7289834998ad7aafbd9e2191396d75ec3cc27f5a77226f36\",\"wss://relay.example\"],[\"p\",\"f7234bd4c1394dda46d09f35bd384dd30cc552ad5541990f98844fb06676e9ca\"],[\"t\",\"nostr\"]],\"replying to you\"]",
            expected_id: "5ea77b28b49aa3cb5b5c563be2da4ddeb16ce5ef3f88db701e78ae3f840e8d0b",
            expected_sig: "37171b97ceaf0848f2c98391cbc441a2a217ef40afea96853f946fa84c3c98539b444d1dd7e49f8a2c577d8af427e9dce177fe94f2e71ff4ebf6f90a426a9b4e",
        },
        GoldenVector {
            name: "metadata",
            secret_key: [0x03; 32],
            created_at: 1600000000,
            kind: 0,
            tags: &[],
            content: "{\"name\":\"alice\",\"about\":\"likes \\\"quotes\\\"\"}",
            expected_pubkey: "531fe6068134503d2723133227c867ac8fa6c83c537e9a44c3c5bdbdcb1fe337",
            expected_canonical: "[0,\"531fe6068134503d2723133227c867ac8fa6c83c537e9a44c3c5bdbdcb1fe337\",1600000000,0,[],\"{\\\"name\\\":\\\"alice\\\",\\\"about\\\":\\\"likes \\\\\\\"quotes\\\\\\\"\\\"}\"]",
            expected_id: "9be5f0ca0021145735ba2baccaa8c371cbb6e5308246546d0238b4b07547702f",
            expected_sig: "b2a6f5bfcac424e0d15a5e9689eb4e16c26e6ed484465c2a3651fb61ebca17d300ae1c7799f9becc17ab21562c5eb54db9ed0ac41d4f1f2a9f3aab6293b20211",
        },
        GoldenVector {
            name: "escapes",
            secret_key: [0x04; 32],
            created_at: 1,
            kind: 1,
            tags: &[&["x", "tab\there"]],
            content: "line1\nline2\r\n\u{0}\u{1f}\u{7f}/\\ end",
            expected_pubkey: "462779ad4aad39514614751a71085f2f10e1c7a593e4e030efb5b8721ce55b0b",
            expected_canonical: "[0,\"462779ad4aad39514614751a71085f2f10e1c7a593e4e030efb5b8721ce55b0b\",1,1,[[\"x\",\"tab\\there\"]],\"line1\\nline2\\r\\n\\u0000\\u001f\u{7f}/\\\\ end\"]",
            expected_id: "0719bed8068e5ad0cf17443aead536cc150c2a27c31cbb3b1c54ac9ffe9b9bff",
            expected_sig: "6f1ae75c0012945f9cad13f1412c40fa3bdd0befcd3b9d8b418c92b0c23a6ca7a181393157a6ca2134d51d996d6cf6244146be918be31e6ea6b47c216b50b7b3",
        },
        GoldenVector {
            name: "unicode",
            secret_key: [0x05; 32],
            created_at: 1234567890,
            kind: 1,
            tags: &[],
            content: "héllo 🌍 日本語",
            expected_pubkey: "62c0a046dacce86ddd0343c6d3c7c79c2208ba0d9c9cf24a6d046d21d21f90f7",
            expected_canonical: "[0,\"62c0a046dacce86ddd0343c6d3c7c79c2208ba0d9c9cf24a6d046d21d21f90f7\",1234567890,1,[],\"héllo 🌍 日本語\"]",
            expected_id: "efaf175809a23c1093962785a26d5285da62a2897ed02c900ddc9a955a1b18e6",
            expected_sig: "7e81d25fbb70423d2d59161da050e7e21f08540a6d28bb81bfbf4902365456eac660e5ad63d3a7fc45896567434fa2bd4d12c52770f5af97101ee6442c1e9d36",
        },
        GoldenVector {
            name: "deletion",
            secret_key: [0x06; 32],
            created_at: 1700000123,
            kind: 5,
            tags: &[&["e", "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"], &["e", "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"]],
            content: "posted by mistake",
            expected_pubkey: "f006a18d5653c4edf5391ff23a61f03ff83d237e880ee61187fa9f379a028e0a",
            expected_canonical: "[0,\"f006a18d5653c4edf5391ff23a61f03ff83d237e880ee61187fa9f379a028e0a\",1700000123,5,[[\"e\",\"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\"],[\"e\",\"bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb\"]],\"posted by mistake\"]",
            expected_id: "50fb1d9b7d1258a4bab7f4b35711e220e09a35f8e94aa7721f6fac9eed7c9967",
            expected_sig: "0dcb2f0097ead457d3fc516ef98888129e0b6d05301b4d6ff915e31f90b41caa2ab7fcd3b92d3115ff61e88d2d303a57424a7f5bbd6c58b347bfda4c1b58c1f3",
        },
        GoldenVector {
            name: "empty_tag_entries",
            secret_key: [0x07; 32],
            created_at: 0,
            kind: 30023,
            tags: &[&[], &[""], &["d", ""]],
            content: "",
            expected_pubkey: "989c0b76cb563971fdc9bef31ec06c3560f3249d6ee9e5d83c57625596e05f6f",
            expected_canonical: "[0,\"989c0b76cb563971fdc9bef31ec06c3560f3249d6ee9e5d83c57625596e05f6f\",0,30023,[[],[\"\"],[\"d\",\"\"]],\"\"]",
            expected_id: "c311cf14883169c511a15272692254d88f1fd09e70207893120bfa283d1cc2c1",
            expected_sig: "c49aa5021ebad79a1c66a6611e170cb095ba800486041433585ff86aae2d74031830f3cbe741395ba8100f2d06103f8c2d223803f16808280f3a9408fcc92a2c",
        },
    ]
}

/// Build the unsigned event described by a vector.
pub fn event_from_vector(vector: &GoldenVector) -> Event {
    Event::new(
        vector.keys().public_key().to_hex(),
        Timestamp::from_secs(vector.created_at),
        Kind(vector.kind),
        vector.tags(),
        vector.content,
    )
}

/// Build and sign the event described by a vector with [`VECTOR_AUX_RAND`].
pub fn signed_event_from_vector(vector: &GoldenVector) -> Event {
    let mut event = event_from_vector(vector);
    event
        .sign_with_keys(&vector.keys(), &mut FixedEntropy(VECTOR_AUX_RAND))
        .expect("vector events sign");
    event
}

/// Check every vector against this implementation.
///
/// Returns `(name, matches, computed id)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let event = signed_event_from_vector(v);
            let id = event.id().map(|id| id.to_hex()).unwrap_or_default();

            let matches = event.pubkey == v.expected_pubkey
                && event.serialize() == v.expected_canonical.as_bytes()
                && id == v.expected_id
                && event.sig() == v.expected_sig;

            (v.name.to_string(), matches, id)
        })
        .collect()
}

/// The all-zero event: zero pubkey, epoch, kind 1, no tags, no content.
pub fn zero_event() -> Event {
    Event::new("0".repeat(64), Timestamp::EPOCH, Kind::TEXT_NOTE, Vec::<Tag>::new(), "")
}

/// Expected id of [`zero_event`].
pub const ZERO_EVENT_ID: &str = "2bee8ad7d8d21a7738a41c8c3e71b3f902b5a448b24971c58bd6bff878ee0a3f";

#[cfg(test)]
mod tests {
    use super::*;
    use nostr_event_core::EventId;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, id) in verify_all_vectors() {
            assert!(matches, "vector '{}' diverged (computed id {})", name, id);
        }
    }

    #[test]
    fn test_vectors_are_deterministic() {
        for vector in all_vectors() {
            let e1 = signed_event_from_vector(&vector);
            let e2 = signed_event_from_vector(&vector);
            assert_eq!(e1, e2, "vector '{}' is not reproducible", vector.name);
        }
    }

    #[test]
    fn test_vector_signatures_check() {
        for vector in all_vectors() {
            let event = signed_event_from_vector(&vector);
            assert!(
                event.check_signature().unwrap(),
                "vector '{}' fails its own signature check",
                vector.name
            );
            assert!(event.verify().is_ok());
        }
    }

    #[test]
    fn test_vector_ids_are_distinct() {
        let mut ids: Vec<_> = all_vectors().iter().map(|v| v.expected_id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), all_vectors().len());
    }

    #[test]
    fn test_canonical_matches_serde_json() {
        for vector in all_vectors() {
            let expected = serde_json::json!([
                0,
                vector.expected_pubkey,
                vector.created_at,
                vector.kind,
                vector.tags,
                vector.content,
            ]);
            assert_eq!(
                serde_json::to_string(&expected).unwrap(),
                vector.expected_canonical,
                "vector '{}'",
                vector.name
            );
        }
    }

    #[test]
    fn test_zero_event() {
        let event = zero_event();
        assert_eq!(
            event.serialize(),
            format!("[0,\"{}\",0,1,[],\"\"]", "0".repeat(64)).into_bytes()
        );
        assert_eq!(event.compute_id(), EventId::from_hex(ZERO_EVENT_ID).unwrap());
    }
}
