//! Proptest generators for property-based testing.

use proptest::prelude::*;

use nostr_event_core::{Event, EventId, FixedEntropy, Keys, Kind, Tag, Tags, Timestamp};

/// Generate a random keypair.
///
/// Draws 32-byte seeds until one is a valid scalar; invalid seeds are
/// vanishingly rare so the filter never starves.
pub fn keys() -> impl Strategy<Value = Keys> {
    any::<[u8; 32]>().prop_filter_map("seed outside [1, n-1]", |seed| Keys::from_secret_bytes(&seed).ok())
}

/// Generate a random EventId.
pub fn event_id() -> impl Strategy<Value = EventId> {
    any::<[u8; 32]>().prop_map(EventId::from_bytes)
}

/// Generate a timestamp, including negative values.
pub fn timestamp() -> impl Strategy<Value = Timestamp> {
    prop_oneof![
        8 => 0i64..=4_102_444_800i64,
        1 => any::<i64>(),
    ]
    .prop_map(Timestamp::from_secs)
}

/// Generate an event kind.
pub fn kind() -> impl Strategy<Value = Kind> {
    prop_oneof![
        Just(Kind::METADATA),
        Just(Kind::TEXT_NOTE),
        Just(Kind::CONTACT_LIST),
        Just(Kind::DELETION),
        any::<u16>().prop_map(Kind),
    ]
}

/// Generate text that exercises every escaping class: quotes, backslashes,
/// control characters, DEL and multi-byte scalars.
pub fn text(max_len: usize) -> impl Strategy<Value = String> {
    let special = prop_oneof![
        Just('"'),
        Just('\\'),
        Just('/'),
        Just('\u{7f}'),
        (0u8..0x20).prop_map(char::from),
    ];
    prop::collection::vec(
        prop_oneof![4 => any::<char>(), 1 => special],
        0..=max_len,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Generate a tag of up to `max_len` entries.
pub fn tag(max_len: usize) -> impl Strategy<Value = Tag> {
    prop::collection::vec(text(16), 0..=max_len).prop_map(Tag)
}

/// Generate a tag list.
pub fn tags(max_tags: usize) -> impl Strategy<Value = Tags> {
    prop::collection::vec(tag(4), 0..=max_tags).prop_map(Tags::from)
}

/// Parameters for generating an event.
#[derive(Debug, Clone)]
pub struct EventParams {
    pub keys: Keys,
    pub created_at: Timestamp,
    pub kind: Kind,
    pub tags: Tags,
    pub content: String,
    pub aux_rand: [u8; 32],
}

impl Arbitrary for EventParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            keys(),
            timestamp(),
            kind(),
            tags(6),
            text(200),
            any::<[u8; 32]>(),
        )
            .prop_map(|(keys, created_at, kind, tags, content, aux_rand)| EventParams {
                keys,
                created_at,
                kind,
                tags,
                content,
                aux_rand,
            })
            .boxed()
    }
}

/// Build the unsigned event described by the parameters.
pub fn unsigned_from_params(params: &EventParams) -> Event {
    Event::new(
        params.keys.public_key().to_hex(),
        params.created_at,
        params.kind,
        params.tags.clone(),
        params.content.clone(),
    )
}

/// Build and sign the event described by the parameters.
pub fn event_from_params(params: &EventParams) -> Event {
    let mut event = unsigned_from_params(params);
    event
        .sign_with_keys(&params.keys, &mut FixedEntropy(params.aux_rand))
        .expect("generated keys always sign their own events");
    event
}
