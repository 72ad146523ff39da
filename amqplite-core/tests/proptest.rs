//! Property-based tests using proptest

use amqplite_core::codec::{decode_value, encode_value};
use amqplite_core::section::{ApplicationProperties, Header, Section};
use amqplite_core::{Message, MessageCodec, Value};
use bytes::{Buf, Bytes, BytesMut};
use proptest::prelude::*;

fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<u8>().prop_map(Value::Ubyte),
        any::<u16>().prop_map(Value::Ushort),
        any::<u32>().prop_map(Value::Uint),
        any::<u64>().prop_map(Value::Ulong),
        any::<i8>().prop_map(Value::Byte),
        any::<i16>().prop_map(Value::Short),
        any::<i32>().prop_map(Value::Int),
        any::<i64>().prop_map(Value::Long),
        any::<i64>().prop_map(Value::Timestamp),
        // Derived from integers so equality is exact and NaN never appears
        any::<i32>().prop_map(|v| Value::Double(v as f64)),
        any::<[u8; 16]>().prop_map(Value::Uuid),
        prop::collection::vec(any::<u8>(), 0..64).prop_map(|b| Value::Binary(Bytes::from(b))),
        "[a-z0-9 ]{0,16}".prop_map(Value::String),
        "[a-z:-]{0,12}".prop_map(Value::Symbol),
    ];
    leaf.prop_recursive(3, 48, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
            prop::collection::vec((inner.clone(), inner), 0..4).prop_map(Value::Map),
        ]
    })
}

fn body_strategy() -> impl Strategy<Value = Option<Section>> {
    prop_oneof![
        Just(None),
        value_strategy().prop_map(|v| Some(Section::AmqpValue(v))),
        prop::collection::vec(any::<u8>(), 0..512)
            .prop_map(|b| Some(Section::Data(Bytes::from(b)))),
        prop::collection::vec(value_strategy(), 0..5)
            .prop_map(|items| Some(Section::AmqpSequence(items))),
    ]
}

proptest! {
    #[test]
    fn prop_value_round_trip(value in value_strategy()) {
        let mut buf = BytesMut::new();
        encode_value(&mut buf, &value);

        let mut bytes = buf.freeze();
        let decoded = decode_value(&mut bytes).unwrap();

        prop_assert_eq!(decoded, value);
        prop_assert_eq!(bytes.remaining(), 0);
    }

    #[test]
    fn prop_message_round_trip(
        durable in proptest::option::of(any::<bool>()),
        priority in proptest::option::of(any::<u8>()),
        ttl in proptest::option::of(any::<u32>()),
        entries in prop::collection::vec(("[a-z]{1,8}", any::<u32>()), 0..5),
        body in body_strategy(),
    ) {
        let mut message = Message::new();
        if durable.is_some() || priority.is_some() || ttl.is_some() {
            message.header = Some(Header {
                durable,
                priority,
                ttl,
                ..Default::default()
            });
        }
        if !entries.is_empty() {
            let mut properties = ApplicationProperties::new();
            for (key, value) in entries {
                properties.insert(key, Value::Uint(value));
            }
            message.application_properties = Some(properties);
        }
        message.body_section = body;

        let codec = MessageCodec::amqp();
        let mut encoded = codec.encode(&message);
        let decoded = codec.decode(&mut encoded).unwrap();

        prop_assert_eq!(decoded, message);
    }

    #[test]
    fn prop_decode_never_panics(
        data in prop::collection::vec(any::<u8>(), 0..4096)
    ) {
        // Should never panic, even on random data
        let mut bytes = Bytes::from(data);
        let result = MessageCodec::amqp().decode(&mut bytes);
        prop_assert!(result.is_ok() || result.is_err());
    }

    #[test]
    fn prop_value_decode_never_panics(
        data in prop::collection::vec(any::<u8>(), 0..2048)
    ) {
        let mut bytes = Bytes::from(data);
        let result = decode_value(&mut bytes);
        prop_assert!(result.is_ok() || result.is_err());
    }

    #[test]
    fn prop_encode_is_deterministic(value in value_strategy()) {
        let message = Message::with_body(value);
        let codec = MessageCodec::amqp();
        prop_assert_eq!(codec.encode(&message), codec.encode(&message));
    }
}
