//! Integration tests for the complete populate → encode → decode flow

use amqplite_core::section::{
    ApplicationProperties, DeliveryAnnotations, Footer, Header, MessageAnnotations, Properties,
    Section,
};
use amqplite_core::{Body, CodecError, Message, MessageCodec, SectionRegistry, Value};
use bytes::{BufMut, Bytes, BytesMut};

fn full_message() -> Message {
    let mut delivery_annotations = DeliveryAnnotations::new();
    delivery_annotations.insert(Value::symbol("x-opt-hop"), Value::Uint(1));

    let mut message_annotations = MessageAnnotations::new();
    message_annotations.insert(Value::symbol("x-opt-origin"), Value::string("west"));

    let mut application_properties = ApplicationProperties::new();
    application_properties.insert("retries", Value::Int(3));
    application_properties.insert("urgent", Value::Bool(false));

    let mut footer = Footer::new();
    footer.insert(Value::symbol("x-checksum"), Value::binary(&[0xDE, 0xAD]));

    let mut message = Message::new();
    message.header = Some(Header {
        durable: Some(true),
        priority: Some(4),
        ttl: Some(60_000),
        first_acquirer: Some(false),
        delivery_count: Some(0),
    });
    message.delivery_annotations = Some(delivery_annotations);
    message.message_annotations = Some(message_annotations);
    message.properties = Some(Properties {
        message_id: Some(Value::Ulong(12345)),
        user_id: Some(Bytes::from_static(b"alice")),
        to: Some("orders".into()),
        subject: Some("created".into()),
        reply_to: Some("replies".into()),
        correlation_id: Some(Value::Uuid([9u8; 16])),
        content_type: Some("application/json".into()),
        content_encoding: Some("gzip".into()),
        absolute_expiry_time: Some(1_700_000_060_000),
        creation_time: Some(1_700_000_000_000),
        group_id: Some("g-1".into()),
        group_sequence: Some(17),
        reply_to_group_id: Some("g-2".into()),
    });
    message.application_properties = Some(application_properties);
    message.body_section = Some(Section::AmqpValue(Value::string("payload")));
    message.footer = Some(footer);
    message
}

#[test]
fn test_full_message_round_trip() {
    let codec = MessageCodec::amqp();
    let message = full_message();

    let mut encoded = codec.encode(&message);
    let decoded = codec.decode(&mut encoded).unwrap();

    assert_eq!(decoded, message);
    assert_eq!(
        decoded.body().unwrap(),
        Some(Body::Value(&Value::string("payload")))
    );
}

#[test]
fn test_every_section_subset_round_trips() {
    // Each of the 2^7 presence combinations must survive a round trip with
    // presence and contents intact.
    let codec = MessageCodec::amqp();
    let template = full_message();

    for mask in 0u8..128 {
        let mut message = Message::new();
        if mask & 0x01 != 0 {
            message.header = template.header.clone();
        }
        if mask & 0x02 != 0 {
            message.delivery_annotations = template.delivery_annotations.clone();
        }
        if mask & 0x04 != 0 {
            message.message_annotations = template.message_annotations.clone();
        }
        if mask & 0x08 != 0 {
            message.properties = template.properties.clone();
        }
        if mask & 0x10 != 0 {
            message.application_properties = template.application_properties.clone();
        }
        if mask & 0x20 != 0 {
            message.body_section = template.body_section.clone();
        }
        if mask & 0x40 != 0 {
            message.footer = template.footer.clone();
        }

        let mut encoded = codec.encode(&message);
        let decoded = codec.decode(&mut encoded).unwrap();
        assert_eq!(decoded, message, "subset mask {mask:#09b} diverged");
    }
}

#[test]
fn test_body_variant_mapping() {
    let codec = MessageCodec::amqp();

    let value_message = Message::with_body(Value::Uint(42));
    let mut encoded = codec.encode(&value_message);
    let decoded = codec.decode(&mut encoded).unwrap();
    assert_eq!(decoded.body().unwrap(), Some(Body::Value(&Value::Uint(42))));

    let mut data_message = Message::new();
    data_message.body_section = Some(Section::Data(Bytes::from_static(&[1, 2, 3])));
    let mut encoded = codec.encode(&data_message);
    let decoded = codec.decode(&mut encoded).unwrap();
    match decoded.body().unwrap() {
        Some(Body::Data(bytes)) => assert_eq!(bytes.as_ref(), &[1, 2, 3]),
        other => panic!("unexpected body: {other:?}"),
    }

    let mut sequence_message = Message::new();
    sequence_message.body_section = Some(Section::AmqpSequence(vec![
        Value::string("a"),
        Value::string("b"),
    ]));
    let mut encoded = codec.encode(&sequence_message);
    let decoded = codec.decode(&mut encoded).unwrap();
    match decoded.body().unwrap() {
        Some(Body::Sequence(items)) => assert_eq!(items.len(), 2),
        other => panic!("unexpected body: {other:?}"),
    }
}

#[test]
fn test_absent_body_is_not_an_error() {
    let message = Message::new();
    assert_eq!(message.body().unwrap(), None);
}

#[test]
fn test_unknown_descriptor_reports_the_code() {
    let codec = MessageCodec::amqp();

    // A described value with descriptor 0x99: 0x00 smallulong(0x99) null
    let mut buf = BytesMut::new();
    buf.put_slice(&[0x00, 0x53, 0x99, 0x40]);

    match codec.decode(&mut buf.freeze()) {
        Err(CodecError::UnknownDescriptor(code)) => assert_eq!(code, 0x99),
        other => panic!("expected framing error, got {other:?}"),
    }
}

#[test]
fn test_garbage_input_fails_cleanly() {
    let codec = MessageCodec::amqp();

    // Not a described constructor
    let mut buf = Bytes::from_static(&[0x41]);
    assert!(matches!(
        codec.decode(&mut buf),
        Err(CodecError::InvalidEncoding(_))
    ));

    // Truncated mid-section
    let mut buf = Bytes::from_static(&[0x00, 0x53, 0x75, 0xA0, 0x05, 0x01]);
    assert!(matches!(
        codec.decode(&mut buf),
        Err(CodecError::UnexpectedEnd { .. })
    ));
}

#[test]
fn test_deeply_nested_constructors_fail_cleanly() {
    // 128 KiB of described constructors never reaches a value. The decoder
    // must return an error rather than recurse until the stack overflows.
    let codec = MessageCodec::amqp();
    let mut buf = Bytes::from(vec![0x00u8; 128 * 1024]);
    assert!(matches!(
        codec.decode(&mut buf),
        Err(CodecError::InvalidEncoding(_))
    ));
}

#[test]
fn test_duplicate_and_out_of_order_rejected_end_to_end() {
    let codec = MessageCodec::amqp();

    let mut properties_only = Message::new();
    properties_only.properties = Some(Properties::default());
    let properties_bytes = codec.encode(&properties_only);

    let mut footer_only = Message::new();
    footer_only.footer = Some(Footer::new());
    let footer_bytes = codec.encode(&footer_only);

    // properties twice
    let mut twice = BytesMut::new();
    twice.put_slice(&properties_bytes);
    twice.put_slice(&properties_bytes);
    assert_eq!(
        codec.decode(&mut twice.freeze()),
        Err(CodecError::DuplicateSection(0x73))
    );

    // footer before properties
    let mut reversed = BytesMut::new();
    reversed.put_slice(&footer_bytes);
    reversed.put_slice(&properties_bytes);
    assert_eq!(
        codec.decode(&mut reversed.freeze()),
        Err(CodecError::OutOfOrderSection(0x73))
    );
}

#[test]
fn test_decode_consumes_buffer_to_exhaustion() {
    let codec = MessageCodec::amqp();
    let mut encoded = codec.encode(&full_message());
    codec.decode(&mut encoded).unwrap();
    assert!(encoded.is_empty());
}

#[test]
fn test_fake_registry_isolates_the_codec() {
    // The decode loop itself is exercised with a registry that knows a
    // single made-up descriptor.
    let mut registry = SectionRegistry::new();
    registry.register(0x42, |v| Ok(Section::AmqpValue(v)));
    let codec = MessageCodec::new(registry);

    let mut buf = BytesMut::new();
    buf.put_slice(&[0x00, 0x53, 0x42, 0x52, 0x07]); // descriptor 0x42, smalluint 7
    let decoded = codec.decode(&mut buf.freeze()).unwrap();
    assert_eq!(decoded.body_section, Some(Section::AmqpValue(Value::Uint(7))));
}
