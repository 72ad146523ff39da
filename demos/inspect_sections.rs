//! Decode a message and walk its sections

use amqplite_core::section::{Footer, MessageAnnotations, Section};
use amqplite_core::{Message, MessageCodec, Value};
use bytes::Bytes;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build a message the way a peer would, then look at what arrives.
    let mut annotations = MessageAnnotations::new();
    annotations.insert(Value::symbol("x-opt-origin"), Value::string("east"));

    let mut footer = Footer::new();
    footer.insert(Value::symbol("x-checksum"), Value::binary(&[0xDE, 0xAD]));

    let mut message = Message::new();
    message.message_annotations = Some(annotations);
    message.body_section = Some(Section::Data(Bytes::from_static(b"opaque payload")));
    message.footer = Some(footer);

    let codec = MessageCodec::amqp();
    let mut encoded = codec.encode(&message);
    println!("Wire size: {} bytes\n", encoded.len());

    let decoded = codec.decode(&mut encoded)?;

    println!("header:                 {:?}", decoded.header);
    println!("delivery-annotations:   {:?}", decoded.delivery_annotations);
    println!("message-annotations:    {:?}", decoded.message_annotations);
    println!("properties:             {:?}", decoded.properties);
    println!("application-properties: {:?}", decoded.application_properties);
    println!("body:                   {:?}", decoded.body()?);
    println!("footer:                 {:?}", decoded.footer);

    Ok(())
}
