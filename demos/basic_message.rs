//! Basic message encoding example

use amqplite_core::section::{ApplicationProperties, Header, Properties};
use amqplite_core::{Body, Message, MessageCodec, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Amqplite Basic Message Example\n");

    let mut application_properties = ApplicationProperties::new();
    application_properties.insert("region", Value::string("west"));
    application_properties.insert("attempt", Value::Uint(1));

    let mut message = Message::with_body(Value::string("hello, world"));
    message.header = Some(Header {
        durable: Some(true),
        ttl: Some(60_000),
        ..Default::default()
    });
    message.properties = Some(Properties {
        message_id: Some(Value::string("demo-1")),
        to: Some("greetings".into()),
        subject: Some("hello".into()),
        ..Default::default()
    });
    message.application_properties = Some(application_properties);

    let codec = MessageCodec::amqp();
    let encoded = codec.encode(&message);
    println!("Encoded message: {} bytes", encoded.len());

    std::fs::write("example_message.amqp", &encoded)?;
    println!("Wrote example_message.amqp");
    println!("Use 'amqplite inspect --input example_message.amqp' to read it back\n");

    let mut buf = encoded;
    let decoded = codec.decode(&mut buf)?;

    match decoded.body()? {
        Some(Body::Value(value)) => println!("Decoded body: {value:?}"),
        other => println!("Decoded body: {other:?}"),
    }

    Ok(())
}
