use crate::json::message_to_json;
use amqplite_core::{Body, Message, MessageCodec};
use anyhow::{Context, Result};
use bytes::Bytes;
use colored::*;
use std::fs;
use std::io::{self, Read};
use tracing::info;

pub fn execute(input: &str, as_json: bool) -> Result<()> {
    info!("Inspecting file: {}", input);

    // Read input file or stdin
    let data = if input == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(input).with_context(|| format!("Failed to read input file: {}", input))?
    };

    let size = data.len();
    let mut buf = Bytes::from(data);
    let message = MessageCodec::amqp()
        .decode(&mut buf)
        .with_context(|| "Failed to decode message")?;

    if as_json {
        let rendered = message_to_json(&message)?;
        println!("{}", serde_json::to_string_pretty(&rendered)?);
        return Ok(());
    }

    println!("\n=== Message ({} bytes on the wire) ===", size);
    print_slot("header", message.header.as_ref().map(|h| format!("{h:?}")));
    print_slot(
        "delivery-annotations",
        message.delivery_annotations.as_ref().map(|a| format!("{} entries", a.0.len())),
    );
    print_slot(
        "message-annotations",
        message.message_annotations.as_ref().map(|a| format!("{} entries", a.0.len())),
    );
    print_slot("properties", message.properties.as_ref().map(|p| format!("{p:?}")));
    print_slot(
        "application-properties",
        message.application_properties.as_ref().map(|p| format!("{} entries", p.0.len())),
    );
    print_slot("body", describe_body(&message)?);
    print_slot(
        "footer",
        message.footer.as_ref().map(|f| format!("{} entries", f.0.len())),
    );

    Ok(())
}

fn print_slot(name: &str, contents: Option<String>) {
    match contents {
        Some(contents) => println!("{} {:<24} {}", "✓".green(), name, contents),
        None => println!("{} {:<24} {}", "-".dimmed(), name, "absent".dimmed()),
    }
}

fn describe_body(message: &Message) -> Result<Option<String>> {
    let description = match message.body().with_context(|| "Invalid body section")? {
        None => None,
        Some(Body::Value(value)) => Some(format!("amqp-value {value:?}")),
        Some(Body::Data(bytes)) => Some(format!(
            "data, {} bytes: {}",
            bytes.len(),
            preview_hex(bytes)
        )),
        Some(Body::Sequence(items)) => Some(format!("amqp-sequence, {} elements", items.len())),
    };
    Ok(description)
}

fn preview_hex(bytes: &[u8]) -> String {
    const PREVIEW: usize = 16;
    if bytes.len() <= PREVIEW {
        hex::encode(bytes)
    } else {
        format!("{}…", hex::encode(&bytes[..PREVIEW]))
    }
}
