use crate::json::message_from_json;
use amqplite_core::MessageCodec;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use tracing::info;

pub fn execute(input: &str, output: &str) -> Result<()> {
    info!("Encoding message from {} to {}", input, output);

    // Read input JSON or stdin
    let content = if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(input)
            .with_context(|| format!("Failed to read input file: {}", input))?
    };

    let description: serde_json::Value =
        serde_json::from_str(&content).with_context(|| "Failed to parse JSON input")?;

    let message = message_from_json(&description)
        .with_context(|| "Failed to build message from description")?;

    let encoded = MessageCodec::amqp().encode(&message);

    fs::write(output, &encoded)
        .with_context(|| format!("Failed to write output file: {}", output))?;

    info!("Successfully encoded message ({} bytes)", encoded.len());

    Ok(())
}
