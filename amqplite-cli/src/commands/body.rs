use crate::json::value_to_json;
use amqplite_core::{Body, MessageCodec};
use anyhow::{Context, Result};
use bytes::Bytes;
use std::fs;
use std::io::{self, Read};

pub fn execute(input: &str) -> Result<()> {
    // Read input file or stdin
    let data = if input == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(input).with_context(|| format!("Failed to read input file: {}", input))?
    };

    let mut buf = Bytes::from(data);
    let message = MessageCodec::amqp()
        .decode(&mut buf)
        .with_context(|| "Failed to decode message")?;

    match message.body().with_context(|| "Invalid body section")? {
        None => println!("(no body)"),
        Some(Body::Value(value)) => println!("{}", serde_json::to_string(&value_to_json(value))?),
        Some(Body::Data(bytes)) => println!("{}", hex::encode(bytes)),
        Some(Body::Sequence(items)) => {
            let rendered: Vec<_> = items.iter().map(value_to_json).collect();
            println!("{}", serde_json::to_string(&rendered)?);
        }
    }

    Ok(())
}
