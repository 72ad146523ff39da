//! JSON bridging between serde_json values and the core data model
//!
//! A message is described as a JSON object with one key per section. Strings
//! prefixed with `hex:` become binary values; annotation keys become symbols;
//! application-property keys stay strings.

use amqplite_core::section::{
    ApplicationProperties, DeliveryAnnotations, Footer, Header, MessageAnnotations, Properties,
    Section,
};
use amqplite_core::{Body, Message, Value};
use anyhow::{bail, Context, Result};
use bytes::Bytes;
use serde_json::{json, Map as JsonMap, Value as Json};

/// Convert a JSON value into a core value
pub fn value_from_json(json: &Json) -> Result<Value> {
    let value = match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Long(i)
            } else if let Some(u) = n.as_u64() {
                Value::Ulong(u)
            } else {
                Value::Double(n.as_f64().unwrap_or(0.0))
            }
        }
        Json::String(s) => match s.strip_prefix("hex:") {
            Some(h) => {
                let bytes = hex::decode(h)
                    .with_context(|| format!("invalid hex in \"hex:\" string: {s}"))?;
                Value::Binary(Bytes::from(bytes))
            }
            None => Value::String(s.clone()),
        },
        Json::Array(items) => Value::List(
            items
                .iter()
                .map(value_from_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        Json::Object(map) => {
            let mut pairs = Vec::with_capacity(map.len());
            for (key, value) in map {
                pairs.push((Value::String(key.clone()), value_from_json(value)?));
            }
            Value::Map(pairs)
        }
    };
    Ok(value)
}

/// Convert a core value into JSON for display
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Ubyte(v) => Json::from(*v),
        Value::Ushort(v) => Json::from(*v),
        Value::Uint(v) => Json::from(*v),
        Value::Ulong(v) => Json::from(*v),
        Value::Byte(v) => Json::from(*v),
        Value::Short(v) => Json::from(*v),
        Value::Int(v) => Json::from(*v),
        Value::Long(v) => Json::from(*v),
        Value::Float(v) => Json::from(f64::from(*v)),
        Value::Double(v) => Json::from(*v),
        Value::Timestamp(v) => Json::from(*v),
        Value::Uuid(v) => Json::String(hex::encode(v)),
        Value::Binary(b) => Json::String(format!("hex:{}", hex::encode(b))),
        Value::String(s) | Value::Symbol(s) => Json::String(s.clone()),
        Value::List(items) => Json::Array(items.iter().map(value_to_json).collect()),
        Value::Map(pairs) => {
            // Keep an object when every key is textual, otherwise pair list
            if pairs.iter().all(|(k, _)| k.as_str().is_some()) {
                let mut map = JsonMap::new();
                for (key, value) in pairs {
                    map.insert(key.as_str().unwrap().to_owned(), value_to_json(value));
                }
                Json::Object(map)
            } else {
                Json::Array(
                    pairs
                        .iter()
                        .map(|(k, v)| Json::Array(vec![value_to_json(k), value_to_json(v)]))
                        .collect(),
                )
            }
        }
        Value::Described(descriptor, inner) => json!({
            "descriptor": descriptor,
            "value": value_to_json(inner),
        }),
    }
}

/// Build a message from its JSON description
pub fn message_from_json(json: &Json) -> Result<Message> {
    let object = match json {
        Json::Object(map) => map,
        other => bail!("message description must be a JSON object, got {other}"),
    };

    let mut message = Message::new();
    for (key, value) in object {
        match key.as_str() {
            "header" => message.header = Some(header_from_json(value)?),
            "delivery_annotations" => {
                message.delivery_annotations =
                    Some(DeliveryAnnotations(annotations_from_json(value, key)?))
            }
            "message_annotations" => {
                message.message_annotations =
                    Some(MessageAnnotations(annotations_from_json(value, key)?))
            }
            "properties" => message.properties = Some(properties_from_json(value)?),
            "application_properties" => {
                message.application_properties = Some(application_properties_from_json(value)?)
            }
            "body" => message.body_section = Some(body_from_json(value)?),
            "footer" => message.footer = Some(Footer(annotations_from_json(value, key)?)),
            other => bail!("unknown message field: {other}"),
        }
    }
    Ok(message)
}

/// Render a message as its JSON description
pub fn message_to_json(message: &Message) -> Result<Json> {
    let mut object = JsonMap::new();
    if let Some(header) = &message.header {
        object.insert("header".into(), header_to_json(header));
    }
    if let Some(annotations) = &message.delivery_annotations {
        object.insert(
            "delivery_annotations".into(),
            value_to_json(&annotations.to_value()),
        );
    }
    if let Some(annotations) = &message.message_annotations {
        object.insert(
            "message_annotations".into(),
            value_to_json(&annotations.to_value()),
        );
    }
    if let Some(properties) = &message.properties {
        object.insert("properties".into(), properties_to_json(properties));
    }
    if let Some(properties) = &message.application_properties {
        object.insert(
            "application_properties".into(),
            value_to_json(&properties.to_value()),
        );
    }
    match message.body().context("cannot render body")? {
        None => {}
        Some(Body::Value(value)) => {
            object.insert("body".into(), json!({ "value": value_to_json(value) }));
        }
        Some(Body::Data(bytes)) => {
            object.insert("body".into(), json!({ "data": hex::encode(bytes) }));
        }
        Some(Body::Sequence(items)) => {
            object.insert(
                "body".into(),
                json!({ "sequence": items.iter().map(value_to_json).collect::<Vec<_>>() }),
            );
        }
    }
    if let Some(footer) = &message.footer {
        object.insert("footer".into(), value_to_json(&footer.to_value()));
    }
    Ok(Json::Object(object))
}

fn header_from_json(json: &Json) -> Result<Header> {
    let object = expect_object(json, "header")?;
    let mut header = Header::default();
    for (key, value) in object {
        match key.as_str() {
            "durable" => header.durable = Some(expect_bool(value, "header.durable")?),
            "priority" => header.priority = Some(expect_int(value, "header.priority")?),
            "ttl" => header.ttl = Some(expect_int(value, "header.ttl")?),
            "first_acquirer" => {
                header.first_acquirer = Some(expect_bool(value, "header.first_acquirer")?)
            }
            "delivery_count" => {
                header.delivery_count = Some(expect_int(value, "header.delivery_count")?)
            }
            other => bail!("unknown header field: {other}"),
        }
    }
    Ok(header)
}

fn header_to_json(header: &Header) -> Json {
    let mut object = JsonMap::new();
    if let Some(v) = header.durable {
        object.insert("durable".into(), v.into());
    }
    if let Some(v) = header.priority {
        object.insert("priority".into(), v.into());
    }
    if let Some(v) = header.ttl {
        object.insert("ttl".into(), v.into());
    }
    if let Some(v) = header.first_acquirer {
        object.insert("first_acquirer".into(), v.into());
    }
    if let Some(v) = header.delivery_count {
        object.insert("delivery_count".into(), v.into());
    }
    Json::Object(object)
}

fn properties_from_json(json: &Json) -> Result<Properties> {
    let object = expect_object(json, "properties")?;
    let mut properties = Properties::default();
    for (key, value) in object {
        match key.as_str() {
            "message_id" => properties.message_id = Some(value_from_json(value)?),
            "user_id" => properties.user_id = Some(expect_bytes(value, "properties.user_id")?),
            "to" => properties.to = Some(expect_string(value, "properties.to")?),
            "subject" => properties.subject = Some(expect_string(value, "properties.subject")?),
            "reply_to" => properties.reply_to = Some(expect_string(value, "properties.reply_to")?),
            "correlation_id" => properties.correlation_id = Some(value_from_json(value)?),
            "content_type" => {
                properties.content_type = Some(expect_string(value, "properties.content_type")?)
            }
            "content_encoding" => {
                properties.content_encoding =
                    Some(expect_string(value, "properties.content_encoding")?)
            }
            "absolute_expiry_time" => {
                properties.absolute_expiry_time =
                    Some(expect_int(value, "properties.absolute_expiry_time")?)
            }
            "creation_time" => {
                properties.creation_time = Some(expect_int(value, "properties.creation_time")?)
            }
            "group_id" => properties.group_id = Some(expect_string(value, "properties.group_id")?),
            "group_sequence" => {
                properties.group_sequence = Some(expect_int(value, "properties.group_sequence")?)
            }
            "reply_to_group_id" => {
                properties.reply_to_group_id =
                    Some(expect_string(value, "properties.reply_to_group_id")?)
            }
            other => bail!("unknown properties field: {other}"),
        }
    }
    Ok(properties)
}

fn properties_to_json(properties: &Properties) -> Json {
    let mut object = JsonMap::new();
    if let Some(v) = &properties.message_id {
        object.insert("message_id".into(), value_to_json(v));
    }
    if let Some(v) = &properties.user_id {
        object.insert("user_id".into(), Json::String(format!("hex:{}", hex::encode(v))));
    }
    if let Some(v) = &properties.to {
        object.insert("to".into(), v.clone().into());
    }
    if let Some(v) = &properties.subject {
        object.insert("subject".into(), v.clone().into());
    }
    if let Some(v) = &properties.reply_to {
        object.insert("reply_to".into(), v.clone().into());
    }
    if let Some(v) = &properties.correlation_id {
        object.insert("correlation_id".into(), value_to_json(v));
    }
    if let Some(v) = &properties.content_type {
        object.insert("content_type".into(), v.clone().into());
    }
    if let Some(v) = &properties.content_encoding {
        object.insert("content_encoding".into(), v.clone().into());
    }
    if let Some(v) = properties.absolute_expiry_time {
        object.insert("absolute_expiry_time".into(), v.into());
    }
    if let Some(v) = properties.creation_time {
        object.insert("creation_time".into(), v.into());
    }
    if let Some(v) = &properties.group_id {
        object.insert("group_id".into(), v.clone().into());
    }
    if let Some(v) = properties.group_sequence {
        object.insert("group_sequence".into(), v.into());
    }
    if let Some(v) = &properties.reply_to_group_id {
        object.insert("reply_to_group_id".into(), v.clone().into());
    }
    Json::Object(object)
}

fn annotations_from_json(json: &Json, section: &str) -> Result<Vec<(Value, Value)>> {
    let object = expect_object(json, section)?;
    let mut pairs = Vec::with_capacity(object.len());
    for (key, value) in object {
        pairs.push((Value::Symbol(key.clone()), value_from_json(value)?));
    }
    Ok(pairs)
}

fn application_properties_from_json(json: &Json) -> Result<ApplicationProperties> {
    let object = expect_object(json, "application_properties")?;
    let mut properties = ApplicationProperties::new();
    for (key, value) in object {
        properties.insert(key.clone(), value_from_json(value)?);
    }
    Ok(properties)
}

fn body_from_json(json: &Json) -> Result<Section> {
    let object = expect_object(json, "body")?;
    if object.len() != 1 {
        bail!("body must have exactly one of \"value\", \"data\", or \"sequence\"");
    }
    let (kind, value) = object.iter().next().unwrap();
    match kind.as_str() {
        "value" => Ok(Section::AmqpValue(value_from_json(value)?)),
        "data" => {
            let h = expect_string(value, "body.data")?;
            let bytes = hex::decode(h.trim_start_matches("hex:"))
                .context("body.data must be a hex string")?;
            Ok(Section::Data(Bytes::from(bytes)))
        }
        "sequence" => match value {
            Json::Array(items) => Ok(Section::AmqpSequence(
                items
                    .iter()
                    .map(value_from_json)
                    .collect::<Result<Vec<_>>>()?,
            )),
            other => bail!("body.sequence must be an array, got {other}"),
        },
        other => bail!("unknown body kind: {other}"),
    }
}

fn expect_object<'a>(json: &'a Json, what: &str) -> Result<&'a JsonMap<String, Json>> {
    match json {
        Json::Object(map) => Ok(map),
        other => bail!("{what} must be a JSON object, got {other}"),
    }
}

fn expect_bool(json: &Json, what: &str) -> Result<bool> {
    json.as_bool()
        .with_context(|| format!("{what} must be a boolean"))
}

fn expect_string(json: &Json, what: &str) -> Result<String> {
    json.as_str()
        .map(str::to_owned)
        .with_context(|| format!("{what} must be a string"))
}

fn expect_bytes(json: &Json, what: &str) -> Result<Bytes> {
    let s = expect_string(json, what)?;
    match s.strip_prefix("hex:") {
        Some(h) => Ok(Bytes::from(
            hex::decode(h).with_context(|| format!("{what} has invalid hex"))?,
        )),
        None => Ok(Bytes::from(s.into_bytes())),
    }
}

fn expect_int<T: TryFrom<i64>>(json: &Json, what: &str) -> Result<T> {
    let n = json
        .as_i64()
        .with_context(|| format!("{what} must be an integer"))?;
    T::try_from(n).map_err(|_| anyhow::anyhow!("{what} is out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_json_round_trip() {
        let description = json!({
            "header": { "durable": true, "ttl": 5000 },
            "properties": { "message_id": "m-1", "to": "orders" },
            "application_properties": { "retries": 3 },
            "body": { "value": "hello" },
            "footer": { "x-checksum": "hex:dead" }
        });

        let message = message_from_json(&description).unwrap();
        assert_eq!(message.header.as_ref().unwrap().durable, Some(true));
        assert_eq!(
            message
                .application_properties
                .as_ref()
                .unwrap()
                .get("retries"),
            Some(&Value::Long(3))
        );

        let rendered = message_to_json(&message).unwrap();
        assert_eq!(rendered["header"]["durable"], json!(true));
        assert_eq!(rendered["body"]["value"], json!("hello"));
        assert_eq!(rendered["footer"]["x-checksum"], json!("hex:dead"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(message_from_json(&json!({ "headerz": {} })).is_err());
        assert!(message_from_json(&json!({ "body": { "value": 1, "data": "00" } })).is_err());
    }

    #[test]
    fn test_hex_strings_become_binary() {
        let value = value_from_json(&json!("hex:0102")).unwrap();
        assert_eq!(value, Value::Binary(Bytes::from_static(&[1, 2])));
        assert!(value_from_json(&json!("hex:zz")).is_err());
    }
}
