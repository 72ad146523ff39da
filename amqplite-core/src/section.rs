//! Concrete message sections and the section sum type

use crate::constants;
use crate::error::CodecError;
use crate::value::Value;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Delivery-control metadata, the first section on the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Whether the message must survive broker restarts
    pub durable: Option<bool>,
    /// Relative delivery priority
    pub priority: Option<u8>,
    /// Time to live in milliseconds
    pub ttl: Option<u32>,
    /// Whether this is the first acquisition of the message
    pub first_acquirer: Option<bool>,
    /// Number of prior unsuccessful delivery attempts
    pub delivery_count: Option<u32>,
}

impl Header {
    /// Descriptor code of this section
    pub const DESCRIPTOR: u64 = constants::HEADER_CODE;

    /// Build the list-encoded section body
    pub fn to_value(&self) -> Value {
        Value::List(trim_trailing_nulls(alloc::vec![
            opt(self.durable.map(Value::Bool)),
            opt(self.priority.map(Value::Ubyte)),
            opt(self.ttl.map(Value::Uint)),
            opt(self.first_acquirer.map(Value::Bool)),
            opt(self.delivery_count.map(Value::Uint)),
        ]))
    }

    /// Reconstruct the section from its decoded body
    pub fn from_value(value: Value) -> Result<Self, CodecError> {
        let mut fields = list_fields(value, "header")?;
        Ok(Header {
            durable: opt_bool(fields.next(), "header.durable")?,
            priority: opt_ubyte(fields.next(), "header.priority")?,
            ttl: opt_uint(fields.next(), "header.ttl")?,
            first_acquirer: opt_bool(fields.next(), "header.first-acquirer")?,
            delivery_count: opt_uint(fields.next(), "header.delivery-count")?,
        })
    }
}

/// Immutable application-facing properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    /// Application message identifier (string, ulong, uuid, or binary)
    pub message_id: Option<Value>,
    /// Identity of the producing user
    pub user_id: Option<Bytes>,
    /// Destination node address
    pub to: Option<String>,
    /// Message subject
    pub subject: Option<String>,
    /// Node to send replies to
    pub reply_to: Option<String>,
    /// Application correlation identifier
    pub correlation_id: Option<Value>,
    /// MIME content type of the data body
    pub content_type: Option<String>,
    /// MIME content encoding of the data body
    pub content_encoding: Option<String>,
    /// Time at which the message expires, milliseconds since the epoch
    pub absolute_expiry_time: Option<i64>,
    /// Time of creation, milliseconds since the epoch
    pub creation_time: Option<i64>,
    /// Group the message belongs to
    pub group_id: Option<String>,
    /// Position of the message within its group
    pub group_sequence: Option<u32>,
    /// Group the reply message belongs to
    pub reply_to_group_id: Option<String>,
}

impl Properties {
    /// Descriptor code of this section
    pub const DESCRIPTOR: u64 = constants::PROPERTIES_CODE;

    /// Build the list-encoded section body
    pub fn to_value(&self) -> Value {
        Value::List(trim_trailing_nulls(alloc::vec![
            opt(self.message_id.clone()),
            opt(self.user_id.clone().map(Value::Binary)),
            opt(self.to.clone().map(Value::String)),
            opt(self.subject.clone().map(Value::String)),
            opt(self.reply_to.clone().map(Value::String)),
            opt(self.correlation_id.clone()),
            opt(self.content_type.clone().map(Value::Symbol)),
            opt(self.content_encoding.clone().map(Value::Symbol)),
            opt(self.absolute_expiry_time.map(Value::Timestamp)),
            opt(self.creation_time.map(Value::Timestamp)),
            opt(self.group_id.clone().map(Value::String)),
            opt(self.group_sequence.map(Value::Uint)),
            opt(self.reply_to_group_id.clone().map(Value::String)),
        ]))
    }

    /// Reconstruct the section from its decoded body
    pub fn from_value(value: Value) -> Result<Self, CodecError> {
        let mut fields = list_fields(value, "properties")?;
        Ok(Properties {
            message_id: opt_any(fields.next()),
            user_id: opt_binary(fields.next(), "properties.user-id")?,
            to: opt_string(fields.next(), "properties.to")?,
            subject: opt_string(fields.next(), "properties.subject")?,
            reply_to: opt_string(fields.next(), "properties.reply-to")?,
            correlation_id: opt_any(fields.next()),
            content_type: opt_symbol(fields.next(), "properties.content-type")?,
            content_encoding: opt_symbol(fields.next(), "properties.content-encoding")?,
            absolute_expiry_time: opt_timestamp(fields.next(), "properties.absolute-expiry-time")?,
            creation_time: opt_timestamp(fields.next(), "properties.creation-time")?,
            group_id: opt_string(fields.next(), "properties.group-id")?,
            group_sequence: opt_uint(fields.next(), "properties.group-sequence")?,
            reply_to_group_id: opt_string(fields.next(), "properties.reply-to-group-id")?,
        })
    }
}

/// Hop-scoped annotations, not forwarded past the receiving link
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryAnnotations(pub Vec<(Value, Value)>);

/// Annotations that travel with the message for its entire route
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageAnnotations(pub Vec<(Value, Value)>);

/// Trailing metadata, the last section on the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Footer(pub Vec<(Value, Value)>);

macro_rules! annotation_impl {
    ($ty:ident, $code:expr, $name:literal) => {
        impl $ty {
            /// Descriptor code of this section
            pub const DESCRIPTOR: u64 = $code;

            /// Create an empty annotation map
            pub fn new() -> Self {
                Self(Vec::new())
            }

            /// Append an entry, keeping insertion order
            pub fn insert(&mut self, key: Value, value: Value) {
                self.0.push((key, value));
            }

            /// Look up the first entry with the given key
            pub fn get(&self, key: &Value) -> Option<&Value> {
                self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }

            /// Build the map-encoded section body
            pub fn to_value(&self) -> Value {
                Value::Map(self.0.clone())
            }

            /// Reconstruct the section from its decoded body
            pub fn from_value(value: Value) -> Result<Self, CodecError> {
                match value {
                    Value::Map(pairs) => Ok(Self(pairs)),
                    other => Err(CodecError::MalformedSection(format!(
                        concat!($name, ": expected map, got {:?}"),
                        other
                    ))),
                }
            }
        }
    };
}

annotation_impl!(DeliveryAnnotations, constants::DELIVERY_ANNOTATIONS_CODE, "delivery-annotations");
annotation_impl!(MessageAnnotations, constants::MESSAGE_ANNOTATIONS_CODE, "message-annotations");
annotation_impl!(Footer, constants::FOOTER_CODE, "footer");

/// Application-defined key/value pairs with string keys
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationProperties(pub Vec<(String, Value)>);

impl ApplicationProperties {
    /// Descriptor code of this section
    pub const DESCRIPTOR: u64 = constants::APPLICATION_PROPERTIES_CODE;

    /// Create an empty property map
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an entry, keeping insertion order
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.push((key.into(), value));
    }

    /// Look up the first entry with the given key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Build the map-encoded section body
    pub fn to_value(&self) -> Value {
        Value::Map(
            self.0
                .iter()
                .map(|(k, v)| (Value::String(k.clone()), v.clone()))
                .collect(),
        )
    }

    /// Reconstruct the section from its decoded body
    pub fn from_value(value: Value) -> Result<Self, CodecError> {
        let pairs = match value {
            Value::Map(pairs) => pairs,
            other => {
                return Err(CodecError::MalformedSection(format!(
                    "application-properties: expected map, got {other:?}"
                )))
            }
        };
        let mut entries = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            match key {
                Value::String(key) => entries.push((key, value)),
                other => {
                    return Err(CodecError::MalformedSection(format!(
                        "application-properties: expected string key, got {other:?}"
                    )))
                }
            }
        }
        Ok(ApplicationProperties(entries))
    }
}

/// One message section, tagged by its descriptor.
///
/// The three body variants (`Data`, `AmqpSequence`, `AmqpValue`) are ordinary
/// members of this union; the message keeps whichever one arrived in its
/// single body slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Section {
    /// Delivery-control metadata
    Header(Header),
    /// Hop-scoped annotations
    DeliveryAnnotations(DeliveryAnnotations),
    /// Route-scoped annotations
    MessageAnnotations(MessageAnnotations),
    /// Application-facing properties
    Properties(Properties),
    /// Application-defined key/value pairs
    ApplicationProperties(ApplicationProperties),
    /// Opaque binary body
    Data(Bytes),
    /// Ordered sequence body
    AmqpSequence(Vec<Value>),
    /// Single-value body
    AmqpValue(Value),
    /// Trailing metadata
    Footer(Footer),
}

impl Section {
    /// Descriptor code identifying this section on the wire
    pub fn descriptor(&self) -> u64 {
        match self {
            Section::Header(_) => constants::HEADER_CODE,
            Section::DeliveryAnnotations(_) => constants::DELIVERY_ANNOTATIONS_CODE,
            Section::MessageAnnotations(_) => constants::MESSAGE_ANNOTATIONS_CODE,
            Section::Properties(_) => constants::PROPERTIES_CODE,
            Section::ApplicationProperties(_) => constants::APPLICATION_PROPERTIES_CODE,
            Section::Data(_) => constants::DATA_CODE,
            Section::AmqpSequence(_) => constants::AMQP_SEQUENCE_CODE,
            Section::AmqpValue(_) => constants::AMQP_VALUE_CODE,
            Section::Footer(_) => constants::FOOTER_CODE,
        }
    }

    /// Human-readable section name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Section::Header(_) => "header",
            Section::DeliveryAnnotations(_) => "delivery-annotations",
            Section::MessageAnnotations(_) => "message-annotations",
            Section::Properties(_) => "properties",
            Section::ApplicationProperties(_) => "application-properties",
            Section::Data(_) => "data",
            Section::AmqpSequence(_) => "amqp-sequence",
            Section::AmqpValue(_) => "amqp-value",
            Section::Footer(_) => "footer",
        }
    }

    /// Whether this section is one of the three body variants
    pub fn is_body(&self) -> bool {
        matches!(
            self,
            Section::Data(_) | Section::AmqpSequence(_) | Section::AmqpValue(_)
        )
    }

    /// Build the section body as a value for the shared codec
    pub fn to_value(&self) -> Value {
        match self {
            Section::Header(h) => h.to_value(),
            Section::DeliveryAnnotations(a) => a.to_value(),
            Section::MessageAnnotations(a) => a.to_value(),
            Section::Properties(p) => p.to_value(),
            Section::ApplicationProperties(p) => p.to_value(),
            Section::Data(bytes) => Value::Binary(bytes.clone()),
            Section::AmqpSequence(items) => Value::List(items.clone()),
            Section::AmqpValue(value) => value.clone(),
            Section::Footer(f) => f.to_value(),
        }
    }
}

fn opt(value: Option<Value>) -> Value {
    value.unwrap_or(Value::Null)
}

fn trim_trailing_nulls(mut fields: Vec<Value>) -> Vec<Value> {
    while fields.last() == Some(&Value::Null) {
        fields.pop();
    }
    fields
}

fn list_fields(value: Value, section: &str) -> Result<alloc::vec::IntoIter<Value>, CodecError> {
    match value {
        Value::List(items) => Ok(items.into_iter()),
        other => Err(CodecError::MalformedSection(format!(
            "{section}: expected list, got {other:?}"
        ))),
    }
}

fn opt_any(value: Option<Value>) -> Option<Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(v),
    }
}

fn opt_bool(value: Option<Value>, field: &str) -> Result<Option<bool>, CodecError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(v)) => Ok(Some(v)),
        Some(other) => Err(malformed(field, "boolean", other)),
    }
}

fn opt_ubyte(value: Option<Value>, field: &str) -> Result<Option<u8>, CodecError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Ubyte(v)) => Ok(Some(v)),
        Some(other) => Err(malformed(field, "ubyte", other)),
    }
}

fn opt_uint(value: Option<Value>, field: &str) -> Result<Option<u32>, CodecError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Uint(v)) => Ok(Some(v)),
        Some(other) => Err(malformed(field, "uint", other)),
    }
}

fn opt_string(value: Option<Value>, field: &str) -> Result<Option<String>, CodecError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(v)) => Ok(Some(v)),
        Some(other) => Err(malformed(field, "string", other)),
    }
}

fn opt_symbol(value: Option<Value>, field: &str) -> Result<Option<String>, CodecError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Symbol(v)) => Ok(Some(v)),
        Some(other) => Err(malformed(field, "symbol", other)),
    }
}

fn opt_binary(value: Option<Value>, field: &str) -> Result<Option<Bytes>, CodecError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Binary(v)) => Ok(Some(v)),
        Some(other) => Err(malformed(field, "binary", other)),
    }
}

fn opt_timestamp(value: Option<Value>, field: &str) -> Result<Option<i64>, CodecError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Timestamp(v)) => Ok(Some(v)),
        Some(other) => Err(malformed(field, "timestamp", other)),
    }
}

fn malformed(field: &str, expected: &str, got: Value) -> CodecError {
    CodecError::MalformedSection(format!("{field}: expected {expected}, got {got:?}"))
}
