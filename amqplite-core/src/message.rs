//! The message aggregate and its codec

use crate::codec;
use crate::constants::INITIAL_ENCODE_CAPACITY;
use crate::error::CodecError;
use crate::registry::SectionRegistry;
use crate::section::{
    ApplicationProperties, DeliveryAnnotations, Footer, Header, MessageAnnotations, Properties,
    Section,
};
use crate::value::Value;
use bytes::{Buf, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

#[cfg(feature = "logging")]
use tracing::trace;

/// Non-owning handle to delivery-tracking state held by the transport layer.
///
/// The codec never reads or creates one; it rides along on a message so the
/// transport can find its delivery again. Never encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryId(pub u64);

/// A message with independently optional sections.
///
/// Absent sections are simply not encoded; the wire order is fixed as
/// header, delivery-annotations, message-annotations, properties,
/// application-properties, body, footer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Delivery-control metadata
    pub header: Option<Header>,
    /// Hop-scoped annotations
    pub delivery_annotations: Option<DeliveryAnnotations>,
    /// Route-scoped annotations
    pub message_annotations: Option<MessageAnnotations>,
    /// Application-facing properties
    pub properties: Option<Properties>,
    /// Application-defined key/value pairs
    pub application_properties: Option<ApplicationProperties>,
    /// The payload, one of the three body variants when well formed
    pub body_section: Option<Section>,
    /// Trailing metadata
    pub footer: Option<Footer>,
    #[serde(skip)]
    delivery: Option<DeliveryId>,
}

/// Read-only view of a message body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Body<'a> {
    /// The single value of an amqp-value body
    Value(&'a Value),
    /// The opaque payload of a data body
    Data(&'a Bytes),
    /// The elements of an amqp-sequence body
    Sequence(&'a [Value]),
}

impl Message {
    /// Create a message with no sections
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a message whose body is an amqp-value wrapping `value`
    pub fn with_body(value: Value) -> Self {
        Self {
            body_section: Some(Section::AmqpValue(value)),
            ..Self::default()
        }
    }

    /// The body, classified by variant.
    ///
    /// Returns `Ok(None)` when no body section is present. Fails with
    /// [`CodecError::InvalidBody`] only if the body slot was populated
    /// directly with a non-body section; the decoder never produces such a
    /// message.
    pub fn body(&self) -> Result<Option<Body<'_>>, CodecError> {
        match &self.body_section {
            None => Ok(None),
            Some(Section::AmqpValue(value)) => Ok(Some(Body::Value(value))),
            Some(Section::Data(bytes)) => Ok(Some(Body::Data(bytes))),
            Some(Section::AmqpSequence(items)) => Ok(Some(Body::Sequence(items))),
            Some(_) => Err(CodecError::InvalidBody),
        }
    }

    /// The delivery handle set by the transport layer, if any
    pub fn delivery(&self) -> Option<DeliveryId> {
        self.delivery
    }

    /// Attach or clear the transport layer's delivery handle
    pub fn set_delivery(&mut self, delivery: Option<DeliveryId>) {
        self.delivery = delivery;
    }
}

/// Encodes and decodes messages against an injected section registry
#[derive(Debug, Clone, Default)]
pub struct MessageCodec {
    registry: SectionRegistry,
}

impl MessageCodec {
    /// Create a codec over a specific registry
    pub fn new(registry: SectionRegistry) -> Self {
        Self { registry }
    }

    /// Create a codec over the standard AMQP 1.0 section registry
    pub fn amqp() -> Self {
        Self::new(SectionRegistry::amqp())
    }

    /// Encode a message into a new buffer.
    ///
    /// Populated sections are written in the fixed wire order; absent
    /// sections emit nothing. A message with no sections encodes to an
    /// empty buffer. The message is not mutated.
    pub fn encode(&self, message: &Message) -> Bytes {
        let mut buf = BytesMut::with_capacity(INITIAL_ENCODE_CAPACITY);
        if let Some(header) = &message.header {
            codec::encode_described(&mut buf, Header::DESCRIPTOR, &header.to_value());
        }
        if let Some(annotations) = &message.delivery_annotations {
            codec::encode_described(&mut buf, DeliveryAnnotations::DESCRIPTOR, &annotations.to_value());
        }
        if let Some(annotations) = &message.message_annotations {
            codec::encode_described(&mut buf, MessageAnnotations::DESCRIPTOR, &annotations.to_value());
        }
        if let Some(properties) = &message.properties {
            codec::encode_described(&mut buf, Properties::DESCRIPTOR, &properties.to_value());
        }
        if let Some(properties) = &message.application_properties {
            codec::encode_described(&mut buf, ApplicationProperties::DESCRIPTOR, &properties.to_value());
        }
        if let Some(body) = &message.body_section {
            codec::encode_described(&mut buf, body.descriptor(), &body.to_value());
        }
        if let Some(footer) = &message.footer {
            codec::encode_described(&mut buf, Footer::DESCRIPTOR, &footer.to_value());
        }
        #[cfg(feature = "logging")]
        trace!("Encoded message into {} bytes", buf.len());
        buf.freeze()
    }

    /// Decode a message, consuming the buffer to exhaustion.
    ///
    /// Each described value is classified through the registry and assigned
    /// to its slot. A descriptor the registry does not know, a repeated
    /// section, or a section arriving out of protocol order is a framing
    /// error. On error the partially decoded message is discarded; the
    /// buffer's position at that point is unspecified.
    pub fn decode(&self, buf: &mut Bytes) -> Result<Message, CodecError> {
        let mut message = Message::new();
        let mut last_slot: Option<u8> = None;

        while buf.has_remaining() {
            let (descriptor, value) = codec::decode_described(buf)?;
            let section = self.registry.decode(descriptor, value)?;
            #[cfg(feature = "logging")]
            trace!("Decoded {} section (descriptor 0x{:02x})", section.name(), descriptor);

            let slot = slot_index(&section);
            if let Some(last) = last_slot {
                if slot == last {
                    return Err(CodecError::DuplicateSection(descriptor));
                }
                if slot < last {
                    return Err(CodecError::OutOfOrderSection(descriptor));
                }
            }
            last_slot = Some(slot);

            match section {
                Section::Header(header) => message.header = Some(header),
                Section::DeliveryAnnotations(annotations) => {
                    message.delivery_annotations = Some(annotations)
                }
                Section::MessageAnnotations(annotations) => {
                    message.message_annotations = Some(annotations)
                }
                Section::Properties(properties) => message.properties = Some(properties),
                Section::ApplicationProperties(properties) => {
                    message.application_properties = Some(properties)
                }
                body @ (Section::Data(_) | Section::AmqpSequence(_) | Section::AmqpValue(_)) => {
                    message.body_section = Some(body)
                }
                Section::Footer(footer) => message.footer = Some(footer),
            }
        }

        Ok(message)
    }
}

/// Position of a section in the fixed wire order; the three body variants
/// share one slot, which is what makes a second body a duplicate.
fn slot_index(section: &Section) -> u8 {
    match section {
        Section::Header(_) => 0,
        Section::DeliveryAnnotations(_) => 1,
        Section::MessageAnnotations(_) => 2,
        Section::Properties(_) => 3,
        Section::ApplicationProperties(_) => 4,
        Section::Data(_) | Section::AmqpSequence(_) | Section::AmqpValue(_) => 5,
        Section::Footer(_) => 6,
    }
}
