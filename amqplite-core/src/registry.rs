//! Descriptor-to-decoder lookup table
//!
//! The mapping from descriptor code to section decoder is explicit
//! configuration handed to [`crate::message::MessageCodec`], not ambient
//! state; tests can run the message codec against a minimal or fake registry.

use crate::constants;
use crate::error::CodecError;
use crate::section::{
    ApplicationProperties, DeliveryAnnotations, Footer, Header, MessageAnnotations, Properties,
    Section,
};
use crate::value::Value;
use alloc::format;
use hashbrown::HashMap;

/// A function that turns a decoded section body into a section
pub type SectionDecoder = fn(Value) -> Result<Section, CodecError>;

/// Lookup table from descriptor code to section decoder
#[derive(Clone)]
pub struct SectionRegistry {
    decoders: HashMap<u64, SectionDecoder>,
}

impl SectionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Create a registry with the nine standard AMQP 1.0 section codes
    pub fn amqp() -> Self {
        let mut registry = Self::new();
        registry.register(Header::DESCRIPTOR, |v| {
            Ok(Section::Header(Header::from_value(v)?))
        });
        registry.register(DeliveryAnnotations::DESCRIPTOR, |v| {
            Ok(Section::DeliveryAnnotations(DeliveryAnnotations::from_value(v)?))
        });
        registry.register(MessageAnnotations::DESCRIPTOR, |v| {
            Ok(Section::MessageAnnotations(MessageAnnotations::from_value(v)?))
        });
        registry.register(Properties::DESCRIPTOR, |v| {
            Ok(Section::Properties(Properties::from_value(v)?))
        });
        registry.register(ApplicationProperties::DESCRIPTOR, |v| {
            Ok(Section::ApplicationProperties(ApplicationProperties::from_value(v)?))
        });
        registry.register(constants::DATA_CODE, |v| match v {
            Value::Binary(bytes) => Ok(Section::Data(bytes)),
            other => Err(CodecError::MalformedSection(format!(
                "data: expected binary, got {other:?}"
            ))),
        });
        registry.register(constants::AMQP_SEQUENCE_CODE, |v| match v {
            Value::List(items) => Ok(Section::AmqpSequence(items)),
            other => Err(CodecError::MalformedSection(format!(
                "amqp-sequence: expected list, got {other:?}"
            ))),
        });
        registry.register(constants::AMQP_VALUE_CODE, |v| Ok(Section::AmqpValue(v)));
        registry.register(Footer::DESCRIPTOR, |v| {
            Ok(Section::Footer(Footer::from_value(v)?))
        });
        registry
    }

    /// Register a decoder for a descriptor code, replacing any existing one
    pub fn register(&mut self, descriptor: u64, decoder: SectionDecoder) {
        self.decoders.insert(descriptor, decoder);
    }

    /// Check whether a descriptor code is registered
    pub fn contains(&self, descriptor: u64) -> bool {
        self.decoders.contains_key(&descriptor)
    }

    /// Decode a section body by descriptor code.
    ///
    /// An unregistered descriptor is the framing error.
    pub fn decode(&self, descriptor: u64, value: Value) -> Result<Section, CodecError> {
        match self.decoders.get(&descriptor) {
            Some(decoder) => decoder(value),
            None => Err(CodecError::UnknownDescriptor(descriptor)),
        }
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self::amqp()
    }
}

impl core::fmt::Debug for SectionRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SectionRegistry")
            .field("descriptors", &self.decoders.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_standard_registry_covers_nine_codes() {
        let registry = SectionRegistry::amqp();
        for code in 0x70u64..=0x78 {
            assert!(registry.contains(code), "missing descriptor 0x{code:02x}");
        }
        assert!(!registry.contains(0x79));
    }

    #[test]
    fn test_unregistered_descriptor_is_framing_error() {
        let registry = SectionRegistry::new();
        assert_eq!(
            registry.decode(0x70, Value::List(vec![])),
            Err(CodecError::UnknownDescriptor(0x70))
        );
    }

    #[test]
    fn test_body_decoders_check_shape() {
        let registry = SectionRegistry::amqp();
        assert!(matches!(
            registry.decode(constants::DATA_CODE, Value::Uint(1)),
            Err(CodecError::MalformedSection(_))
        ));
        assert_eq!(
            registry.decode(constants::AMQP_VALUE_CODE, Value::Uint(1)),
            Ok(Section::AmqpValue(Value::Uint(1)))
        );
    }

    #[test]
    fn test_custom_decoder_replaces_standard() {
        let mut registry = SectionRegistry::amqp();
        registry.register(constants::DATA_CODE, |_| {
            Ok(Section::Data(bytes::Bytes::from_static(b"fixed")))
        });
        assert_eq!(
            registry.decode(constants::DATA_CODE, Value::Null),
            Ok(Section::Data(bytes::Bytes::from_static(b"fixed")))
        );
    }
}
