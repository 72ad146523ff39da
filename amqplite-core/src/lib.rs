//! # Amqplite Core
//!
//! An AMQP 1.0 message section codec: encodes a partially-populated message
//! into its wire representation and decodes received bytes back into one.
//!
//! ## Modules
//!
//! - `constants`: Section descriptor codes and primitive format codes
//! - `error`: Codec error types
//! - `value`: Generic AMQP data model
//! - `codec`: Described-value encoding and decoding
//! - `section`: Concrete message sections and the section sum type
//! - `registry`: Injected descriptor-to-decoder lookup table
//! - `message`: The message aggregate and its codec

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod codec;
pub mod constants;
pub mod error;
pub mod message;
pub mod registry;
pub mod section;
pub mod value;

// Re-export commonly used types
pub use error::CodecError;
pub use message::{Body, DeliveryId, Message, MessageCodec};
pub use registry::SectionRegistry;
pub use section::Section;
pub use value::Value;

/// Result type alias for Amqplite operations
pub type Result<T> = core::result::Result<T, CodecError>;
