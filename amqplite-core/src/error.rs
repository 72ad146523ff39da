//! Error types for Amqplite codec operations

use alloc::string::String;

/// Errors that can occur while encoding or decoding messages
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Framing error: a described value carried a descriptor that matches no
    /// recognized section or body code
    #[cfg_attr(feature = "std", error("Framing error: unknown descriptor 0x{0:02x}"))]
    UnknownDescriptor(u64),

    /// Framing error: a section descriptor occurred more than once
    #[cfg_attr(feature = "std", error("Framing error: duplicate section descriptor 0x{0:02x}"))]
    DuplicateSection(u64),

    /// Framing error: a section arrived after a section that must follow it
    #[cfg_attr(
        feature = "std",
        error("Framing error: section descriptor 0x{0:02x} out of protocol order")
    )]
    OutOfOrderSection(u64),

    /// The body slot holds a section that is not one of the three body variants
    #[cfg_attr(feature = "std", error("Decode error: the body section is invalid"))]
    InvalidBody,

    /// A format code outside the supported primitive set
    #[cfg_attr(feature = "std", error("Unknown format code 0x{0:02x}"))]
    UnknownFormatCode(u8),

    /// The buffer ran out before a complete value was read
    #[cfg_attr(
        feature = "std",
        error("Unexpected end of buffer: needed {needed} more bytes, {remaining} remaining")
    )]
    UnexpectedEnd {
        /// The number of bytes the decoder needed.
        needed: usize,
        /// The number of bytes actually remaining.
        remaining: usize,
    },

    /// A string or symbol value held invalid UTF-8
    #[cfg_attr(feature = "std", error("Invalid UTF-8 in string value"))]
    InvalidUtf8,

    /// A structurally invalid primitive encoding
    #[cfg_attr(feature = "std", error("Invalid encoding: {0}"))]
    InvalidEncoding(String),

    /// A section body decoded to a value of the wrong shape
    #[cfg_attr(feature = "std", error("Malformed section body: {0}"))]
    MalformedSection(String),
}
