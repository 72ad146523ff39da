//! Descriptor codes and format-code constants for the AMQP 1.0 message encoding

/// Descriptor code of the header section
pub const HEADER_CODE: u64 = 0x70;

/// Descriptor code of the delivery-annotations section
pub const DELIVERY_ANNOTATIONS_CODE: u64 = 0x71;

/// Descriptor code of the message-annotations section
pub const MESSAGE_ANNOTATIONS_CODE: u64 = 0x72;

/// Descriptor code of the properties section
pub const PROPERTIES_CODE: u64 = 0x73;

/// Descriptor code of the application-properties section
pub const APPLICATION_PROPERTIES_CODE: u64 = 0x74;

/// Descriptor code of the data body section
pub const DATA_CODE: u64 = 0x75;

/// Descriptor code of the amqp-sequence body section
pub const AMQP_SEQUENCE_CODE: u64 = 0x76;

/// Descriptor code of the amqp-value body section
pub const AMQP_VALUE_CODE: u64 = 0x77;

/// Descriptor code of the footer section
pub const FOOTER_CODE: u64 = 0x78;

/// Initial capacity of the buffer allocated by message encode.
/// Small messages fit without reallocation; larger ones grow as needed.
pub const INITIAL_ENCODE_CAPACITY: usize = 128;

/// Maximum nesting depth of described, list, and map values the decoder
/// accepts. Decoding recurses per level; the limit keeps malformed input
/// (e.g. a run of described-type constructors) from exhausting the stack.
pub const MAX_NESTING_DEPTH: usize = 64;

/// AMQP 1.0 primitive format codes recognized by the shared codec
pub mod format_code {
    /// Described-type constructor
    pub const DESCRIBED: u8 = 0x00;
    /// null
    pub const NULL: u8 = 0x40;
    /// boolean true
    pub const TRUE: u8 = 0x41;
    /// boolean false
    pub const FALSE: u8 = 0x42;
    /// uint value 0
    pub const UINT0: u8 = 0x43;
    /// ulong value 0
    pub const ULONG0: u8 = 0x44;
    /// empty list
    pub const LIST0: u8 = 0x45;
    /// unsigned byte
    pub const UBYTE: u8 = 0x50;
    /// signed byte
    pub const BYTE: u8 = 0x51;
    /// uint in one byte
    pub const SMALL_UINT: u8 = 0x52;
    /// ulong in one byte
    pub const SMALL_ULONG: u8 = 0x53;
    /// int in one byte
    pub const SMALL_INT: u8 = 0x54;
    /// long in one byte
    pub const SMALL_LONG: u8 = 0x55;
    /// boolean in one byte
    pub const BOOLEAN: u8 = 0x56;
    /// unsigned short, 2 bytes big-endian
    pub const USHORT: u8 = 0x60;
    /// signed short, 2 bytes big-endian
    pub const SHORT: u8 = 0x61;
    /// uint, 4 bytes big-endian
    pub const UINT: u8 = 0x70;
    /// int, 4 bytes big-endian
    pub const INT: u8 = 0x71;
    /// IEEE 754 binary32
    pub const FLOAT: u8 = 0x72;
    /// ulong, 8 bytes big-endian
    pub const ULONG: u8 = 0x80;
    /// long, 8 bytes big-endian
    pub const LONG: u8 = 0x81;
    /// IEEE 754 binary64
    pub const DOUBLE: u8 = 0x82;
    /// milliseconds since the Unix epoch, 8 bytes big-endian
    pub const TIMESTAMP: u8 = 0x83;
    /// RFC 4122 UUID, 16 bytes
    pub const UUID: u8 = 0x98;
    /// binary with one-byte length
    pub const VBIN8: u8 = 0xA0;
    /// UTF-8 string with one-byte length
    pub const STR8: u8 = 0xA1;
    /// symbol with one-byte length
    pub const SYM8: u8 = 0xA3;
    /// binary with four-byte length
    pub const VBIN32: u8 = 0xB0;
    /// UTF-8 string with four-byte length
    pub const STR32: u8 = 0xB1;
    /// symbol with four-byte length
    pub const SYM32: u8 = 0xB3;
    /// list with one-byte size and count
    pub const LIST8: u8 = 0xC0;
    /// map with one-byte size and count
    pub const MAP8: u8 = 0xC1;
    /// list with four-byte size and count
    pub const LIST32: u8 = 0xD0;
    /// map with four-byte size and count
    pub const MAP32: u8 = 0xD1;
}
