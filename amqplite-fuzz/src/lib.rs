//! Fuzzing placeholder for the amqplite-core decoder
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_decoder

use bytes::Bytes;

pub fn fuzz_decode(data: &[u8]) {
    use amqplite_core::MessageCodec;

    // Try to decode a whole message - should never panic
    let mut buf = Bytes::copy_from_slice(data);
    let _ = MessageCodec::amqp().decode(&mut buf);
}

pub fn fuzz_value(data: &[u8]) {
    use amqplite_core::codec::decode_value;

    // Try to decode a single value - should never panic
    let mut buf = Bytes::copy_from_slice(data);
    let _ = decode_value(&mut buf);
}
