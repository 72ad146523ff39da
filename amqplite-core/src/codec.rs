//! Described-value encoding and decoding
//!
//! This is the shared codec every section delegates to. Encoding always emits
//! the smallest AMQP 1.0 representation that fits the value; decoding accepts
//! any recognized width for a type, so peers that encode wide fixed-width
//! values interoperate.

use crate::constants::format_code as fc;
use crate::constants::MAX_NESTING_DEPTH;
use crate::error::CodecError;
use crate::value::Value;
use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Encode a single value into the buffer
pub fn encode_value(buf: &mut BytesMut, value: &Value) {
    match value {
        Value::Null => buf.put_u8(fc::NULL),
        Value::Bool(true) => buf.put_u8(fc::TRUE),
        Value::Bool(false) => buf.put_u8(fc::FALSE),
        Value::Ubyte(v) => {
            buf.put_u8(fc::UBYTE);
            buf.put_u8(*v);
        }
        Value::Ushort(v) => {
            buf.put_u8(fc::USHORT);
            buf.put_u16(*v);
        }
        Value::Uint(0) => buf.put_u8(fc::UINT0),
        Value::Uint(v) if *v <= 0xFF => {
            buf.put_u8(fc::SMALL_UINT);
            buf.put_u8(*v as u8);
        }
        Value::Uint(v) => {
            buf.put_u8(fc::UINT);
            buf.put_u32(*v);
        }
        Value::Ulong(0) => buf.put_u8(fc::ULONG0),
        Value::Ulong(v) if *v <= 0xFF => {
            buf.put_u8(fc::SMALL_ULONG);
            buf.put_u8(*v as u8);
        }
        Value::Ulong(v) => {
            buf.put_u8(fc::ULONG);
            buf.put_u64(*v);
        }
        Value::Byte(v) => {
            buf.put_u8(fc::BYTE);
            buf.put_i8(*v);
        }
        Value::Short(v) => {
            buf.put_u8(fc::SHORT);
            buf.put_i16(*v);
        }
        Value::Int(v) if i8::try_from(*v).is_ok() => {
            buf.put_u8(fc::SMALL_INT);
            buf.put_i8(*v as i8);
        }
        Value::Int(v) => {
            buf.put_u8(fc::INT);
            buf.put_i32(*v);
        }
        Value::Long(v) if i8::try_from(*v).is_ok() => {
            buf.put_u8(fc::SMALL_LONG);
            buf.put_i8(*v as i8);
        }
        Value::Long(v) => {
            buf.put_u8(fc::LONG);
            buf.put_i64(*v);
        }
        Value::Float(v) => {
            buf.put_u8(fc::FLOAT);
            buf.put_f32(*v);
        }
        Value::Double(v) => {
            buf.put_u8(fc::DOUBLE);
            buf.put_f64(*v);
        }
        Value::Timestamp(v) => {
            buf.put_u8(fc::TIMESTAMP);
            buf.put_i64(*v);
        }
        Value::Uuid(v) => {
            buf.put_u8(fc::UUID);
            buf.put_slice(v);
        }
        Value::Binary(b) => encode_variable(buf, fc::VBIN8, fc::VBIN32, b),
        Value::String(s) => encode_variable(buf, fc::STR8, fc::STR32, s.as_bytes()),
        Value::Symbol(s) => encode_variable(buf, fc::SYM8, fc::SYM32, s.as_bytes()),
        Value::List(items) => {
            if items.is_empty() {
                buf.put_u8(fc::LIST0);
                return;
            }
            let mut body = BytesMut::new();
            for item in items {
                encode_value(&mut body, item);
            }
            encode_compound(buf, fc::LIST8, fc::LIST32, &body, items.len());
        }
        Value::Map(pairs) => {
            let mut body = BytesMut::new();
            for (k, v) in pairs {
                encode_value(&mut body, k);
                encode_value(&mut body, v);
            }
            encode_compound(buf, fc::MAP8, fc::MAP32, &body, pairs.len() * 2);
        }
        Value::Described(descriptor, inner) => {
            encode_described(buf, *descriptor, inner);
        }
    }
}

/// Encode a described value: constructor, ulong descriptor, then the value
pub fn encode_described(buf: &mut BytesMut, descriptor: u64, value: &Value) {
    buf.put_u8(fc::DESCRIBED);
    encode_value(buf, &Value::Ulong(descriptor));
    encode_value(buf, value);
}

fn encode_variable(buf: &mut BytesMut, small: u8, large: u8, data: &[u8]) {
    if data.len() <= 0xFF {
        buf.put_u8(small);
        buf.put_u8(data.len() as u8);
    } else {
        buf.put_u8(large);
        buf.put_u32(data.len() as u32);
    }
    buf.put_slice(data);
}

fn encode_compound(buf: &mut BytesMut, small: u8, large: u8, body: &BytesMut, count: usize) {
    // Compound size counts the count field plus the encoded elements
    if body.len() + 1 <= 0xFF && count <= 0xFF {
        buf.put_u8(small);
        buf.put_u8((body.len() + 1) as u8);
        buf.put_u8(count as u8);
    } else {
        buf.put_u8(large);
        buf.put_u32((body.len() + 4) as u32);
        buf.put_u32(count as u32);
    }
    buf.put_slice(body);
}

/// Decode a single value from the buffer
pub fn decode_value(buf: &mut Bytes) -> Result<Value, CodecError> {
    decode_value_at(buf, 0)
}

/// Decode a described value, returning its descriptor code and value
pub fn decode_described(buf: &mut Bytes) -> Result<(u64, Value), CodecError> {
    let format = take_u8(buf)?;
    if format != fc::DESCRIBED {
        return Err(CodecError::InvalidEncoding(format!(
            "expected described constructor 0x00, got 0x{format:02x}"
        )));
    }
    let descriptor = match decode_value_at(buf, 1)? {
        Value::Ulong(code) => code,
        other => {
            return Err(CodecError::InvalidEncoding(format!(
                "unsupported descriptor encoding: {other:?}"
            )))
        }
    };
    let value = decode_value_at(buf, 1)?;
    Ok((descriptor, value))
}

fn decode_value_at(buf: &mut Bytes, depth: usize) -> Result<Value, CodecError> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(CodecError::InvalidEncoding(format!(
            "nesting deeper than {MAX_NESTING_DEPTH} levels"
        )));
    }
    let format = take_u8(buf)?;
    decode_with_format(buf, format, depth)
}

fn decode_with_format(buf: &mut Bytes, format: u8, depth: usize) -> Result<Value, CodecError> {
    let value = match format {
        fc::DESCRIBED => {
            let descriptor = match decode_value_at(buf, depth + 1)? {
                Value::Ulong(code) => code,
                other => {
                    return Err(CodecError::InvalidEncoding(format!(
                        "unsupported descriptor encoding: {other:?}"
                    )))
                }
            };
            Value::Described(descriptor, Box::new(decode_value_at(buf, depth + 1)?))
        }
        fc::NULL => Value::Null,
        fc::TRUE => Value::Bool(true),
        fc::FALSE => Value::Bool(false),
        fc::BOOLEAN => match take_u8(buf)? {
            0 => Value::Bool(false),
            1 => Value::Bool(true),
            other => {
                return Err(CodecError::InvalidEncoding(format!(
                    "boolean octet must be 0 or 1, got {other}"
                )))
            }
        },
        fc::UINT0 => Value::Uint(0),
        fc::ULONG0 => Value::Ulong(0),
        fc::LIST0 => Value::List(Vec::new()),
        fc::UBYTE => Value::Ubyte(take_u8(buf)?),
        fc::BYTE => Value::Byte(take_u8(buf)? as i8),
        fc::SMALL_UINT => Value::Uint(take_u8(buf)? as u32),
        fc::SMALL_ULONG => Value::Ulong(take_u8(buf)? as u64),
        fc::SMALL_INT => Value::Int(take_u8(buf)? as i8 as i32),
        fc::SMALL_LONG => Value::Long(take_u8(buf)? as i8 as i64),
        fc::USHORT => {
            ensure(buf, 2)?;
            Value::Ushort(buf.get_u16())
        }
        fc::SHORT => {
            ensure(buf, 2)?;
            Value::Short(buf.get_i16())
        }
        fc::UINT => {
            ensure(buf, 4)?;
            Value::Uint(buf.get_u32())
        }
        fc::INT => {
            ensure(buf, 4)?;
            Value::Int(buf.get_i32())
        }
        fc::FLOAT => {
            ensure(buf, 4)?;
            Value::Float(buf.get_f32())
        }
        fc::ULONG => {
            ensure(buf, 8)?;
            Value::Ulong(buf.get_u64())
        }
        fc::LONG => {
            ensure(buf, 8)?;
            Value::Long(buf.get_i64())
        }
        fc::DOUBLE => {
            ensure(buf, 8)?;
            Value::Double(buf.get_f64())
        }
        fc::TIMESTAMP => {
            ensure(buf, 8)?;
            Value::Timestamp(buf.get_i64())
        }
        fc::UUID => {
            let bytes = take_bytes(buf, 16)?;
            let mut uuid = [0u8; 16];
            uuid.copy_from_slice(&bytes);
            Value::Uuid(uuid)
        }
        fc::VBIN8 => {
            let len = take_u8(buf)? as usize;
            Value::Binary(take_bytes(buf, len)?)
        }
        fc::VBIN32 => {
            let len = take_u32(buf)? as usize;
            Value::Binary(take_bytes(buf, len)?)
        }
        fc::STR8 => {
            let len = take_u8(buf)? as usize;
            Value::String(take_utf8(buf, len)?)
        }
        fc::STR32 => {
            let len = take_u32(buf)? as usize;
            Value::String(take_utf8(buf, len)?)
        }
        fc::SYM8 => {
            let len = take_u8(buf)? as usize;
            Value::Symbol(take_utf8(buf, len)?)
        }
        fc::SYM32 => {
            let len = take_u32(buf)? as usize;
            Value::Symbol(take_utf8(buf, len)?)
        }
        fc::LIST8 => {
            let size = take_u8(buf)? as usize;
            ensure(buf, size)?;
            let count = take_u8(buf)? as usize;
            Value::List(decode_n(buf, count, depth)?)
        }
        fc::LIST32 => {
            let size = take_u32(buf)? as usize;
            ensure(buf, size)?;
            let count = take_u32(buf)? as usize;
            Value::List(decode_n(buf, count, depth)?)
        }
        fc::MAP8 => {
            let size = take_u8(buf)? as usize;
            ensure(buf, size)?;
            let count = take_u8(buf)? as usize;
            Value::Map(decode_pairs(buf, count, depth)?)
        }
        fc::MAP32 => {
            let size = take_u32(buf)? as usize;
            ensure(buf, size)?;
            let count = take_u32(buf)? as usize;
            Value::Map(decode_pairs(buf, count, depth)?)
        }
        other => return Err(CodecError::UnknownFormatCode(other)),
    };

    Ok(value)
}

fn decode_n(buf: &mut Bytes, count: usize, depth: usize) -> Result<Vec<Value>, CodecError> {
    let mut items = Vec::with_capacity(count.min(256));
    for _ in 0..count {
        items.push(decode_value_at(buf, depth + 1)?);
    }
    Ok(items)
}

fn decode_pairs(
    buf: &mut Bytes,
    count: usize,
    depth: usize,
) -> Result<Vec<(Value, Value)>, CodecError> {
    if count % 2 != 0 {
        return Err(CodecError::InvalidEncoding(format!(
            "map element count must be even, got {count}"
        )));
    }
    let pairs = count / 2;
    let mut map = Vec::with_capacity(pairs.min(128));
    for _ in 0..pairs {
        let key = decode_value_at(buf, depth + 1)?;
        let value = decode_value_at(buf, depth + 1)?;
        map.push((key, value));
    }
    Ok(map)
}

fn ensure(buf: &Bytes, needed: usize) -> Result<(), CodecError> {
    if buf.remaining() < needed {
        return Err(CodecError::UnexpectedEnd {
            needed,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}

fn take_u8(buf: &mut Bytes) -> Result<u8, CodecError> {
    ensure(buf, 1)?;
    Ok(buf.get_u8())
}

fn take_u32(buf: &mut Bytes) -> Result<u32, CodecError> {
    ensure(buf, 4)?;
    Ok(buf.get_u32())
}

fn take_bytes(buf: &mut Bytes, len: usize) -> Result<Bytes, CodecError> {
    ensure(buf, len)?;
    Ok(buf.split_to(len))
}

fn take_utf8(buf: &mut Bytes, len: usize) -> Result<String, CodecError> {
    let bytes = take_bytes(buf, len)?;
    let s = core::str::from_utf8(&bytes).map_err(|_| CodecError::InvalidUtf8)?;
    Ok(String::from(s))
}
