//! Request encoder
//!
//! Serializes argument lists as RESP arrays of bulk strings.

use bytes::{BufMut, Bytes, BytesMut};

use super::{WireType, CRLF};
use crate::error::{RespError, Result};

/// Encodes commands for the wire
///
/// Stateless; a single instance can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder;

impl Encoder {
    pub fn new() -> Self {
        Encoder
    }

    /// Encode one command and its arguments
    ///
    /// Format: `*<argc>\r\n` then `$<byte_len>\r\n<arg>\r\n` per argument
    pub fn encode<S: AsRef<str>>(&self, args: &[S]) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(encoded_len(args));
        encode_into(&mut buf, args)?;
        Ok(buf.freeze())
    }

    /// Encode several commands back-to-back for a single write
    pub fn encode_multi<S: AsRef<str>>(&self, commands: &[Vec<S>]) -> Result<Bytes> {
        let capacity = commands.iter().map(|args| encoded_len(args)).sum();
        let mut buf = BytesMut::with_capacity(capacity);

        for args in commands {
            encode_into(&mut buf, args)?;
        }

        Ok(buf.freeze())
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn encode_into<S: AsRef<str>>(buf: &mut BytesMut, args: &[S]) -> Result<()> {
    if args.is_empty() {
        return Err(RespError::InvalidArgument(
            "cannot encode an empty command".to_string(),
        ));
    }

    put_header(buf, WireType::Array, args.len());

    for arg in args {
        let bytes = arg.as_ref().as_bytes();
        put_header(buf, WireType::BulkString, bytes.len());
        buf.put_slice(bytes);
        buf.put_slice(CRLF);
    }

    Ok(())
}

fn put_header(buf: &mut BytesMut, wire_type: WireType, len: usize) {
    buf.put_u8(wire_type.as_byte());
    buf.put_slice(len.to_string().as_bytes());
    buf.put_slice(CRLF);
}

/// Exact size of the encoding, used to size the buffer up front
fn encoded_len<S: AsRef<str>>(args: &[S]) -> usize {
    let header = 1 + decimal_len(args.len()) + 2;
    args.iter().fold(header, |acc, arg| {
        let len = arg.as_ref().len();
        acc + 1 + decimal_len(len) + 2 + len + 2
    })
}

fn decimal_len(mut n: usize) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}
