//! Reply parser
//!
//! Blocking RESP decoder over any [`BufRead`] source.
//!
//! ## Reading Model
//! Callers first call [`Parser::peek_type`] to consume the marker byte, then
//! the reader for that type. Arrays do the same for every element, so a
//! reply may freely mix scalars, errors and nested arrays.
//!
//! Every read either returns a complete value or fails; a stream that ends
//! early is a [`RespError::Decode`], never partial data.

use std::io::{self, BufRead, Read};

use super::{
    ErrorValue, Value, WireType, CRLF, DEFAULT_MAX_DEPTH, DEFAULT_MAX_LINE_LEN, MAX_BULK_LEN,
};
use crate::config::Config;
use crate::error::{RespError, Result};

/// Cap on the up-front allocation for arrays and bulk strings
const PREALLOC_LIMIT: usize = 64 * 1024;

/// Decodes RESP values from a byte stream
#[derive(Debug, Clone, Copy)]
pub struct Parser {
    max_bulk_len: usize,
    max_depth: usize,
    max_line_len: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            max_bulk_len: MAX_BULK_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }
}

impl Parser {
    /// Create a parser with the protocol's default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with explicit limits
    ///
    /// `max_bulk_len` is clamped to the protocol maximum of 512 MiB.
    pub fn with_limits(max_bulk_len: usize, max_depth: usize) -> Self {
        Self {
            max_bulk_len: max_bulk_len.min(MAX_BULK_LEN),
            max_depth,
            ..Self::default()
        }
    }

    /// Limit the length of simple string, error and integer lines
    pub fn with_max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = max_line_len;
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_limits(config.max_bulk_len, config.max_depth)
            .with_max_line_len(config.max_line_len)
    }

    pub fn max_bulk_len(&self) -> usize {
        self.max_bulk_len
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn max_line_len(&self) -> usize {
        self.max_line_len
    }

    // =========================================================================
    // Type Detection
    // =========================================================================

    /// Read exactly one marker byte and resolve its type
    pub fn peek_type<R: BufRead>(&self, reader: &mut R) -> Result<WireType> {
        let mut marker = [0u8; 1];
        reader.read_exact(&mut marker).map_err(map_io)?;

        WireType::from_byte(marker[0]).ok_or_else(|| {
            RespError::decode(format!("unknown type marker 0x{:02x}", marker[0]))
        })
    }

    // =========================================================================
    // Scalar Readers
    // =========================================================================

    /// Read a 64-bit signed integer line
    pub fn read_integer<R: BufRead>(&self, reader: &mut R) -> Result<i64> {
        let line = read_line(reader, self.max_line_len)?;
        line.parse::<i64>()
            .map_err(|_| RespError::decode(format!("invalid integer: {:?}", line)))
    }

    pub fn read_simple_string<R: BufRead>(&self, reader: &mut R) -> Result<String> {
        read_line(reader, self.max_line_len)
    }

    pub fn read_error<R: BufRead>(&self, reader: &mut R) -> Result<ErrorValue> {
        read_line(reader, self.max_line_len).map(ErrorValue::new)
    }

    /// Read a bulk string
    ///
    /// A negative length is the null bulk string and yields `None`. The
    /// payload is binary-safe: bytes that are not valid UTF-8 are replaced
    /// with U+FFFD, so a framed value never fails to decode.
    pub fn read_bulk_string<R: BufRead>(&self, reader: &mut R) -> Result<Option<String>> {
        let len = self.read_integer(reader)?;

        if len < 0 {
            return Ok(None);
        }

        if len == 0 {
            // `$0` is normally followed by an empty CRLF line; tolerate a
            // stream that ends right after the header.
            if reader.fill_buf().map_err(map_io)?.is_empty() {
                return Ok(Some(String::new()));
            }
            expect_crlf(reader)?;
            return Ok(Some(String::new()));
        }

        let len = usize::try_from(len)
            .ok()
            .filter(|len| *len <= self.max_bulk_len)
            .ok_or_else(|| {
                RespError::decode(format!(
                    "bulk string too large: {} bytes (max {})",
                    len, self.max_bulk_len
                ))
            })?;

        // Grow with the data actually received rather than trusting the header
        let mut data = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        reader
            .by_ref()
            .take(len as u64)
            .read_to_end(&mut data)
            .map_err(map_io)?;

        if data.len() != len {
            return Err(RespError::decode(format!(
                "truncated bulk string: expected {} bytes, got {}",
                len,
                data.len()
            )));
        }

        expect_crlf(reader)?;

        Ok(Some(into_text(data)))
    }

    // =========================================================================
    // Structured Readers
    // =========================================================================

    /// Read an array of any mix of types
    ///
    /// A negative count is the null array and yields `None`.
    pub fn read_array<R: BufRead>(&self, reader: &mut R) -> Result<Option<Vec<Value>>> {
        self.read_array_at(reader, 1)
    }

    /// Read one value whose marker has already been consumed
    pub fn read_value<R: BufRead>(&self, reader: &mut R, wire_type: WireType) -> Result<Value> {
        self.read_value_at(reader, wire_type, 1)
    }

    /// Read one complete value, marker included
    pub fn read_any<R: BufRead>(&self, reader: &mut R) -> Result<Value> {
        let wire_type = self.peek_type(reader)?;
        self.read_value(reader, wire_type)
    }

    fn read_array_at<R: BufRead>(&self, reader: &mut R, depth: usize) -> Result<Option<Vec<Value>>> {
        if depth > self.max_depth {
            return Err(RespError::decode(format!(
                "array nesting exceeds {} levels",
                self.max_depth
            )));
        }

        let count = self.read_integer(reader)?;

        if count < 0 {
            return Ok(None);
        }

        let count = count as u64;
        let mut items = Vec::with_capacity((count as usize).min(PREALLOC_LIMIT));

        for _ in 0..count {
            let wire_type = self.peek_type(reader)?;
            items.push(self.read_value_at(reader, wire_type, depth + 1)?);
        }

        Ok(Some(items))
    }

    fn read_value_at<R: BufRead>(
        &self,
        reader: &mut R,
        wire_type: WireType,
        depth: usize,
    ) -> Result<Value> {
        let value = match wire_type {
            WireType::Array => self
                .read_array_at(reader, depth)?
                .map_or(Value::Null, Value::Array),
            WireType::BulkString => self
                .read_bulk_string(reader)?
                .map_or(Value::Null, Value::BulkString),
            WireType::Error => Value::Error(self.read_error(reader)?),
            WireType::Integer => Value::Integer(self.read_integer(reader)?),
            WireType::SimpleString => Value::SimpleString(self.read_simple_string(reader)?),
        };

        Ok(value)
    }
}

// =============================================================================
// Line Helpers
// =============================================================================

/// Read one CRLF-terminated line, terminator stripped
fn read_line<R: BufRead>(reader: &mut R, max_len: usize) -> Result<String> {
    let limit = max_len.saturating_add(CRLF.len()) as u64;
    let mut line = Vec::new();

    reader
        .by_ref()
        .take(limit)
        .read_until(b'\n', &mut line)
        .map_err(map_io)?;

    if !line.ends_with(b"\n") {
        if line.len() as u64 >= limit {
            return Err(RespError::decode(format!(
                "line exceeds {} bytes",
                max_len
            )));
        }
        return Err(unexpected_eof());
    }

    if !line.ends_with(CRLF) {
        return Err(RespError::decode("expected CR before LF"));
    }

    line.truncate(line.len() - CRLF.len());
    Ok(into_text(line))
}

/// Decode payload bytes, replacing invalid UTF-8 sequences
fn into_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

fn expect_crlf<R: BufRead>(reader: &mut R) -> Result<()> {
    let mut terminator = [0u8; 2];
    reader.read_exact(&mut terminator).map_err(map_io)?;

    if terminator != CRLF {
        return Err(RespError::decode(format!(
            "expected CRLF, got {:?}",
            String::from_utf8_lossy(&terminator)
        )));
    }

    Ok(())
}

fn unexpected_eof() -> RespError {
    RespError::decode("unexpected end of stream")
}

/// EOF is a framing problem; anything else is a transport failure
fn map_io(err: io::Error) -> RespError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        unexpected_eof()
    } else {
        RespError::Io(err)
    }
}
