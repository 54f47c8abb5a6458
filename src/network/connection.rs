//! Connection
//!
//! Type-checked request/response exchange over a caller-supplied pair of
//! byte streams.

use std::io::{BufReader, BufWriter, Read, Write};

use crate::config::Config;
use crate::error::{RespError, Result};
use crate::protocol::{Encoder, Parser, Value, WireType};
use crate::transaction::Transaction;

/// A RESP connection over a reader and a writer
///
/// The connection does not open or close the underlying transport. Requests
/// and their replies are strictly ordered, so a connection must not be
/// shared between concurrent callers; every operation takes `&mut self`.
pub struct Connection<R: Read, W: Write> {
    /// Reply stream (buffered for line reads)
    reader: BufReader<R>,

    /// Request stream (buffered, flushed after every write)
    writer: BufWriter<W>,

    encoder: Encoder,

    parser: Parser,
}

impl<R: Read, W: Write> Connection<R, W> {
    /// Create a connection with the default codec
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_codec(reader, writer, Encoder::new(), Parser::new())
    }

    /// Create a connection with codec limits taken from `config`
    pub fn with_config(reader: R, writer: W, config: &Config) -> Self {
        Self::with_codec(reader, writer, Encoder::new(), Parser::from_config(config))
    }

    pub fn with_codec(reader: R, writer: W, encoder: Encoder, parser: Parser) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer: BufWriter::new(writer),
            encoder,
            parser,
        }
    }

    // =========================================================================
    // Writing
    // =========================================================================

    /// Encode and send one command
    pub fn write_command<S: AsRef<str>>(&mut self, args: &[S]) -> Result<()> {
        let bytes = self.encoder.encode(args)?;

        if let Some(verb) = args.first() {
            tracing::trace!(command = verb.as_ref(), argc = args.len(), "writing command");
        }

        self.send(&bytes)
    }

    /// Encode and send several commands in a single write
    pub fn write_multi_command<S: AsRef<str>>(&mut self, commands: &[Vec<S>]) -> Result<()> {
        let bytes = self.encoder.encode_multi(commands)?;
        tracing::trace!(count = commands.len(), "writing command batch");
        self.send(&bytes)
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.writer.flush()?;
        Ok(())
    }

    // =========================================================================
    // Typed Reads
    // =========================================================================

    pub fn read_simple_string(&mut self) -> Result<String> {
        self.verify_response_type(&[WireType::SimpleString])?;
        self.parser.read_simple_string(&mut self.reader)
    }

    /// Read a bulk string; `None` for the null bulk string
    pub fn read_bulk_string(&mut self) -> Result<Option<String>> {
        self.verify_response_type(&[WireType::BulkString])?;
        self.parser.read_bulk_string(&mut self.reader)
    }

    pub fn read_simple_or_bulk_string(&mut self) -> Result<Option<String>> {
        match self.verify_response_type(&[WireType::BulkString, WireType::SimpleString])? {
            WireType::BulkString => self.parser.read_bulk_string(&mut self.reader),
            _ => self.parser.read_simple_string(&mut self.reader).map(Some),
        }
    }

    pub fn read_long(&mut self) -> Result<i64> {
        self.verify_response_type(&[WireType::Integer])?;
        self.parser.read_integer(&mut self.reader)
    }

    /// Read an array as raw values; `None` for the null array
    pub fn read_array(&mut self) -> Result<Option<Vec<Value>>> {
        self.verify_response_type(&[WireType::Array])?;
        self.parser.read_array(&mut self.reader)
    }

    /// Read an array with every non-null element rendered as text
    pub fn read_string_array(&mut self) -> Result<Option<Vec<Option<String>>>> {
        Ok(self
            .read_array()?
            .map(|items| items.iter().map(Value::to_text).collect()))
    }

    /// Read a value of any type
    ///
    /// Error replies are still raised as [`RespError::Protocol`].
    pub fn read_any_type(&mut self) -> Result<Value> {
        let wire_type = self.verify_response_type(&WireType::ALL)?;
        self.parser.read_value(&mut self.reader, wire_type)
    }

    /// Check the next reply's type against the accepted set
    ///
    /// An error reply is consumed and raised whatever was expected.
    fn verify_response_type(&mut self, expected: &[WireType]) -> Result<WireType> {
        let wire_type = self.parser.peek_type(&mut self.reader)?;
        tracing::trace!(reply = wire_type.name(), "reading reply");

        if wire_type == WireType::Error {
            let err = self.parser.read_error(&mut self.reader)?;
            return Err(RespError::Protocol(err.into_message()));
        }

        if !expected.contains(&wire_type) {
            let names: Vec<&str> = expected.iter().map(|t| t.name()).collect();
            return Err(RespError::mismatch(names.join(" or "), wire_type.name()));
        }

        Ok(wire_type)
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Start queuing commands for a MULTI/EXEC batch
    pub fn transaction(&mut self) -> Transaction<'_, R, W> {
        Transaction::new(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// The underlying writer; everything written so far has been flushed
    pub fn writer_ref(&self) -> &W {
        self.writer.get_ref()
    }

    /// Unwrap into the raw streams
    ///
    /// Buffered but unread reply bytes are discarded.
    pub fn into_inner(self) -> Result<(R, W)> {
        let writer = self
            .writer
            .into_inner()
            .map_err(|e| RespError::Io(e.into_error()))?;
        Ok((self.reader.into_inner(), writer))
    }
}

impl<R: Read, W: Write> std::fmt::Debug for Connection<R, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("encoder", &self.encoder)
            .field("parser", &self.parser)
            .finish_non_exhaustive()
    }
}
