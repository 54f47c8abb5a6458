//! Wire type markers
//!
//! The five RESP types and their single-byte tags.

use std::fmt;

/// RESP value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    Array = b'*',
    BulkString = b'$',
    Error = b'-',
    Integer = b':',
    SimpleString = b'+',
}

impl WireType {
    /// All types, in marker table order
    pub const ALL: [WireType; 5] = [
        WireType::Array,
        WireType::BulkString,
        WireType::Error,
        WireType::Integer,
        WireType::SimpleString,
    ];

    /// Resolve a marker byte
    pub fn from_byte(byte: u8) -> Option<WireType> {
        match byte {
            b'*' => Some(WireType::Array),
            b'$' => Some(WireType::BulkString),
            b'-' => Some(WireType::Error),
            b':' => Some(WireType::Integer),
            b'+' => Some(WireType::SimpleString),
            _ => None,
        }
    }

    /// Resolve a one-character marker string
    pub fn from_token(token: &str) -> Option<WireType> {
        match token.as_bytes() {
            [byte] => WireType::from_byte(*byte),
            _ => None,
        }
    }

    /// The marker byte for this type
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Human-readable type name
    pub fn name(self) -> &'static str {
        match self {
            WireType::Array => "array",
            WireType::BulkString => "bulk string",
            WireType::Error => "error",
            WireType::Integer => "integer",
            WireType::SimpleString => "simple string",
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ('{}')", self.name(), self.as_byte() as char)
    }
}
