//! Decoded reply values

use std::fmt;

use crate::error::{RespError, Result};

/// An error message sent by the server
///
/// Inside an array this is plain data; at the top level of a reply the
/// connection raises it as [`RespError::Protocol`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    message: String,
}

impl ErrorValue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message text, verbatim
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A single decoded RESP value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    SimpleString(String),

    BulkString(String),

    Integer(i64),

    Error(ErrorValue),

    /// Heterogeneous, possibly nested
    Array(Vec<Value>),

    /// Null bulk string or null array
    Null,
}

impl Value {
    /// Short type name used in mismatch errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::SimpleString(_) => "simple string",
            Value::BulkString(_) => "bulk string",
            Value::Integer(_) => "integer",
            Value::Error(_) => "error",
            Value::Array(_) => "array",
            Value::Null => "null",
        }
    }

    /// Natural text form, `None` for null
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    // =========================================================================
    // Typed Conversions
    // =========================================================================

    /// Simple or bulk string; null maps to `None`
    pub fn into_string(self) -> Result<Option<String>> {
        match self {
            Value::SimpleString(s) | Value::BulkString(s) => Ok(Some(s)),
            Value::Null => Ok(None),
            other => Err(other.rejected("string")),
        }
    }

    pub fn into_long(self) -> Result<i64> {
        match self {
            Value::Integer(n) => Ok(n),
            other => Err(other.rejected("integer")),
        }
    }

    /// Array elements; null array maps to `None`
    pub fn into_array(self) -> Result<Option<Vec<Value>>> {
        match self {
            Value::Array(items) => Ok(Some(items)),
            Value::Null => Ok(None),
            other => Err(other.rejected("array")),
        }
    }

    /// Array with every element rendered as text, nulls kept in place
    pub fn into_string_array(self) -> Result<Option<Vec<Option<String>>>> {
        Ok(self
            .into_array()?
            .map(|items| items.iter().map(Value::to_text).collect()))
    }

    /// Error values become protocol errors, everything else a type mismatch
    fn rejected(self, expected: &str) -> RespError {
        match self {
            Value::Error(err) => RespError::Protocol(err.into_message()),
            other => RespError::mismatch(expected, other.type_name()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::SimpleString(s) | Value::BulkString(s) => f.write_str(s),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Error(err) => write!(f, "{}", err),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::BulkString(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::BulkString(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<ErrorValue> for Value {
    fn from(err: ErrorValue) -> Self {
        Value::Error(err)
    }
}
