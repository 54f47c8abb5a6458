//! Error types for respkv
//!
//! Provides a unified error type for all client operations.
//!
//! The variants mirror the four fault families a RESP client has to keep
//! apart: transport/decode failures, errors the server sent back as data,
//! replies of the wrong type, and misuse of deferred results.

use std::io;

use thiserror::Error;

/// Result type alias using RespError
pub type Result<T> = std::result::Result<T, RespError>;

/// Unified error type for respkv operations
#[derive(Debug, Error)]
pub enum RespError {
    // -------------------------------------------------------------------------
    // Resource Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    // -------------------------------------------------------------------------
    // Reply Errors
    // -------------------------------------------------------------------------
    /// The server answered with an error value.
    #[error("Server error: {0}")]
    Protocol(String),

    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Transaction aborted by server")]
    Aborted,

    // -------------------------------------------------------------------------
    // Usage Errors
    // -------------------------------------------------------------------------
    #[error("Illegal state: {0}")]
    IllegalState(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Pool Errors
    // -------------------------------------------------------------------------
    #[error("Pool error: {0}")]
    Pool(String),
}

/// Coarse classification of a [`RespError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure or malformed wire data
    Resource,
    /// Error reply from the server
    Protocol,
    /// Well-formed reply of an unexpected type
    TypeMismatch,
    /// Transaction discarded by the server
    Aborted,
    /// Deferred result misuse
    IllegalState,
    InvalidArgument,
    Config,
    Pool,
}

impl RespError {
    /// Classify this error.
    ///
    /// I/O and decode failures both report [`ErrorKind::Resource`]: once
    /// either happens the stream position is unknown and the connection
    /// should not be reused.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RespError::Io(_) | RespError::Decode(_) => ErrorKind::Resource,
            RespError::Protocol(_) => ErrorKind::Protocol,
            RespError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            RespError::Aborted => ErrorKind::Aborted,
            RespError::IllegalState(_) => ErrorKind::IllegalState,
            RespError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            RespError::Config(_) => ErrorKind::Config,
            RespError::Pool(_) => ErrorKind::Pool,
        }
    }

    pub(crate) fn decode(msg: impl Into<String>) -> Self {
        RespError::Decode(msg.into())
    }

    pub(crate) fn mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        RespError::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Produce an owned copy of this error.
    ///
    /// `io::Error` is not `Clone`, so the copy keeps its kind and message.
    pub(crate) fn replay(&self) -> Self {
        match self {
            RespError::Io(e) => RespError::Io(io::Error::new(e.kind(), e.to_string())),
            RespError::Decode(m) => RespError::Decode(m.clone()),
            RespError::Protocol(m) => RespError::Protocol(m.clone()),
            RespError::TypeMismatch { expected, actual } => RespError::TypeMismatch {
                expected: expected.clone(),
                actual: actual.clone(),
            },
            RespError::Aborted => RespError::Aborted,
            RespError::IllegalState(m) => RespError::IllegalState(m.clone()),
            RespError::InvalidArgument(m) => RespError::InvalidArgument(m.clone()),
            RespError::Config(m) => RespError::Config(m.clone()),
            RespError::Pool(m) => RespError::Pool(m.clone()),
        }
    }
}
