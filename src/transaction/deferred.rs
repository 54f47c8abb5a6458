//! Single-assignment result holder

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::{RespError, Result};

/// Outcome stored for a queued command
type Outcome<V> = std::result::Result<V, RespError>;

/// The eventual result of a command queued in a transaction
///
/// A `Deferred` is pending until the transaction executes and resolved
/// afterwards. It is written at most once: the write is one atomic state
/// transition on a [`OnceLock`], which publishes the value to every later
/// read on any thread. Clones share the same slot.
///
/// A reply element that could not be converted (a server error, or a value
/// of the wrong type) is stored as the outcome and raised by [`get`].
///
/// [`get`]: Deferred::get
pub struct Deferred<V> {
    cell: Arc<OnceLock<Outcome<V>>>,
}

impl<V> Deferred<V> {
    /// Create a pending result
    pub fn new() -> Self {
        Self {
            cell: Arc::new(OnceLock::new()),
        }
    }

    /// Whether a value has been written
    pub fn is_done(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Resolve with a value
    ///
    /// Fails with [`RespError::IllegalState`] if already resolved.
    pub fn set(&self, value: V) -> Result<()> {
        self.settle(Ok(value))
    }

    pub(crate) fn settle(&self, outcome: Outcome<V>) -> Result<()> {
        self.cell
            .set(outcome)
            .map_err(|_| RespError::IllegalState("result has already been set".to_string()))
    }
}

impl<V: Clone> Deferred<V> {
    /// The resolved value
    ///
    /// Fails with [`RespError::IllegalState`] while pending.
    pub fn get(&self) -> Result<V> {
        match self.cell.get() {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(err)) => Err(err.replay()),
            None => Err(RespError::IllegalState(
                "transaction has not been executed".to_string(),
            )),
        }
    }
}

impl<V> Default for Deferred<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for Deferred<V> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Deferred<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(outcome) => f.debug_tuple("Deferred").field(outcome).finish(),
            None => f.write_str("Deferred(<pending>)"),
        }
    }
}
