//! Reply handles for bound commands

use std::io::{Read, Write};

use super::Command;
use crate::error::Result;
use crate::network::Connection;
use crate::protocol::Value;
use crate::transaction::{Deferred, Slot, Transaction};

/// A command that has been written and is waiting for its reply
///
/// Each accessor performs exactly one typed read and consumes the handle,
/// since the reply bytes can only be read once.
pub struct Executed<'c, R: Read, W: Write> {
    connection: &'c mut Connection<R, W>,
}

impl<'c, R: Read, W: Write> Executed<'c, R, W> {
    pub(crate) fn new(connection: &'c mut Connection<R, W>) -> Self {
        Self { connection }
    }

    /// Simple or bulk string reply; `None` for null
    pub fn as_string(self) -> Result<Option<String>> {
        self.connection.read_simple_or_bulk_string()
    }

    /// Integer reply
    pub fn as_long(self) -> Result<i64> {
        self.connection.read_long()
    }

    /// Array reply as raw values
    pub fn as_array(self) -> Result<Option<Vec<Value>>> {
        self.connection.read_array()
    }

    /// Array reply with each element rendered as text
    pub fn as_string_array(self) -> Result<Option<Vec<Option<String>>>> {
        self.connection.read_string_array()
    }

    /// Reply of any type, for commands whose reply type varies
    pub fn as_object(self) -> Result<Value> {
        self.connection.read_any_type()
    }

    /// Read and drop the reply; error replies are still raised
    pub fn discard(self) -> Result<()> {
        self.connection.read_any_type().map(|_| ())
    }
}

/// A command bound to a transaction
///
/// Each accessor queues the command together with a fresh [`Deferred`] and
/// returns it unresolved. Nothing is sent until the transaction executes.
pub struct Queued<'t, 'c, R: Read, W: Write> {
    transaction: &'t mut Transaction<'c, R, W>,
    command: Command,
}

impl<'t, 'c, R: Read, W: Write> Queued<'t, 'c, R, W> {
    pub(crate) fn new(transaction: &'t mut Transaction<'c, R, W>, command: Command) -> Self {
        Self {
            transaction,
            command,
        }
    }

    pub fn as_string(self) -> Deferred<Option<String>> {
        self.register()
    }

    pub fn as_long(self) -> Deferred<i64> {
        self.register()
    }

    pub fn as_array(self) -> Deferred<Option<Vec<Value>>> {
        self.register()
    }

    pub fn as_string_array(self) -> Deferred<Option<Vec<Option<String>>>> {
        self.register()
    }

    pub fn as_object(self) -> Deferred<Value> {
        self.register()
    }

    /// Queue the command and ignore its result
    pub fn discard(self) {
        self.transaction.push(self.command, Slot::Discard);
    }

    fn register<V>(self) -> Deferred<V>
    where
        Deferred<V>: Into<Slot>,
    {
        let result = Deferred::new();
        self.transaction.queue(self.command, result.clone());
        result
    }
}
