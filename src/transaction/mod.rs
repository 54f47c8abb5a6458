//! Transaction Module
//!
//! Deferred execution of commands inside a MULTI/EXEC block.
//!
//! ## Exchange
//! ```text
//!  client                                   server
//!    │  MULTI, cmd 1 .. cmd N, EXEC  (1 write) │
//!    │────────────────────────────────────────▶│
//!    │  +OK                    (begin ack)     │
//!    │  +QUEUED × N            (queue acks)    │
//!    │  *N [reply 1 .. reply N] (EXEC)         │
//!    │◀────────────────────────────────────────│
//! ```
//!
//! The N + 1 acknowledgements are read and dropped; the EXEC array is then
//! distributed positionally into the queued [`Deferred`] results.
//!
//! ## Failure
//! Reading stops at the first error. Results not yet resolved stay pending,
//! and the connection should be discarded since unread replies may remain
//! on the stream.

mod deferred;

pub use deferred::Deferred;

use std::io::{Read, Write};

use crate::command::{Command, TransactionCommand};
use crate::error::{RespError, Result};
use crate::network::Connection;
use crate::protocol::Value;

/// A queued result, tagged with the conversion its reply needs
#[derive(Debug)]
pub enum Slot {
    String(Deferred<Option<String>>),
    Long(Deferred<i64>),
    Array(Deferred<Option<Vec<Value>>>),
    StringArray(Deferred<Option<Vec<Option<String>>>>),
    Object(Deferred<Value>),
    /// Result is ignored
    Discard,
}

impl Slot {
    /// Write one EXEC reply element into this slot
    ///
    /// Conversion failures are stored in the slot; only a second write
    /// fails here.
    fn resolve(self, reply: Value) -> Result<()> {
        match self {
            Slot::String(result) => result.settle(reply.into_string()),
            Slot::Long(result) => result.settle(reply.into_long()),
            Slot::Array(result) => result.settle(reply.into_array()),
            Slot::StringArray(result) => result.settle(reply.into_string_array()),
            // Nested error values are data here
            Slot::Object(result) => result.settle(Ok(reply)),
            Slot::Discard => Ok(()),
        }
    }
}

impl From<Deferred<Option<String>>> for Slot {
    fn from(result: Deferred<Option<String>>) -> Self {
        Slot::String(result)
    }
}

impl From<Deferred<i64>> for Slot {
    fn from(result: Deferred<i64>) -> Self {
        Slot::Long(result)
    }
}

impl From<Deferred<Option<Vec<Value>>>> for Slot {
    fn from(result: Deferred<Option<Vec<Value>>>) -> Self {
        Slot::Array(result)
    }
}

impl From<Deferred<Option<Vec<Option<String>>>>> for Slot {
    fn from(result: Deferred<Option<Vec<Option<String>>>>) -> Self {
        Slot::StringArray(result)
    }
}

impl From<Deferred<Value>> for Slot {
    fn from(result: Deferred<Value>) -> Self {
        Slot::Object(result)
    }
}

/// Commands queued for atomic execution
///
/// The command and result lists always have the same length. Dropping a
/// transaction without calling [`execute`](Transaction::execute) sends
/// nothing.
pub struct Transaction<'c, R: Read, W: Write> {
    connection: &'c mut Connection<R, W>,
    commands: Vec<Command>,
    results: Vec<Slot>,
}

impl<'c, R: Read, W: Write> Transaction<'c, R, W> {
    pub fn new(connection: &'c mut Connection<R, W>) -> Self {
        Self {
            connection,
            commands: Vec::new(),
            results: Vec::new(),
        }
    }

    /// Queue a command with the holder for its result
    pub fn queue<V>(&mut self, command: Command, result: Deferred<V>) -> &mut Self
    where
        Deferred<V>: Into<Slot>,
    {
        self.push(command, result.into())
    }

    pub(crate) fn push(&mut self, command: Command, slot: Slot) -> &mut Self {
        self.commands.push(command);
        self.results.push(slot);
        self
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Send the batch and resolve every queued result
    pub fn execute(self) -> Result<()> {
        let Transaction {
            connection,
            commands,
            results,
        } = self;

        let queued = commands.len();
        tracing::debug!(commands = queued, "executing transaction");

        let batch = wrap_batch(commands);
        connection.write_multi_command(&batch)?;

        // Begin acknowledgement plus one QUEUED per command
        for _ in 0..=queued {
            if let Err(err) = connection.read_any_type() {
                tracing::warn!("transaction rejected before EXEC: {}", err);
                return Err(err);
            }
        }

        let replies = connection.read_array()?.ok_or(RespError::Aborted)?;

        if replies.len() != queued {
            return Err(RespError::decode(format!(
                "EXEC returned {} replies for {} queued commands",
                replies.len(),
                queued
            )));
        }

        for (slot, reply) in results.into_iter().zip(replies) {
            slot.resolve(reply)?;
        }

        Ok(())
    }
}

/// `[MULTI] + commands + [EXEC]` as argument lists
fn wrap_batch(commands: Vec<Command>) -> Vec<Vec<String>> {
    let mut batch = Vec::with_capacity(commands.len() + 2);

    batch.push(vec![TransactionCommand::Multi.token().to_string()]);
    batch.extend(commands.into_iter().map(Command::into_args));
    batch.push(vec![TransactionCommand::Exec.token().to_string()]);

    batch
}
