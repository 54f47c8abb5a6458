//! Command Module
//!
//! Building commands and binding them for execution.
//!
//! ## Lifecycle
//! ```text
//!   Command::cmd(verb).arg(..).arg(..).build()
//!                          │
//!          ┌───────────────┴───────────────┐
//!          ▼                               ▼
//!   .query(&mut conn)               .queue(&mut tx)
//!   writes now, one typed read      registers a Deferred, no I/O
//!   (Executed)                      (Queued)
//! ```

pub mod names;
mod handle;

pub use handle::{Executed, Queued};
pub use names::{
    BitOperation, ConnectionCommand, HashCommand, KeyCommand, SetCondition, StringCommand,
    TransactionCommand, Verb,
};

use std::fmt;
use std::io::{Read, Write};

use crate::error::Result;
use crate::network::Connection;
use crate::transaction::Transaction;

/// An immutable command: verb followed by its arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    args: Vec<String>,
}

impl Command {
    /// Start building a command
    pub fn cmd(verb: impl Into<Verb>) -> CommandBuilder {
        CommandBuilder {
            args: vec![verb.into().token().to_string()],
        }
    }

    /// Verb and arguments, in wire order
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn verb(&self) -> &str {
        &self.args[0]
    }

    /// Number of elements including the verb
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Always false: a command carries at least its verb
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn into_args(self) -> Vec<String> {
        self.args
    }

    /// Send this command now and return a handle for reading its reply
    pub fn query<'c, R: Read, W: Write>(
        &self,
        connection: &'c mut Connection<R, W>,
    ) -> Result<Executed<'c, R, W>> {
        connection.write_command(&self.args)?;
        Ok(Executed::new(connection))
    }

    /// Bind this command to a transaction for deferred execution
    pub fn queue<'t, 'c, R: Read, W: Write>(
        self,
        transaction: &'t mut Transaction<'c, R, W>,
    ) -> Queued<'t, 'c, R, W> {
        Queued::new(transaction, self)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.args.join(" "))
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Fluent builder for [`Command`]
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    args: Vec<String>,
}

impl CommandBuilder {
    /// Append one argument
    pub fn arg(mut self, arg: impl ToArg) -> Self {
        self.args.push(arg.to_arg());
        self
    }

    /// Append every argument from an iterator
    pub fn args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToArg,
    {
        self.args.extend(args.into_iter().map(|arg| arg.to_arg()));
        self
    }

    pub fn build(self) -> Command {
        Command { args: self.args }
    }
}

// =============================================================================
// Argument Rendering
// =============================================================================

/// Values that can be rendered as a command argument
///
/// Booleans render as `1`/`0`, numbers in their decimal form.
pub trait ToArg {
    fn to_arg(&self) -> String;
}

impl ToArg for str {
    fn to_arg(&self) -> String {
        self.to_string()
    }
}

impl ToArg for String {
    fn to_arg(&self) -> String {
        self.clone()
    }
}

impl<T: ToArg + ?Sized> ToArg for &T {
    fn to_arg(&self) -> String {
        (**self).to_arg()
    }
}

impl ToArg for bool {
    fn to_arg(&self) -> String {
        let token = if *self { "1" } else { "0" };
        token.to_string()
    }
}

impl ToArg for i32 {
    fn to_arg(&self) -> String {
        self.to_string()
    }
}

impl ToArg for i64 {
    fn to_arg(&self) -> String {
        self.to_string()
    }
}

impl ToArg for u32 {
    fn to_arg(&self) -> String {
        self.to_string()
    }
}

impl ToArg for u64 {
    fn to_arg(&self) -> String {
        self.to_string()
    }
}

impl ToArg for usize {
    fn to_arg(&self) -> String {
        self.to_string()
    }
}

impl ToArg for f32 {
    fn to_arg(&self) -> String {
        self.to_string()
    }
}

impl ToArg for f64 {
    fn to_arg(&self) -> String {
        self.to_string()
    }
}

impl ToArg for SetCondition {
    fn to_arg(&self) -> String {
        self.token().to_string()
    }
}

impl ToArg for BitOperation {
    fn to_arg(&self) -> String {
        self.token().to_string()
    }
}
