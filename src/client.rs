//! Client
//!
//! Convenience operations over a [`Connection`]. Each method builds one
//! [`Command`] and performs the matching typed read.

use std::io::{Read, Write};

use crate::command::{
    BitOperation, Command, ConnectionCommand, HashCommand, KeyCommand, SetCondition,
    StringCommand,
};
use crate::config::Config;
use crate::error::{RespError, Result};
use crate::network::{self, Connection, TcpConnection};
use crate::transaction::Transaction;

/// High-level client owning one connection
#[derive(Debug)]
pub struct Client<R: Read, W: Write> {
    connection: Connection<R, W>,
}

impl Client<std::net::TcpStream, std::net::TcpStream> {
    /// Connect over TCP using `config`
    pub fn connect(config: &Config) -> Result<Self> {
        network::connect(config).map(Client::new)
    }
}

impl<R: Read, W: Write> Client<R, W> {
    pub fn new(connection: Connection<R, W>) -> Self {
        Self { connection }
    }

    pub fn connection_mut(&mut self) -> &mut Connection<R, W> {
        &mut self.connection
    }

    pub fn into_connection(self) -> Connection<R, W> {
        self.connection
    }

    /// Start a MULTI/EXEC batch on this client's connection
    pub fn transaction(&mut self) -> Transaction<'_, R, W> {
        self.connection.transaction()
    }

    // =========================================================================
    // Connection Operations
    // =========================================================================

    pub fn ping(&mut self) -> Result<String> {
        Command::cmd(ConnectionCommand::Ping)
            .build()
            .query(&mut self.connection)?
            .as_string()?
            .ok_or_else(|| RespError::mismatch("simple string", "null"))
    }

    // =========================================================================
    // String Operations
    // =========================================================================

    pub fn get(&mut self, key: &str) -> Result<Option<String>> {
        Command::cmd(StringCommand::Get)
            .arg(key)
            .build()
            .query(&mut self.connection)?
            .as_string()
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<Option<String>> {
        Command::cmd(StringCommand::Set)
            .arg(key)
            .arg(value)
            .build()
            .query(&mut self.connection)?
            .as_string()
    }

    /// SET with a condition or expiry flag
    ///
    /// `expiry` is only sent for `EX`/`PX`. A null reply means an `NX`/`XX`
    /// condition was not met.
    pub fn set_with(
        &mut self,
        key: &str,
        value: &str,
        condition: SetCondition,
        expiry: Option<u64>,
    ) -> Result<Option<String>> {
        let mut builder = Command::cmd(StringCommand::Set)
            .arg(key)
            .arg(value)
            .arg(condition);

        if condition.takes_expiry() {
            let expiry = expiry.ok_or_else(|| {
                RespError::InvalidArgument(format!("{} requires an expiry", condition.token()))
            })?;
            builder = builder.arg(expiry);
        }

        builder.build().query(&mut self.connection)?.as_string()
    }

    pub fn setex(&mut self, key: &str, seconds: u64, value: &str) -> Result<Option<String>> {
        Command::cmd(StringCommand::SetEx)
            .arg(key)
            .arg(seconds)
            .arg(value)
            .build()
            .query(&mut self.connection)?
            .as_string()
    }

    pub fn append(&mut self, key: &str, value: &str) -> Result<i64> {
        Command::cmd(StringCommand::Append)
            .arg(key)
            .arg(value)
            .build()
            .query(&mut self.connection)?
            .as_long()
    }

    pub fn strlen(&mut self, key: &str) -> Result<i64> {
        Command::cmd(StringCommand::StrLen)
            .arg(key)
            .build()
            .query(&mut self.connection)?
            .as_long()
    }

    pub fn incr(&mut self, key: &str) -> Result<i64> {
        Command::cmd(StringCommand::Incr)
            .arg(key)
            .build()
            .query(&mut self.connection)?
            .as_long()
    }

    pub fn incr_by(&mut self, key: &str, delta: i64) -> Result<i64> {
        Command::cmd(StringCommand::IncrBy)
            .arg(key)
            .arg(delta)
            .build()
            .query(&mut self.connection)?
            .as_long()
    }

    pub fn decr(&mut self, key: &str) -> Result<i64> {
        Command::cmd(StringCommand::Decr)
            .arg(key)
            .build()
            .query(&mut self.connection)?
            .as_long()
    }

    pub fn mget(&mut self, keys: &[&str]) -> Result<Vec<Option<String>>> {
        Ok(Command::cmd(StringCommand::MGet)
            .args(keys)
            .build()
            .query(&mut self.connection)?
            .as_string_array()?
            .unwrap_or_default())
    }

    pub fn bitop(&mut self, op: BitOperation, dest: &str, keys: &[&str]) -> Result<i64> {
        Command::cmd(StringCommand::BitOp)
            .arg(op)
            .arg(dest)
            .args(keys)
            .build()
            .query(&mut self.connection)?
            .as_long()
    }

    // =========================================================================
    // Key Operations
    // =========================================================================

    /// Delete keys, returning how many existed
    pub fn del(&mut self, keys: &[&str]) -> Result<i64> {
        Command::cmd(KeyCommand::Del)
            .args(keys)
            .build()
            .query(&mut self.connection)?
            .as_long()
    }

    pub fn exists(&mut self, key: &str) -> Result<bool> {
        Command::cmd(KeyCommand::Exists)
            .arg(key)
            .build()
            .query(&mut self.connection)?
            .as_long()
            .map(|n| n > 0)
    }

    pub fn expire(&mut self, key: &str, seconds: u64) -> Result<bool> {
        Command::cmd(KeyCommand::Expire)
            .arg(key)
            .arg(seconds)
            .build()
            .query(&mut self.connection)?
            .as_long()
            .map(|n| n == 1)
    }

    // =========================================================================
    // Hash Operations
    // =========================================================================

    /// Set a hash field, returning whether the field is new
    pub fn hset(&mut self, key: &str, field: &str, value: &str) -> Result<bool> {
        Command::cmd(HashCommand::HSet)
            .arg(key)
            .arg(field)
            .arg(value)
            .build()
            .query(&mut self.connection)?
            .as_long()
            .map(|n| n == 1)
    }

    pub fn hget(&mut self, key: &str, field: &str) -> Result<Option<String>> {
        Command::cmd(HashCommand::HGet)
            .arg(key)
            .arg(field)
            .build()
            .query(&mut self.connection)?
            .as_string()
    }

    pub fn hdel(&mut self, key: &str, fields: &[&str]) -> Result<i64> {
        Command::cmd(HashCommand::HDel)
            .arg(key)
            .args(fields)
            .build()
            .query(&mut self.connection)?
            .as_long()
    }

    pub fn hexists(&mut self, key: &str, field: &str) -> Result<bool> {
        Command::cmd(HashCommand::HExists)
            .arg(key)
            .arg(field)
            .build()
            .query(&mut self.connection)?
            .as_long()
            .map(|n| n == 1)
    }

    pub fn hlen(&mut self, key: &str) -> Result<i64> {
        Command::cmd(HashCommand::HLen)
            .arg(key)
            .build()
            .query(&mut self.connection)?
            .as_long()
    }

    /// All fields and values, in reply order
    pub fn hgetall(&mut self, key: &str) -> Result<Vec<(String, String)>> {
        let flat = Command::cmd(HashCommand::HGetAll)
            .arg(key)
            .build()
            .query(&mut self.connection)?
            .as_string_array()?
            .unwrap_or_default();

        if flat.len() % 2 != 0 {
            return Err(RespError::decode(format!(
                "HGETALL returned an odd number of elements ({})",
                flat.len()
            )));
        }

        let mut pairs = Vec::with_capacity(flat.len() / 2);
        let mut items = flat.into_iter();
        while let (Some(field), Some(value)) = (items.next(), items.next()) {
            pairs.push((field.unwrap_or_default(), value.unwrap_or_default()));
        }

        Ok(pairs)
    }
}

impl From<TcpConnection> for Client<std::net::TcpStream, std::net::TcpStream> {
    fn from(connection: TcpConnection) -> Self {
        Client::new(connection)
    }
}
