//! Command verbs and option tokens
//!
//! Each command family is a closed enum that renders to its wire token.
//! [`Verb`] ties the families together and keeps an escape hatch for verbs
//! not listed here.

use std::fmt;

/// String commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringCommand {
    Append,
    BitCount,
    BitOp,
    BitPos,
    Decr,
    DecrBy,
    Get,
    GetBit,
    GetRange,
    GetSet,
    Incr,
    IncrBy,
    IncrByFloat,
    MGet,
    MSet,
    MSetNx,
    PSetEx,
    Set,
    SetBit,
    SetEx,
    SetNx,
    SetRange,
    StrLen,
}

impl StringCommand {
    pub fn token(self) -> &'static str {
        match self {
            StringCommand::Append => "APPEND",
            StringCommand::BitCount => "BITCOUNT",
            StringCommand::BitOp => "BITOP",
            StringCommand::BitPos => "BITPOS",
            StringCommand::Decr => "DECR",
            StringCommand::DecrBy => "DECRBY",
            StringCommand::Get => "GET",
            StringCommand::GetBit => "GETBIT",
            StringCommand::GetRange => "GETRANGE",
            StringCommand::GetSet => "GETSET",
            StringCommand::Incr => "INCR",
            StringCommand::IncrBy => "INCRBY",
            StringCommand::IncrByFloat => "INCRBYFLOAT",
            StringCommand::MGet => "MGET",
            StringCommand::MSet => "MSET",
            StringCommand::MSetNx => "MSETNX",
            StringCommand::PSetEx => "PSETEX",
            StringCommand::Set => "SET",
            StringCommand::SetBit => "SETBIT",
            StringCommand::SetEx => "SETEX",
            StringCommand::SetNx => "SETNX",
            StringCommand::SetRange => "SETRANGE",
            StringCommand::StrLen => "STRLEN",
        }
    }
}

/// Hash commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashCommand {
    HDel,
    HExists,
    HGet,
    HGetAll,
    HIncrBy,
    HIncrByFloat,
    HKeys,
    HLen,
    HMGet,
    HMSet,
    HSet,
    HSetNx,
    HStrLen,
    HVals,
    HScan,
}

impl HashCommand {
    pub fn token(self) -> &'static str {
        match self {
            HashCommand::HDel => "HDEL",
            HashCommand::HExists => "HEXISTS",
            HashCommand::HGet => "HGET",
            HashCommand::HGetAll => "HGETALL",
            HashCommand::HIncrBy => "HINCRBY",
            HashCommand::HIncrByFloat => "HINCRBYFLOAT",
            HashCommand::HKeys => "HKEYS",
            HashCommand::HLen => "HLEN",
            HashCommand::HMGet => "HMGET",
            HashCommand::HMSet => "HMSET",
            HashCommand::HSet => "HSET",
            HashCommand::HSetNx => "HSETNX",
            HashCommand::HStrLen => "HSTRLEN",
            HashCommand::HVals => "HVALS",
            HashCommand::HScan => "HSCAN",
        }
    }
}

/// Keyspace commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    Del,
    Exists,
    Expire,
    PExpire,
    Persist,
    Ttl,
    PTtl,
    Type,
    Rename,
    Keys,
}

impl KeyCommand {
    pub fn token(self) -> &'static str {
        match self {
            KeyCommand::Del => "DEL",
            KeyCommand::Exists => "EXISTS",
            KeyCommand::Expire => "EXPIRE",
            KeyCommand::PExpire => "PEXPIRE",
            KeyCommand::Persist => "PERSIST",
            KeyCommand::Ttl => "TTL",
            KeyCommand::PTtl => "PTTL",
            KeyCommand::Type => "TYPE",
            KeyCommand::Rename => "RENAME",
            KeyCommand::Keys => "KEYS",
        }
    }
}

/// Connection commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionCommand {
    Auth,
    Echo,
    Ping,
    Quit,
    Select,
}

impl ConnectionCommand {
    pub fn token(self) -> &'static str {
        match self {
            ConnectionCommand::Auth => "AUTH",
            ConnectionCommand::Echo => "ECHO",
            ConnectionCommand::Ping => "PING",
            ConnectionCommand::Quit => "QUIT",
            ConnectionCommand::Select => "SELECT",
        }
    }
}

/// Transaction commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionCommand {
    Discard,
    Exec,
    Multi,
    Unwatch,
    Watch,
}

impl TransactionCommand {
    pub fn token(self) -> &'static str {
        match self {
            TransactionCommand::Discard => "DISCARD",
            TransactionCommand::Exec => "EXEC",
            TransactionCommand::Multi => "MULTI",
            TransactionCommand::Unwatch => "UNWATCH",
            TransactionCommand::Watch => "WATCH",
        }
    }
}

// =============================================================================
// Verb
// =============================================================================

/// The first element of every command
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Verb {
    String(StringCommand),
    Hash(HashCommand),
    Key(KeyCommand),
    Connection(ConnectionCommand),
    Transaction(TransactionCommand),
    /// Any verb without a typed variant, sent as-is
    Other(String),
}

impl Verb {
    pub fn token(&self) -> &str {
        match self {
            Verb::String(cmd) => cmd.token(),
            Verb::Hash(cmd) => cmd.token(),
            Verb::Key(cmd) => cmd.token(),
            Verb::Connection(cmd) => cmd.token(),
            Verb::Transaction(cmd) => cmd.token(),
            Verb::Other(name) => name,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl From<StringCommand> for Verb {
    fn from(cmd: StringCommand) -> Self {
        Verb::String(cmd)
    }
}

impl From<HashCommand> for Verb {
    fn from(cmd: HashCommand) -> Self {
        Verb::Hash(cmd)
    }
}

impl From<KeyCommand> for Verb {
    fn from(cmd: KeyCommand) -> Self {
        Verb::Key(cmd)
    }
}

impl From<ConnectionCommand> for Verb {
    fn from(cmd: ConnectionCommand) -> Self {
        Verb::Connection(cmd)
    }
}

impl From<TransactionCommand> for Verb {
    fn from(cmd: TransactionCommand) -> Self {
        Verb::Transaction(cmd)
    }
}

impl From<&str> for Verb {
    fn from(name: &str) -> Self {
        Verb::Other(name.to_string())
    }
}

impl From<String> for Verb {
    fn from(name: String) -> Self {
        Verb::Other(name)
    }
}

// =============================================================================
// Option Tokens
// =============================================================================

/// Condition/expiry flag for SET
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetCondition {
    /// Expire after N seconds
    Ex,
    /// Expire after N milliseconds
    Px,
    /// Only set if the key does not exist
    Nx,
    /// Only set if the key already exists
    Xx,
}

impl SetCondition {
    pub fn token(self) -> &'static str {
        match self {
            SetCondition::Ex => "EX",
            SetCondition::Px => "PX",
            SetCondition::Nx => "NX",
            SetCondition::Xx => "XX",
        }
    }

    /// Whether the flag takes an expiry argument
    pub fn takes_expiry(self) -> bool {
        matches!(self, SetCondition::Ex | SetCondition::Px)
    }
}

/// Operation for BITOP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitOperation {
    And,
    Or,
    Xor,
    Not,
}

impl BitOperation {
    pub fn token(self) -> &'static str {
        match self {
            BitOperation::And => "AND",
            BitOperation::Or => "OR",
            BitOperation::Xor => "XOR",
            BitOperation::Not => "NOT",
        }
    }
}
