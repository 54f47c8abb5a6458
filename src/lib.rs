//! # respkv
//!
//! A blocking client for the RESP wire protocol with:
//! - Exact-byte request encoding and bounded reply decoding
//! - Type-checked reads that keep server errors apart from transport errors
//! - MULTI/EXEC transactions with single-assignment deferred results
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Client / Pool / CLI (convenience)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Command (builder + binding)                  │
//! └──────────┬───────────────────────────────────┬──────────────┘
//!            │ query                             │ queue
//!            ▼                                   ▼
//!   ┌─────────────────┐   execute()    ┌──────────────────────┐
//!   │   Connection    │◀───────────────│ Transaction/Deferred │
//!   │ (typed reads)   │                └──────────────────────┘
//!   └────────┬────────┘
//!            │
//!            ▼
//!   ┌─────────────────┐
//!   │ Encoder/Parser  │
//!   │   (protocol)    │
//!   └────────┬────────┘
//!            │
//!            ▼
//!     caller's Read / Write streams
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use respkv::{network, Command, Config};
//!
//! # fn main() -> respkv::Result<()> {
//! let mut conn = network::connect(&Config::default())?;
//!
//! Command::cmd("SET").arg("k1").arg("v1").build().query(&mut conn)?.discard()?;
//!
//! let mut tx = conn.transaction();
//! let value = Command::cmd("GET").arg("k1").build().queue(&mut tx).as_string();
//! tx.execute()?;
//!
//! assert_eq!(value.get()?, Some("v1".to_string()));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod command;
pub mod transaction;
pub mod client;
pub mod pool;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ErrorKind, RespError, Result};
pub use config::Config;
pub use protocol::{ErrorValue, Value, WireType};
pub use network::Connection;
pub use command::{Command, CommandBuilder};
pub use transaction::{Deferred, Transaction};
pub use client::Client;
pub use pool::{Pool, PoolConfig};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of respkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
