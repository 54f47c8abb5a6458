//! Network Module
//!
//! Connection handling.
//!
//! ## Architecture
//! - `Connection` works over any `Read`/`Write` pair handed in by the caller
//! - `connect` is a convenience that opens a TCP stream and splits it
//! - Timeouts belong to the socket, not to the protocol layer

mod connection;

pub use connection::Connection;

use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::Config;
use crate::error::{RespError, Result};

/// A connection over a TCP stream
pub type TcpConnection = Connection<TcpStream, TcpStream>;

/// Open a TCP connection as described by `config`
///
/// Applies nodelay and read/write timeouts, then splits the stream into
/// separate read and write handles.
pub fn connect(config: &Config) -> Result<TcpConnection> {
    let addr = resolve(&config.addr)?;

    let stream = if config.connect_timeout_ms > 0 {
        TcpStream::connect_timeout(&addr, Duration::from_millis(config.connect_timeout_ms))?
    } else {
        TcpStream::connect(addr)?
    };

    stream.set_nodelay(config.nodelay)?;

    if config.read_timeout_ms > 0 {
        stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
    }
    if config.write_timeout_ms > 0 {
        stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
    }

    // Clone stream for separate read/write handles
    let read_stream = stream.try_clone()?;
    let write_stream = stream;

    tracing::debug!("Connected to {}", addr);

    Ok(Connection::with_config(read_stream, write_stream, config))
}

fn resolve(addr: &str) -> Result<SocketAddr> {
    addr.to_socket_addrs()
        .map_err(|e| RespError::Config(format!("invalid address {:?}: {}", addr, e)))?
        .next()
        .ok_or_else(|| RespError::Config(format!("address {:?} resolved to nothing", addr)))
}
