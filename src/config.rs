//! Configuration for respkv
//!
//! Centralized configuration with sensible defaults.

use crate::protocol::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_LINE_LEN, MAX_BULK_LEN};

/// Main configuration for a respkv client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Server address (host:port)
    pub addr: String,

    /// Connect timeout (milliseconds, 0 = OS default)
    pub connect_timeout_ms: u64,

    /// Socket read timeout (milliseconds, 0 = block forever)
    pub read_timeout_ms: u64,

    /// Socket write timeout (milliseconds, 0 = block forever)
    pub write_timeout_ms: u64,

    /// Disable Nagle's algorithm on new connections
    pub nodelay: bool,

    // -------------------------------------------------------------------------
    // Codec Configuration
    // -------------------------------------------------------------------------
    /// Largest bulk string the parser will allocate for (in bytes)
    pub max_bulk_len: usize,

    /// Deepest array nesting the parser will follow
    pub max_depth: usize,

    /// Longest simple string, error or integer line (in bytes)
    pub max_line_len: usize,

    // -------------------------------------------------------------------------
    // Pool Configuration
    // -------------------------------------------------------------------------
    /// Max idle connections kept by a pool
    pub pool_max_idle: usize,

    /// PING idle connections before handing them out
    pub pool_test_on_borrow: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:6379".to_string(),
            connect_timeout_ms: 5000,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
            nodelay: true,
            max_bulk_len: MAX_BULK_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
            max_line_len: DEFAULT_MAX_LINE_LEN,
            pool_max_idle: 8,
            pool_test_on_borrow: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the server address
    pub fn addr(mut self, addr: impl Into<String>) -> Self {
        self.config.addr = addr.into();
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Enable or disable TCP_NODELAY
    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.config.nodelay = nodelay;
        self
    }

    /// Set the bulk string size limit, clamped to the protocol maximum
    pub fn max_bulk_len(mut self, len: usize) -> Self {
        self.config.max_bulk_len = len.min(MAX_BULK_LEN);
        self
    }

    /// Set the maximum array nesting depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Set the line length limit for non-bulk replies
    pub fn max_line_len(mut self, len: usize) -> Self {
        self.config.max_line_len = len;
        self
    }

    /// Set the number of idle connections a pool keeps
    pub fn pool_max_idle(mut self, count: usize) -> Self {
        self.config.pool_max_idle = count;
        self
    }

    /// Health-check pooled connections on borrow
    pub fn pool_test_on_borrow(mut self, enabled: bool) -> Self {
        self.config.pool_test_on_borrow = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
