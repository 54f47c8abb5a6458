//! Pool
//!
//! Reuse of connections across callers. A connection is never shared while
//! borrowed; concurrency comes from acquiring one connection per caller.
//!
//! ## Architecture
//! - Idle resources live in a bounded lock-free queue
//! - `acquire` pops an idle resource or creates a new one
//! - Dropping the guard returns the resource unless it was marked broken

use std::fmt;
use std::ops::{Deref, DerefMut};

use crossbeam::queue::ArrayQueue;

use crate::command::{Command, ConnectionCommand};
use crate::config::Config;
use crate::error::{RespError, Result};
use crate::network::{self, TcpConnection};

type Supplier<T> = Box<dyn Fn() -> Result<T> + Send + Sync>;
type HealthCheck<T> = Box<dyn Fn(&mut T) -> bool + Send + Sync>;

/// How a pool creates and validates resources
pub struct PoolConfig<T> {
    supplier: Supplier<T>,
    health_check: Option<HealthCheck<T>>,
    test_on_borrow: bool,
    max_idle: usize,
}

impl<T> PoolConfig<T> {
    pub fn new(supplier: impl Fn() -> Result<T> + Send + Sync + 'static) -> Self {
        Self {
            supplier: Box::new(supplier),
            health_check: None,
            test_on_borrow: false,
            max_idle: 8,
        }
    }

    /// Check used on idle resources when `test_on_borrow` is set
    pub fn health_check(mut self, check: impl Fn(&mut T) -> bool + Send + Sync + 'static) -> Self {
        self.health_check = Some(Box::new(check));
        self
    }

    pub fn test_on_borrow(mut self, enabled: bool) -> Self {
        self.test_on_borrow = enabled;
        self
    }

    /// Idle resources kept for reuse (at least one)
    pub fn max_idle(mut self, count: usize) -> Self {
        self.max_idle = count.max(1);
        self
    }
}

/// A pool of reusable resources
pub struct Pool<T> {
    config: PoolConfig<T>,
    idle: ArrayQueue<T>,
}

impl<T> Pool<T> {
    pub fn new(config: PoolConfig<T>) -> Self {
        let idle = ArrayQueue::new(config.max_idle.max(1));
        Self { config, idle }
    }

    /// Take a resource, reusing an idle one when possible
    pub fn acquire(&self) -> Result<Pooled<'_, T>> {
        while let Some(mut resource) = self.idle.pop() {
            if self.passes_check(&mut resource) {
                return Ok(Pooled::new(self, resource));
            }
            tracing::debug!("Dropping idle resource that failed its health check");
        }

        let resource = (self.config.supplier)()
            .map_err(|e| RespError::Pool(format!("failed to create resource: {}", e)))?;
        tracing::debug!("Created new pooled resource");

        Ok(Pooled::new(self, resource))
    }

    /// Number of idle resources
    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    fn passes_check(&self, resource: &mut T) -> bool {
        match (&self.config.health_check, self.config.test_on_borrow) {
            (Some(check), true) => check(resource),
            _ => true,
        }
    }

    fn release(&self, resource: T) {
        if self.idle.push(resource).is_err() {
            tracing::debug!("Idle queue full, dropping returned resource");
        }
    }
}

impl Pool<TcpConnection> {
    /// A pool of TCP connections built from `config`
    ///
    /// The health check sends PING and expects PONG.
    pub fn for_config(config: &Config) -> Self {
        let connect_config = config.clone();

        let pool_config = PoolConfig::new(move || network::connect(&connect_config))
            .health_check(ping)
            .test_on_borrow(config.pool_test_on_borrow)
            .max_idle(config.pool_max_idle);

        Pool::new(pool_config)
    }
}

fn ping(connection: &mut TcpConnection) -> bool {
    let reply = Command::cmd(ConnectionCommand::Ping)
        .build()
        .query(connection)
        .and_then(|executed| executed.as_string());

    matches!(reply, Ok(Some(ref pong)) if pong == "PONG")
}

impl<T> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("idle", &self.idle.len())
            .field("max_idle", &self.config.max_idle)
            .field("test_on_borrow", &self.config.test_on_borrow)
            .finish()
    }
}

// =============================================================================
// Borrow Guard
// =============================================================================

/// A borrowed resource, returned to the pool on drop
#[derive(Debug)]
pub struct Pooled<'p, T> {
    pool: &'p Pool<T>,
    resource: Option<T>,
    broken: bool,
}

impl<'p, T> Pooled<'p, T> {
    fn new(pool: &'p Pool<T>, resource: T) -> Self {
        Self {
            pool,
            resource: Some(resource),
            broken: false,
        }
    }

    /// Drop the resource instead of returning it
    ///
    /// Use after any resource error: the stream may hold unread replies.
    pub fn mark_broken(&mut self) {
        self.broken = true;
    }

    /// Keep the resource; the pool forgets it
    pub fn detach(mut self) -> T {
        self.resource.take().expect("resource present until drop")
    }
}

impl<T> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.resource.as_ref().expect("resource present until drop")
    }
}

impl<T> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.resource.as_mut().expect("resource present until drop")
    }
}

impl<T> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if let Some(resource) = self.resource.take() {
            if self.broken {
                tracing::warn!("Discarding broken pooled resource");
            } else {
                self.pool.release(resource);
            }
        }
    }
}
