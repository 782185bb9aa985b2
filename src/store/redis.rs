//! Redis store backend
//!
//! Backs the resource layer with a real Redis server through the `redis`
//! crate's synchronous API. The backend keeps one lazily opened connection
//! cached behind a mutex and reuses it across operations; a failed operation
//! drops the cached connection so the next call reconnects.
//!
//! Timeouts are applied to the connection itself and otherwise delegated to
//! the client — there is no retry layer here.

use crate::error::{StoreError, StoreResult};
use crate::store::backend::{RawFields, StoreBackend};
use redis::{Client, Commands, Connection};
use std::sync::Mutex;
use std::time::Duration;

/// Redis backend configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Connection URL, e.g. `redis://127.0.0.1:6379/0`
    pub url: String,
    /// Socket read timeout applied to new connections; `None` blocks forever
    pub read_timeout: Option<Duration>,
    /// Socket write timeout applied to new connections; `None` blocks forever
    pub write_timeout: Option<Duration>,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            read_timeout: None,
            write_timeout: None,
        }
    }
}

/// Redis store backend
pub struct RedisBackend {
    config: RedisConfig,
    client: Client,
    connection: Mutex<Option<Connection>>,
}

impl RedisBackend {
    /// Create a backend from a full configuration
    ///
    /// Validates the URL immediately; the first connection is opened lazily
    /// on the first store operation.
    pub fn new(config: RedisConfig) -> StoreResult<Self> {
        let client = Client::open(config.url.as_str()).map_err(|e| StoreError::Configuration {
            reason: format!("invalid redis url '{}': {}", config.url, e),
        })?;

        Ok(Self {
            config,
            client,
            connection: Mutex::new(None),
        })
    }

    /// Create a backend from a URL with default timeouts
    pub fn connect(url: impl Into<String>) -> StoreResult<Self> {
        Self::new(RedisConfig {
            url: url.into(),
            ..Default::default()
        })
    }

    /// The configuration this backend was built with
    pub fn config(&self) -> &RedisConfig {
        &self.config
    }

    /// Take the cached connection or open a fresh one
    fn acquire(&self) -> StoreResult<Connection> {
        let mut guard = self.connection.lock().map_err(|e| StoreError::Backend {
            operation: "lock".to_string(),
            reason: e.to_string(),
        })?;
        if let Some(conn) = guard.take() {
            return Ok(conn);
        }
        drop(guard);

        let conn = self
            .client
            .get_connection()
            .map_err(|e| StoreError::Connection {
                reason: e.to_string(),
            })?;
        conn.set_read_timeout(self.config.read_timeout)
            .map_err(|e| StoreError::Connection {
                reason: e.to_string(),
            })?;
        conn.set_write_timeout(self.config.write_timeout)
            .map_err(|e| StoreError::Connection {
                reason: e.to_string(),
            })?;
        Ok(conn)
    }

    /// Return a healthy connection to the cache for reuse
    fn release(&self, conn: Connection) {
        if let Ok(mut guard) = self.connection.lock() {
            *guard = Some(conn);
        }
    }

    /// Run one operation on a cached connection
    ///
    /// On failure the connection is dropped rather than returned: it may be
    /// mid-protocol or dead, and reconnecting is cheaper than diagnosing.
    fn with_connection<T, F>(&self, operation: &'static str, key: Option<&str>, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Connection) -> redis::RedisResult<T>,
    {
        let mut conn = self.acquire()?;
        match f(&mut conn) {
            Ok(value) => {
                self.release(conn);
                Ok(value)
            }
            Err(e) => Err(translate(operation, key, e)),
        }
    }
}

/// Map a client error onto the store error taxonomy
fn translate(operation: &'static str, key: Option<&str>, err: redis::RedisError) -> StoreError {
    if err.code() == Some("WRONGTYPE") {
        if let Some(key) = key {
            return StoreError::WrongType {
                key: key.to_string(),
            };
        }
    }
    if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() || err.is_timeout() {
        return StoreError::Connection {
            reason: err.to_string(),
        };
    }
    StoreError::Backend {
        operation: operation.to_string(),
        reason: err.to_string(),
    }
}

impl StoreBackend for RedisBackend {
    fn smembers(&self, key: &str) -> StoreResult<Vec<String>> {
        self.with_connection("smembers", Some(key), |conn| conn.smembers(key))
    }

    fn scard(&self, key: &str) -> StoreResult<u64> {
        self.with_connection("scard", Some(key), |conn| conn.scard(key))
    }

    fn sadd(&self, key: &str, member: &str) -> StoreResult<bool> {
        let added: u64 = self.with_connection("sadd", Some(key), |conn| conn.sadd(key, member))?;
        Ok(added > 0)
    }

    fn srem(&self, key: &str, member: &str) -> StoreResult<bool> {
        let removed: u64 = self.with_connection("srem", Some(key), |conn| conn.srem(key, member))?;
        Ok(removed > 0)
    }

    fn hgetall(&self, key: &str) -> StoreResult<RawFields> {
        self.with_connection("hgetall", Some(key), |conn| conn.hgetall(key))
    }

    fn hset_all(&self, key: &str, fields: &[(String, Vec<u8>)]) -> StoreResult<()> {
        if fields.is_empty() {
            return Ok(());
        }
        self.with_connection("hset_all", Some(key), |conn| conn.hset_multiple(key, fields))
    }

    fn exists(&self, key: &str) -> StoreResult<bool> {
        self.with_connection("exists", Some(key), |conn| conn.exists(key))
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        let removed: u64 = self.with_connection("delete", Some(key), |conn| conn.del(key))?;
        Ok(removed > 0)
    }

    fn flush_all(&self) -> StoreResult<()> {
        self.with_connection("flush_all", None, |conn| redis::cmd("FLUSHDB").exec(conn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_is_a_configuration_error() {
        let result = RedisBackend::connect("not a redis url");
        assert!(matches!(result, Err(StoreError::Configuration { .. })));
    }

    #[test]
    fn test_valid_url_builds_without_connecting() {
        // Client::open only parses; no server is contacted here
        let backend = RedisBackend::connect("redis://127.0.0.1:6379").unwrap();
        assert_eq!(backend.config().url, "redis://127.0.0.1:6379");
    }

    #[test]
    fn test_io_errors_translate_to_connection() {
        let err = redis::RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "refused",
        ));
        let translated = translate("smembers", Some("basket"), err);
        assert!(matches!(translated, StoreError::Connection { .. }));
    }

    #[test]
    fn test_server_errors_translate_to_backend() {
        let err = redis::RedisError::from((redis::ErrorKind::ResponseError, "boom"));
        let translated = translate("hgetall", Some("basket:42"), err);
        match translated {
            StoreError::Backend { operation, .. } => assert_eq!(operation, "hgetall"),
            other => panic!("expected backend error, got {other:?}"),
        }
    }
}
