//! Store backends
//!
//! The resource layer talks to storage through the [`StoreBackend`] trait,
//! a small set of hash and set primitives. Two implementations ship with the
//! crate:
//!
//! - [`MemoryBackend`]: in-process, for tests and prototyping
//! - `RedisBackend`: a real Redis server, behind the `redis` feature
//!
//! Backends are injected into the resource adapter at construction time, so
//! swapping one for the other requires no change to resource code.

pub mod backend;
pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;

pub use backend::{RawFields, StoreBackend};
pub use memory::MemoryBackend;
#[cfg(feature = "redis")]
pub use redis::{RedisBackend, RedisConfig};
