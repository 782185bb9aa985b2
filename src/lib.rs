//! Redis-backed resource storage
//!
//! This crate adapts framework-style REST resources onto a Redis-shaped
//! key/value store. Each collection lives under two kinds of keys: the
//! collection name itself holds a set of record identifiers, and
//! `collection:id` holds one hash of string fields per record. The
//! [`ResourceAdapter`](resource::ResourceAdapter) translates list, get,
//! create, update and delete operations into those primitives.
//!
//! # Storage model
//!
//! - `basket` — set of identifiers, one member per record
//! - `basket:42` — hash of field values for record `42`
//!
//! Records carry their own identifier under a configurable detail field
//! (`pk` by default), so a record read back is self-describing.
//!
//! # Backends
//!
//! Storage is reached through the [`StoreBackend`](store::StoreBackend)
//! trait. [`MemoryBackend`](store::MemoryBackend) ships for tests and
//! prototyping; the `redis` feature (enabled by default) adds
//! `RedisBackend` over a real server.
//!
//! # Example
//!
//! ```
//! use redis_resource::prelude::*;
//!
//! fn main() -> redis_resource::Result<()> {
//!     let adapter = ResourceAdapter::with_collection(MemoryBackend::new(), "basket")?;
//!
//!     let bundle = Bundle::new().with_field("item", "apple").with_field("qty", "3");
//!     let bundle = adapter.create(bundle, Some("42"))?;
//!     assert_eq!(bundle.object().and_then(|r| r.get("item")), Some("apple"));
//!
//!     let record = adapter.get("42")?;
//!     assert_eq!(record.get("qty"), Some("3"));
//!
//!     adapter.delete("42")?;
//!     assert_eq!(adapter.count()?, 0);
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod resource;
pub mod store;

pub use error::{Error, Result};

/// Crate version from the package manifest
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name from the package manifest
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");

/// Common imports for working with resource adapters
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::resource::{
        Bundle, FieldKind, FieldSpec, Record, RecordSchema, Resource, ResourceAdapter,
        ResourceConfig, StorageKey,
    };
    #[cfg(feature = "redis")]
    pub use crate::store::{RedisBackend, RedisConfig};
    pub use crate::store::{MemoryBackend, StoreBackend};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_metadata() {
        assert_eq!(CRATE_NAME, "redis-resource");
        assert!(!VERSION.is_empty());
    }
}
