//! Store backend trait and types

use crate::error::StoreResult;
use std::collections::HashMap;

/// Raw hash contents as read from the store: field name to undecoded value bytes
pub type RawFields = HashMap<String, Vec<u8>>;

/// Key/value store backend trait for the resource layer
///
/// The surface mirrors the store primitives the adapter needs: a set per
/// collection holding member identifiers, and a hash per record holding its
/// fields. Values travel as byte strings and are decoded as UTF-8 on read.
///
/// Missing keys follow store semantics rather than erroring: reading a set or
/// hash that does not exist yields an empty result, and removals report
/// whether anything was there. Applying a hash operation to a set key (or the
/// reverse) is a wrong-type error.
///
/// Implementations use interior mutability so a backend can be shared behind
/// a plain reference; no operation requires `&mut self`.
pub trait StoreBackend: Send + Sync {
    /// Return all members of the set at `key`; empty if the key is absent
    fn smembers(&self, key: &str) -> StoreResult<Vec<String>>;

    /// Return the number of members in the set at `key`; zero if absent
    fn scard(&self, key: &str) -> StoreResult<u64>;

    /// Add `member` to the set at `key`, creating the set if needed;
    /// returns whether the member was newly added
    fn sadd(&self, key: &str, member: &str) -> StoreResult<bool>;

    /// Remove `member` from the set at `key`; returns whether it was present
    fn srem(&self, key: &str, member: &str) -> StoreResult<bool>;

    /// Return every field of the hash at `key`; empty if the key is absent
    fn hgetall(&self, key: &str) -> StoreResult<RawFields>;

    /// Write all `fields` into the hash at `key`, creating it if needed.
    /// Existing fields not named are left in place; an empty `fields` slice
    /// is a no-op.
    fn hset_all(&self, key: &str, fields: &[(String, Vec<u8>)]) -> StoreResult<()>;

    /// Whether any value is stored at `key`
    fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Delete the value at `key` regardless of its kind;
    /// returns whether the key existed
    fn delete(&self, key: &str) -> StoreResult<bool>;

    /// Remove every key in the store
    ///
    /// Clears state far beyond any single collection. The resource layer
    /// only reaches this through an explicit configuration opt-in.
    fn flush_all(&self) -> StoreResult<()>;
}
