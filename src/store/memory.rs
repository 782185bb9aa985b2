//! In-memory store backend
//!
//! A process-local implementation of [`StoreBackend`] that models the store's
//! typed keys: a key holds either a hash (one record's fields) or a set (a
//! collection's member identifiers), and operations against the wrong kind
//! fail the way the real store fails. Cloning shares the underlying map, so
//! several adapters can point at the same store in tests.

use crate::error::{StoreError, StoreResult};
use crate::store::backend::{RawFields, StoreBackend};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// One stored value: the store's hash or set kind
#[derive(Debug, Clone)]
enum Entry {
    /// A record's fields
    Hash(HashMap<String, Vec<u8>>),
    /// A collection's member identifiers
    Set(BTreeSet<String>),
}

/// In-memory store backend
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryBackend {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored (hashes and sets alike)
    pub fn len(&self) -> usize {
        self.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Whether the store holds no keys at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, Entry>>> {
        self.entries.read().map_err(|e| StoreError::Backend {
            operation: "lock".to_string(),
            reason: e.to_string(),
        })
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, Entry>>> {
        self.entries.write().map_err(|e| StoreError::Backend {
            operation: "lock".to_string(),
            reason: e.to_string(),
        })
    }

    fn wrong_type(key: &str) -> StoreError {
        StoreError::WrongType {
            key: key.to_string(),
        }
    }
}

impl StoreBackend for MemoryBackend {
    fn smembers(&self, key: &str) -> StoreResult<Vec<String>> {
        let entries = self.read()?;
        match entries.get(key) {
            Some(Entry::Set(members)) => Ok(members.iter().cloned().collect()),
            Some(Entry::Hash(_)) => Err(Self::wrong_type(key)),
            None => Ok(Vec::new()),
        }
    }

    fn scard(&self, key: &str) -> StoreResult<u64> {
        let entries = self.read()?;
        match entries.get(key) {
            Some(Entry::Set(members)) => Ok(members.len() as u64),
            Some(Entry::Hash(_)) => Err(Self::wrong_type(key)),
            None => Ok(0),
        }
    }

    fn sadd(&self, key: &str, member: &str) -> StoreResult<bool> {
        let mut entries = self.write()?;
        match entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::Set(BTreeSet::new()))
        {
            Entry::Set(members) => Ok(members.insert(member.to_string())),
            Entry::Hash(_) => Err(Self::wrong_type(key)),
        }
    }

    fn srem(&self, key: &str, member: &str) -> StoreResult<bool> {
        let mut entries = self.write()?;
        match entries.get_mut(key) {
            Some(Entry::Set(members)) => {
                let removed = members.remove(member);
                if members.is_empty() {
                    // The store drops empty sets rather than keeping husks
                    entries.remove(key);
                }
                Ok(removed)
            }
            Some(Entry::Hash(_)) => Err(Self::wrong_type(key)),
            None => Ok(false),
        }
    }

    fn hgetall(&self, key: &str) -> StoreResult<RawFields> {
        let entries = self.read()?;
        match entries.get(key) {
            Some(Entry::Hash(fields)) => Ok(fields.clone()),
            Some(Entry::Set(_)) => Err(Self::wrong_type(key)),
            None => Ok(RawFields::new()),
        }
    }

    fn hset_all(&self, key: &str, fields: &[(String, Vec<u8>)]) -> StoreResult<()> {
        if fields.is_empty() {
            return Ok(());
        }
        let mut entries = self.write()?;
        match entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::Hash(HashMap::new()))
        {
            Entry::Hash(existing) => {
                for (name, value) in fields {
                    existing.insert(name.clone(), value.clone());
                }
                Ok(())
            }
            Entry::Set(_) => Err(Self::wrong_type(key)),
        }
    }

    fn exists(&self, key: &str) -> StoreResult<bool> {
        let entries = self.read()?;
        Ok(entries.contains_key(key))
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        let mut entries = self.write()?;
        Ok(entries.remove(key).is_some())
    }

    fn flush_all(&self) -> StoreResult<()> {
        let mut entries = self.write()?;
        entries.clear();
        Ok(())
    }
}
