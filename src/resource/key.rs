//! Storage key construction
//!
//! Every resource collection maps onto two kinds of keys: the collection key
//! itself (a set of record identifiers) and one record key per stored record
//! (a hash of field values). Record keys are the collection name and the
//! identifier joined by [`KEY_SEPARATOR`].

use crate::error::{ResourceError, ResourceResult};
use std::fmt;

/// Separator between collection name and record identifier
pub const KEY_SEPARATOR: char = ':';

/// A key addressing either a collection or a single record within it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey {
    collection: String,
    id: Option<String>,
}

impl StorageKey {
    /// Key for a whole collection: the set of record identifiers
    pub fn collection(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: None,
        }
    }

    /// Key for one record within a collection: the record's field hash
    pub fn record(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: Some(id.into()),
        }
    }

    /// The collection this key belongs to
    pub fn collection_name(&self) -> &str {
        &self.collection
    }

    /// The record identifier, if this is a record key
    pub fn identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Whether this key addresses a single record
    pub fn is_record(&self) -> bool {
        self.id.is_some()
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{}{}{}", self.collection, KEY_SEPARATOR, id),
            None => write!(f, "{}", self.collection),
        }
    }
}

/// Check that a collection name can be embedded in keys
///
/// The name must be non-empty and must not contain the separator, otherwise
/// record keys would be ambiguous.
pub fn validate_collection_name(name: &str) -> ResourceResult<()> {
    if name.is_empty() {
        return Err(ResourceError::Configuration {
            reason: "collection name must not be empty".to_string(),
        });
    }
    if name.contains(KEY_SEPARATOR) {
        return Err(ResourceError::Configuration {
            reason: format!("collection name '{name}' must not contain '{KEY_SEPARATOR}'"),
        });
    }
    Ok(())
}

/// Check that a record identifier can be embedded in keys
pub fn validate_identifier(id: &str) -> ResourceResult<()> {
    if id.is_empty() {
        return Err(ResourceError::InvalidIdentifier {
            reason: "identifier must not be empty".to_string(),
        });
    }
    Ok(())
}
