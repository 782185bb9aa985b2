//! Resource layer
//!
//! Maps framework-style CRUD operations onto the key/hash/set layout the
//! store backends expose. The pieces:
//!
//! - [`StorageKey`]: collection and record key construction
//! - [`Record`]: one stored record as an ordered string map
//! - [`RecordSchema`]: optional field declarations and validation
//! - [`Bundle`]: request payload container for write operations
//! - [`ResourceAdapter`]: the [`Resource`] implementation itself
//!
//! The [`Resource`] trait is the seam handlers program against; it is object
//! safe, so a `Box<dyn Resource>` per route works.

pub mod adapter;
pub mod bundle;
pub mod key;
pub mod record;
pub mod schema;

pub use adapter::{ResourceAdapter, ResourceConfig, DEFAULT_DETAIL_FIELD};
pub use bundle::Bundle;
pub use key::{StorageKey, KEY_SEPARATOR};
pub use record::Record;
pub use schema::{FieldKind, FieldSpec, RecordSchema, UnknownFields};

use crate::error::ResourceResult;
use std::collections::BTreeMap;

/// Parameters addressing one record, e.g. for building a detail URI
pub type DetailParams = BTreeMap<String, String>;

/// CRUD operations over one collection of records
pub trait Resource: Send + Sync {
    /// All records currently in the collection
    fn list(&self) -> ResourceResult<Vec<Record>>;

    /// The record stored under `id`
    fn get(&self, id: &str) -> ResourceResult<Record>;

    /// Store a new record built from the bundle's data
    ///
    /// The identifier is taken from `id` if given, else from the bundle's
    /// detail field, else generated. Returns the bundle with the stored
    /// record attached and the identifier merged into its data.
    fn create(&self, bundle: Bundle, id: Option<&str>) -> ResourceResult<Bundle>;

    /// Replace the record stored under `id` with the bundle's data
    fn update(&self, bundle: Bundle, id: &str) -> ResourceResult<Bundle>;

    /// Remove the record stored under `id`
    fn delete(&self, id: &str) -> ResourceResult<()>;

    /// Remove every record in the collection, returning how many went
    fn delete_all(&self) -> ResourceResult<u64>;

    /// Number of records in the collection
    fn count(&self) -> ResourceResult<u64>;

    /// Identifier parameters for the record a bundle refers to
    fn detail_params(&self, bundle: &Bundle) -> ResourceResult<DetailParams>;
}
