//! Resource adapter
//!
//! [`ResourceAdapter`] implements the [`Resource`] operations on top of any
//! [`StoreBackend`]. Each collection is stored as one set of record
//! identifiers plus one hash per record; the adapter owns the key layout,
//! identifier handling, and optional schema validation, and translates
//! store-level failures into resource errors.

use crate::error::{RecordError, ResourceError, ResourceResult};
use crate::resource::bundle::Bundle;
use crate::resource::key::{validate_collection_name, validate_identifier, StorageKey};
use crate::resource::record::Record;
use crate::resource::schema::RecordSchema;
use crate::resource::{DetailParams, Resource};
use crate::store::StoreBackend;
use tracing::{debug, warn};
use uuid::Uuid;

/// Field under which a record's identifier is stored and addressed
pub const DEFAULT_DETAIL_FIELD: &str = "pk";

/// Per-collection adapter configuration
#[derive(Debug, Clone)]
pub struct ResourceConfig {
    /// Collection name, used as the key prefix
    pub collection: String,
    /// Field name carrying the record identifier
    pub detail_field: String,
    /// Schema applied to incoming data on create and update
    pub schema: Option<RecordSchema>,
    /// Whether [`ResourceAdapter::flush_store`] is permitted
    pub allow_flush_all: bool,
}

impl ResourceConfig {
    /// Configuration for one collection with defaults everywhere else
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            detail_field: DEFAULT_DETAIL_FIELD.to_string(),
            schema: None,
            allow_flush_all: false,
        }
    }

    /// Use a different identifier field name
    pub fn with_detail_field(mut self, field: impl Into<String>) -> Self {
        self.detail_field = field.into();
        self
    }

    /// Attach a schema to validate incoming data against
    pub fn with_schema(mut self, schema: RecordSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Permit flushing the whole store through this adapter
    pub fn allowing_flush_all(mut self) -> Self {
        self.allow_flush_all = true;
        self
    }
}

impl Default for ResourceConfig {
    /// Defaults with an empty collection name; set one before use, the
    /// adapter constructor rejects the empty name
    fn default() -> Self {
        Self::new("")
    }
}

/// CRUD adapter binding one collection to a store backend
pub struct ResourceAdapter<B> {
    backend: B,
    config: ResourceConfig,
}

impl<B: StoreBackend> ResourceAdapter<B> {
    /// Build an adapter, validating the configuration
    pub fn new(backend: B, config: ResourceConfig) -> ResourceResult<Self> {
        validate_collection_name(&config.collection)?;
        if config.detail_field.is_empty() {
            return Err(ResourceError::Configuration {
                reason: "detail field name must not be empty".to_string(),
            });
        }
        Ok(Self { backend, config })
    }

    /// Build an adapter for a collection with default configuration
    pub fn with_collection(backend: B, collection: impl Into<String>) -> ResourceResult<Self> {
        Self::new(backend, ResourceConfig::new(collection))
    }

    /// The collection this adapter serves
    pub fn collection(&self) -> &str {
        &self.config.collection
    }

    /// The underlying store backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The adapter configuration
    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// Key for the whole collection or, with an identifier, one record
    ///
    /// The identifier is validated; callers resolving request paths get the
    /// same rejection for an empty identifier as the operations themselves.
    pub fn storage_key(&self, id: Option<&str>) -> ResourceResult<StorageKey> {
        match id {
            Some(id) => {
                validate_identifier(id)?;
                Ok(StorageKey::record(&self.config.collection, id))
            }
            None => Ok(StorageKey::collection(&self.config.collection)),
        }
    }

    /// Remove every key in the store, across all collections
    ///
    /// Refused unless the configuration opts in via
    /// [`ResourceConfig::allowing_flush_all`]. This is a maintenance hatch,
    /// not a resource operation; [`Resource::delete_all`] clears just this
    /// adapter's collection.
    pub fn flush_store(&self) -> ResourceResult<()> {
        if !self.config.allow_flush_all {
            return Err(ResourceError::FlushDisabled);
        }
        warn!(collection = %self.config.collection, "flushing entire store");
        self.backend.flush_all()?;
        Ok(())
    }

    fn collection_key(&self) -> String {
        StorageKey::collection(&self.config.collection).to_string()
    }

    fn record_key(&self, id: &str) -> String {
        StorageKey::record(&self.config.collection, id).to_string()
    }

    /// Read one record's hash, identifier taken as already validated
    fn load_record(&self, id: &str) -> ResourceResult<Option<Record>> {
        let raw = self.backend.hgetall(&self.record_key(id))?;
        if raw.is_empty() {
            return Ok(None);
        }
        Ok(Some(Record::from_raw(raw)?))
    }

    /// Resolve the identifier for a create: explicit argument first, then
    /// the payload's detail field, then a fresh UUID
    fn resolve_identifier(&self, explicit: Option<&str>, bundle: &Bundle) -> ResourceResult<String> {
        if let Some(id) = explicit {
            validate_identifier(id)?;
            return Ok(id.to_string());
        }
        if let Some(id) = bundle.data().get(&self.config.detail_field) {
            validate_identifier(id)?;
            return Ok(id.clone());
        }
        Ok(Uuid::new_v4().to_string())
    }

    /// Identifier parameters for a record already in hand
    ///
    /// Like [`Resource::detail_params`], but straight from a record read via
    /// [`Resource::get`] or [`Resource::list`].
    pub fn detail_params_for(&self, record: &Record) -> ResourceResult<DetailParams> {
        match record.get(&self.config.detail_field) {
            Some(id) => {
                let mut params = DetailParams::new();
                params.insert(self.config.detail_field.clone(), id.to_string());
                Ok(params)
            }
            None => Err(RecordError::MissingField {
                field: self.config.detail_field.clone(),
            }
            .into()),
        }
    }
}

impl<B: StoreBackend> Resource for ResourceAdapter<B> {
    fn list(&self) -> ResourceResult<Vec<Record>> {
        let ids = self.backend.smembers(&self.collection_key())?;
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            // a member can outlive its hash when another client deletes the
            // record between the two reads; skip it rather than fail the list
            if let Some(record) = self.load_record(&id)? {
                records.push(record);
            }
        }
        Ok(records)
    }

    fn get(&self, id: &str) -> ResourceResult<Record> {
        validate_identifier(id)?;
        self.load_record(id)?.ok_or_else(|| ResourceError::NotFound {
            collection: self.config.collection.clone(),
            id: id.to_string(),
        })
    }

    fn create(&self, mut bundle: Bundle, id: Option<&str>) -> ResourceResult<Bundle> {
        let id = self.resolve_identifier(id, &bundle)?;

        let mut record: Record = bundle
            .data()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        // the identifier field is the adapter's, not the schema's; validate
        // the domain fields alone, then merge the resolved identifier in
        record.remove(&self.config.detail_field);
        if let Some(schema) = &self.config.schema {
            schema.validate(&record)?;
        }
        record.insert(self.config.detail_field.clone(), id.clone());

        let key = self.record_key(&id);
        // full overwrite: fields from a previous version must not survive
        self.backend.delete(&key)?;
        self.backend.hset_all(&key, &record.to_raw())?;
        self.backend.sadd(&self.collection_key(), &id)?;
        debug!(collection = %self.config.collection, id = %id, "stored record");

        bundle
            .data_mut()
            .insert(self.config.detail_field.clone(), id);
        bundle.set_object(record);
        Ok(bundle)
    }

    fn update(&self, bundle: Bundle, id: &str) -> ResourceResult<Bundle> {
        self.create(bundle, Some(id))
    }

    fn delete(&self, id: &str) -> ResourceResult<()> {
        validate_identifier(id)?;
        let key = self.record_key(id);
        if !self.backend.exists(&key)? {
            return Err(ResourceError::NotFound {
                collection: self.config.collection.clone(),
                id: id.to_string(),
            });
        }
        self.backend.srem(&self.collection_key(), id)?;
        self.backend.delete(&key)?;
        debug!(collection = %self.config.collection, id = %id, "deleted record");
        Ok(())
    }

    fn delete_all(&self) -> ResourceResult<u64> {
        let ids = self.backend.smembers(&self.collection_key())?;
        let mut removed = 0u64;
        for id in &ids {
            if self.backend.delete(&self.record_key(id))? {
                removed += 1;
            }
        }
        self.backend.delete(&self.collection_key())?;
        debug!(collection = %self.config.collection, removed, "cleared collection");
        Ok(removed)
    }

    fn count(&self) -> ResourceResult<u64> {
        Ok(self.backend.scard(&self.collection_key())?)
    }

    fn detail_params(&self, bundle: &Bundle) -> ResourceResult<DetailParams> {
        if let Some(record) = bundle.object() {
            return self.detail_params_for(record);
        }
        match bundle.data().get(&self.config.detail_field) {
            Some(id) => {
                let mut params = DetailParams::new();
                params.insert(self.config.detail_field.clone(), id.clone());
                Ok(params)
            }
            None => Err(RecordError::MissingField {
                field: self.config.detail_field.clone(),
            }
            .into()),
        }
    }
}
