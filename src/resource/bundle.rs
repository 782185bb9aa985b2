//! Request bundles
//!
//! A [`Bundle`] carries one request's deserialized payload into the adapter
//! and the affected [`Record`] back out. Write operations take a bundle of
//! input data and return it with the stored record attached, so callers can
//! serialize the final state (including a generated identifier) without a
//! second read.

use crate::resource::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Payload container passed through create and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    data: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    object: Option<Record>,
}

impl Bundle {
    /// An empty bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bundle around request data
    pub fn from_data(data: BTreeMap<String, String>) -> Self {
        Self { data, object: None }
    }

    /// Add one data field, builder style
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(name.into(), value.into());
        self
    }

    /// The request data
    pub fn data(&self) -> &BTreeMap<String, String> {
        &self.data
    }

    /// Mutable access to the request data
    pub fn data_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.data
    }

    /// The record attached by the last operation, if any
    pub fn object(&self) -> Option<&Record> {
        self.object.as_ref()
    }

    /// Attach the stored record
    pub fn set_object(&mut self, record: Record) {
        self.object = Some(record);
    }

    /// Detach and return the record, leaving the data in place
    pub fn take_object(&mut self) -> Option<Record> {
        self.object.take()
    }

    /// Consume the bundle, yielding the attached record if any
    pub fn into_object(self) -> Option<Record> {
        self.object
    }
}
