//! Error types for the redis-resource library
//!
//! This module provides a unified error handling system using `thiserror` for
//! all components of the resource layer.

use thiserror::Error;

/// The main error type for the redis-resource library
#[derive(Error, Debug)]
pub enum Error {
    /// Key/value store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Record mapping and schema errors
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    /// Resource operation errors
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),
}

/// Store-specific error types
///
/// This is the single, consistent translation of backend failures: every
/// error raised by a store client surfaces as one of these variants, with
/// the failing operation named. No retries are attempted.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend configuration is unusable (bad URL, missing parameters)
    #[error("Store configuration error: {reason}")]
    Configuration {
        /// What makes the configuration unusable
        reason: String,
    },

    /// The store could not be reached or the connection was lost
    #[error("Store connection error: {reason}")]
    Connection {
        /// The underlying client failure
        reason: String,
    },

    /// An operation was applied to a key holding the wrong kind of value
    #[error("Wrong type for key '{key}': operation against a key holding the wrong kind of value")]
    WrongType {
        /// The key whose stored kind did not match the operation
        key: String,
    },

    /// The backend rejected or failed an operation
    #[error("Store operation failed: {operation}: {reason}")]
    Backend {
        /// The primitive operation that failed
        operation: String,
        /// The backend's failure description
        reason: String,
    },
}

/// Record-specific error types
#[derive(Error, Debug)]
pub enum RecordError {
    /// A stored field value was not valid UTF-8
    #[error("Field '{field}' holds invalid UTF-8 data")]
    InvalidUtf8 {
        /// The field whose bytes failed to decode
        field: String,
    },

    /// A field is not declared by the schema
    #[error("Unknown field: {field}")]
    UnknownField {
        /// The undeclared field name
        field: String,
    },

    /// A required field is absent
    #[error("Missing field: {field}")]
    MissingField {
        /// The absent field name
        field: String,
    },

    /// A field value does not match its declared kind
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidValue {
        /// The offending field name
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Conversion between a record and a typed object failed
    #[error("Record conversion failed: {reason}")]
    Conversion {
        /// The serde failure description
        reason: String,
    },
}

/// Resource-specific error types
#[derive(Error, Debug)]
pub enum ResourceError {
    /// No record exists under the requested identifier
    #[error("No record '{id}' in collection '{collection}'")]
    NotFound {
        /// The collection that was searched
        collection: String,
        /// The identifier that matched nothing
        id: String,
    },

    /// Adapter configuration is unusable (bad collection or detail field)
    #[error("Resource configuration error: {reason}")]
    Configuration {
        /// What makes the configuration unusable
        reason: String,
    },

    /// A caller-supplied identifier is unusable
    #[error("Invalid identifier: {reason}")]
    InvalidIdentifier {
        /// Why the identifier was rejected
        reason: String,
    },

    /// Whole-store flush was requested but not enabled in the configuration
    #[error("Store flush is disabled; enable `allow_flush_all` to permit it")]
    FlushDisabled,

    /// A store call failed underneath a resource operation
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Record mapping failed underneath a resource operation
    #[error("Record error: {0}")]
    Record(#[from] RecordError),
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience type alias for Store Results
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Convenience type alias for Record Results
pub type RecordResult<T> = std::result::Result<T, RecordError>;

/// Convenience type alias for Resource Results
pub type ResourceResult<T> = std::result::Result<T, ResourceError>;
