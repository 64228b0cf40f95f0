//! Error types for the siteviews content view system.

use crate::types::{NodeId, RetrieverId, ViewId};
use thiserror::Error;

/// Longest view name the store accepts, in characters.
pub const MAX_VIEW_NAME_LEN: usize = 32;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("View not found: {0}")]
    ViewNotFound(ViewId),

    #[error("Retriever not found: {0}")]
    RetrieverNotFound(RetrieverId),

    #[error("View name must be 1-{MAX_VIEW_NAME_LEN} characters: {0:?}")]
    InvalidViewName(String),

    #[error("Host {host} already has a view named {name:?}")]
    DuplicateViewName { host: NodeId, name: String },

    #[error("Storage backend error: {0}")]
    Backend(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// View-resolution and administration errors
///
/// "View not found after traversal" is not an error; lookups return `Option`
/// or an empty result set instead.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("The {0} results retriever does not implement results()")]
    Unimplemented(&'static str),

    #[error("Unknown retriever kind: {0}")]
    UnknownRetrieverKind(String),

    #[error("Invalid locale tag {tag:?}: {message}")]
    InvalidLocale { tag: String, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ViewError {
    fn from(err: config::ConfigError) -> Self {
        ViewError::ConfigError(err.to_string())
    }
}
