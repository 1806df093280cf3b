//! Error types for the configuration, record-loading, and CLI layers.
//!
//! The traversal functions in [`crate::chain`] never construct these: they
//! are generic over the caller's error type and hand it back untouched.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised around a traversal (loading config or nodes, finding a
/// start node), never by the traversal itself.
#[derive(Debug, Error)]
pub enum ChainWalkError {
    /// Reading a config or node file failed.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid YAML for [`crate::config::ChainConfig`].
    #[error("invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Node file is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Config parsed but holds values the walker cannot use.
    #[error("invalid config: {message}")]
    InvalidConfig { message: String },

    /// No node in the collection carries the requested identifier.
    #[error("no node with identifier {id}")]
    NodeNotFound { id: String },

    /// Node file has the wrong shape for the requested resolution mode.
    #[error("invalid node collection: {message}")]
    InvalidNodes { message: String },
}

/// Result alias for the ambient layers.
pub type Result<T> = std::result::Result<T, ChainWalkError>;
