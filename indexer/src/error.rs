//! Indexer error types.

use flowgraph_sdk::SdkError;

use crate::config::ConfigError;
use crate::store::StoreError;

/// Errors from event processing.
///
/// Any of these aborts the pipeline: downstream aggregates assume no gaps,
/// so an event is never silently skipped once accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexerError {
    /// The entity store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// An identity or ordering derivation failed.
    #[error("sdk error: {0}")]
    Sdk(#[from] SdkError),

    /// The configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A stream entity the revision counters point at is missing.
    #[error("missing stream entity: {0}")]
    MissingStream(String),
}
