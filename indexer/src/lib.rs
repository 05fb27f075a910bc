//! Flowgraph Indexer - derives versioned entities from protocol events.
//!
//! This crate hosts the event processor: it consumes decoded on-chain events
//! in canonical chain order and maintains the entity set (tokens, streams,
//! indexes, subscriptions, account aggregates) in an entity store.
//!
//! # Components
//!
//! - [`events`]: Event types, stream revisioning, and the processor
//! - [`store`]: Entity store contract, in-memory store, existence predicates
//! - [`chain`]: Best-effort capability traits against contract state
//! - [`enrichment`]: Token metadata, listing, and host validation
//! - [`config`]: Indexer configuration

pub mod chain;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod events;
pub mod store;

pub use chain::{CallResult, MockResolverRpc, MockToken, MockTokenRpc, ResolverRpc, TokenRpc};
pub use config::{ConfigError, IndexerConfig};
pub use error::IndexerError;
pub use events::{Event, EventKind, EventMetrics, EventProcessor, ProcessOutcome};
pub use store::{EntityStore, EntityStoreExt, MemoryStore, StoreError};
