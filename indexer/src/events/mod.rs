//! Event processor module for the Flowgraph indexer.
//!
//! This module provides the components that turn decoded protocol events
//! into versioned entities.
//!
//! # Components
//!
//! - [`types`]: Event envelope and kind-specific payloads
//! - [`revision`]: Stream lifecycle transitions and revision counters
//! - [`processor`]: EventProcessor implementation
//! - [`metrics`]: Event processor metrics

pub mod metrics;
pub mod processor;
pub mod revision;
pub mod types;

pub use metrics::{EventMetrics, MetricsSnapshot};
pub use processor::{EventProcessor, ProcessOutcome};
pub use revision::{apply_transition, classify_transition, StreamTransition};
pub use types::{Event, EventKind};
