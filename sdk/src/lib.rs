//! Flowgraph SDK - core types for the Flowgraph indexing pipeline.
//!
//! This crate provides the deterministic building blocks the event processor
//! is made of: entity types, the identity scheme, chain-order keys, and the
//! continuous-flow accrual primitive.
//!
//! # Core Types
//!
//! - [`FlowRate`], [`Timestamp`] — Type-safe numeric wrappers
//! - [`Token`], [`TokenStatistic`] — Token record and protocol-wide aggregate
//! - [`Stream`], [`StreamPeriod`], [`StreamRevision`] — Revisioned stream lifecycles
//! - [`Index`], [`IndexSubscription`] — Distribution indexes and subscriptions
//! - [`AccountTokenSnapshot`] — Per-account, per-token aggregate
//! - [`FlowOperator`] — Delegated flow-control grants
//! - [`EventRecord`] — Audit record per applied event
//!
//! # Pure Functions
//!
//! - [`ids`] — Deterministic entity-identity derivation
//! - [`ordering`] — Total-order keys from (block number, log index)
//! - [`accrual`] — Settlement of continuous flows between discrete events
//!
//! # Example
//!
//! ```rust
//! use alloy_primitives::Address;
//! use flowgraph_sdk::{ids, ordering, accrual, FlowRate, Timestamp};
//!
//! let sender = Address::ZERO;
//! let receiver = Address::repeat_byte(1);
//! let token = Address::repeat_byte(2);
//!
//! let stream_id = ids::stream_id(sender, receiver, token, 0);
//! let order = ordering::order_key(100, 3).expect("in-bound log index");
//! let settled = accrual::amount_flowed(
//!     Timestamp::new(130),
//!     Timestamp::new(100),
//!     FlowRate::new(5),
//! );
//! assert_eq!(settled.to_string(), "150");
//! # let _ = (stream_id, order);
//! ```

pub mod accrual;
pub mod error;
pub mod ids;
pub mod ordering;
pub mod types;

pub use error::SdkError;
pub use ordering::ORDER_MULTIPLIER;
pub use types::{
    AccountTokenSnapshot, EventRecord, FlowOperator, FlowRate, Index, IndexSubscription, Stream,
    StreamPeriod, StreamRevision, Timestamp, Token, TokenStatistic, MAX_FLOW_RATE,
};
