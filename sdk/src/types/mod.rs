//! Core entity types for the Flowgraph SDK.
//!
//! Every entity's identity is a deterministic function of its fields,
//! derived through [`crate::ids`].

pub mod account;
pub mod index;
pub mod primitives;
pub mod record;
pub mod stream;
pub mod token;

pub use account::AccountTokenSnapshot;
pub use index::{Index, IndexSubscription};
pub use primitives::{FlowRate, Timestamp, MAX_FLOW_RATE};
pub use record::EventRecord;
pub use stream::{FlowOperator, Stream, StreamPeriod, StreamRevision};
pub use token::{Token, TokenStatistic};
