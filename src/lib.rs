//! Flowgraph - an event-indexing pipeline for a money-streaming protocol.
//!
//! This is the workspace umbrella crate. The functionality lives in the
//! member crates:
//!
//! - `flowgraph-sdk` — core types, the deterministic entity-identity scheme,
//!   chain-order keys, and the continuous-flow accrual primitive.
//! - `flowgraph-indexer` — the event processor that turns decoded on-chain
//!   events into versioned entities, plus the entity store and chain
//!   capability traits it depends on.
