//! Audit records for processed events.

use alloy_primitives::B256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids;

/// Audit record written for each applied event.
///
/// Identity = event name + transaction hash + log index, the unique key for
/// event-log entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Event name, e.g. `FlowUpdated`.
    pub name: String,

    /// Transaction hash the event was emitted in.
    pub tx_hash: B256,

    /// Block number of the event.
    pub block_number: u64,

    /// Log index within the block.
    pub log_index: u64,

    /// Chain-order key of the event.
    pub order: u64,

    /// Wall-clock time the record was written.
    pub recorded_at: DateTime<Utc>,
}

impl EventRecord {
    /// Returns the entity identity.
    #[must_use]
    pub fn id(&self) -> String {
        ids::event_id(&self.name, self.tx_hash, self.log_index)
    }
}
