//! Stream entities.
//!
//! A stream relationship (sender, receiver, token) is revisioned: each
//! close-and-reopen produces a fresh lifecycle with a disjoint identity, and
//! each rate change within a lifecycle produces a new period. Old lifecycles
//! and periods remain addressable, immutable history.

use std::fmt;

use alloy_primitives::{Address, I256};
use serde::{Deserialize, Serialize};

use crate::ids;

use super::primitives::{FlowRate, Timestamp};

/// Revision counters for one stream relationship.
///
/// Keyed by (sender, receiver, token). Created lazily on the first stream
/// event between the triple. The presence of this record says nothing about
/// whether a stream is currently flowing; activity lives on [`Stream`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamRevision {
    /// Index of the current stream lifecycle. Strictly increases each time
    /// the relationship is fully closed; never decreases.
    pub revision_index: u32,

    /// Index of the current constant-rate period within the lifecycle.
    pub period_revision_index: u32,

    /// Identity of the most recently opened stream for this relationship.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_recent_stream: Option<String>,
}

impl StreamRevision {
    /// Creates the initial revision record for a relationship.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// One stream lifecycle.
///
/// Identity = stream revision identity + revision index, so a reopened
/// relationship never mutates a stale record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    /// Stream sender.
    pub sender: Address,

    /// Stream receiver.
    pub receiver: Address,

    /// Token being streamed.
    pub token: Address,

    /// Revision index of this lifecycle.
    pub revision_index: u32,

    /// Current flow rate; zero once the lifecycle is closed.
    pub current_flow_rate: FlowRate,

    /// Amount streamed over this lifecycle, settled up to
    /// `updated_at_timestamp`.
    pub streamed_until_updated_at: I256,

    /// Block timestamp when the lifecycle opened.
    pub created_at_timestamp: Timestamp,

    /// Chain-order key when the lifecycle opened.
    pub created_at_order: u64,

    /// Block timestamp of the last update.
    pub updated_at_timestamp: Timestamp,

    /// Chain-order key of the last update.
    pub updated_at_order: u64,
}

impl Stream {
    /// Opens a new stream lifecycle.
    #[must_use]
    pub fn open(
        sender: Address,
        receiver: Address,
        token: Address,
        revision_index: u32,
        flow_rate: FlowRate,
        timestamp: Timestamp,
        order: u64,
    ) -> Self {
        Self {
            sender,
            receiver,
            token,
            revision_index,
            current_flow_rate: flow_rate,
            streamed_until_updated_at: I256::ZERO,
            created_at_timestamp: timestamp,
            created_at_order: order,
            updated_at_timestamp: timestamp,
            updated_at_order: order,
        }
    }

    /// Returns the entity identity.
    #[must_use]
    pub fn id(&self) -> String {
        ids::stream_id(self.sender, self.receiver, self.token, self.revision_index)
    }

    /// Returns true while the stream is flowing.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.current_flow_rate.is_zero()
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stream({} @ {}/s)", self.id(), self.current_flow_rate)
    }
}

/// One constant-rate period within a stream lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamPeriod {
    /// Identity of the owning stream.
    pub stream: String,

    /// Period index within the lifecycle.
    pub period_revision_index: u32,

    /// Flow rate over this period.
    pub flow_rate: FlowRate,

    /// Block timestamp when the period started.
    pub started_at_timestamp: Timestamp,

    /// Chain-order key when the period started.
    pub started_at_order: u64,

    /// Block timestamp when the period stopped; absent while open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped_at_timestamp: Option<Timestamp>,

    /// Total amount streamed over the period; settled when it stops.
    pub total_amount_streamed: I256,
}

impl StreamPeriod {
    /// Opens a new period on a stream.
    #[must_use]
    pub fn open(
        stream_id: &str,
        period_revision_index: u32,
        flow_rate: FlowRate,
        timestamp: Timestamp,
        order: u64,
    ) -> Self {
        Self {
            stream: stream_id.to_string(),
            period_revision_index,
            flow_rate,
            started_at_timestamp: timestamp,
            started_at_order: order,
            stopped_at_timestamp: None,
            total_amount_streamed: I256::ZERO,
        }
    }

    /// Returns the entity identity.
    #[must_use]
    pub fn id(&self) -> String {
        ids::stream_period_id(&self.stream, self.period_revision_index)
    }

    /// Returns true while the period has not been stopped.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.stopped_at_timestamp.is_none()
    }

    /// Stops the period, settling the amount streamed over it.
    pub fn stop(&mut self, timestamp: Timestamp, amount_streamed: I256) {
        self.stopped_at_timestamp = Some(timestamp);
        self.total_amount_streamed = amount_streamed;
    }
}

/// A delegated flow-control permission grant.
///
/// Identity = (operator, token, sender).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowOperator {
    /// The operator the permissions are granted to.
    pub flow_operator: Address,

    /// Token the grant applies to.
    pub token: Address,

    /// The sender delegating control of its flows.
    pub sender: Address,

    /// Permission bitmask (create/update/delete).
    pub permissions: u8,

    /// Remaining flow-rate allowance the operator may allocate.
    pub flow_rate_allowance: FlowRate,

    /// Block timestamp of the last update.
    pub updated_at_timestamp: Timestamp,

    /// Chain-order key of the last update.
    pub updated_at_order: u64,
}

impl FlowOperator {
    /// Returns the entity identity.
    #[must_use]
    pub fn id(&self) -> String {
        ids::flow_operator_id(self.flow_operator, self.token, self.sender)
    }
}
