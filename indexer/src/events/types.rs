//! Decoded protocol events.
//!
//! The ingestion collaborator delivers events already decoded and in
//! block-then-log order; these are the shapes the processor consumes.

use alloy_primitives::{Address, B256, U256};
use flowgraph_sdk::{ids, ordering, FlowRate, SdkError, Timestamp};
use serde::{Deserialize, Serialize};

/// Kind-specific event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EventKind {
    /// A stream was created, its rate changed, or it was deleted.
    FlowUpdated {
        /// Token being streamed.
        token: Address,
        /// Stream sender.
        sender: Address,
        /// Stream receiver.
        receiver: Address,
        /// New flow rate; zero deletes the stream.
        flow_rate: FlowRate,
    },

    /// Flow-control permissions were granted or revoked.
    FlowOperatorUpdated {
        /// Token the grant applies to.
        token: Address,
        /// The delegating sender.
        sender: Address,
        /// The operator receiving permissions.
        flow_operator: Address,
        /// Permission bitmask.
        permissions: u8,
        /// Remaining flow-rate allowance.
        flow_rate_allowance: FlowRate,
    },

    /// A distribution index was created.
    IndexCreated {
        /// Token being distributed.
        token: Address,
        /// Publishing account.
        publisher: Address,
        /// Publisher-chosen index discriminator.
        index_id: u32,
    },

    /// A distribution index's value or unit totals changed.
    IndexUpdated {
        /// Token being distributed.
        token: Address,
        /// Publishing account.
        publisher: Address,
        /// Publisher-chosen index discriminator.
        index_id: u32,
        /// Index value after the update.
        new_index_value: U256,
        /// Units held by unapproved subscribers after the update.
        total_units_pending: U256,
        /// Units held by approved subscribers after the update.
        total_units_approved: U256,
    },

    /// A subscriber approved an index.
    SubscriptionApproved {
        /// Token being distributed.
        token: Address,
        /// Subscribing account.
        subscriber: Address,
        /// Publishing account.
        publisher: Address,
        /// Publisher-chosen index discriminator.
        index_id: u32,
    },

    /// A subscriber's units were set.
    SubscriptionUnitsUpdated {
        /// Token being distributed.
        token: Address,
        /// Subscribing account.
        subscriber: Address,
        /// Publishing account.
        publisher: Address,
        /// Publisher-chosen index discriminator.
        index_id: u32,
        /// Units after the update.
        units: U256,
    },
}

impl EventKind {
    /// Returns the event name used in audit-record identities.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FlowUpdated { .. } => "FlowUpdated",
            Self::FlowOperatorUpdated { .. } => "FlowOperatorUpdated",
            Self::IndexCreated { .. } => "IndexCreated",
            Self::IndexUpdated { .. } => "IndexUpdated",
            Self::SubscriptionApproved { .. } => "SubscriptionApproved",
            Self::SubscriptionUnitsUpdated { .. } => "SubscriptionUnitsUpdated",
        }
    }

    /// Returns the token address every event kind carries.
    #[must_use]
    pub const fn token(&self) -> Address {
        match self {
            Self::FlowUpdated { token, .. }
            | Self::FlowOperatorUpdated { token, .. }
            | Self::IndexCreated { token, .. }
            | Self::IndexUpdated { token, .. }
            | Self::SubscriptionApproved { token, .. }
            | Self::SubscriptionUnitsUpdated { token, .. } => *token,
        }
    }
}

/// A decoded event with its chain coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Kind-specific payload.
    pub kind: EventKind,

    /// Transaction hash the event was emitted in.
    pub tx_hash: B256,

    /// Block number of the event.
    pub block_number: u64,

    /// Log index within the block.
    pub log_index: u64,

    /// Block timestamp.
    pub timestamp: Timestamp,
}

impl Event {
    /// Returns the audit-record identity for this event.
    #[must_use]
    pub fn id(&self) -> String {
        ids::event_id(self.kind.name(), self.tx_hash, self.log_index)
    }

    /// Derives the total-order key for this event.
    ///
    /// # Errors
    ///
    /// Returns the ordering error for out-of-bound log indexes.
    pub fn order_key(&self) -> Result<u64, SdkError> {
        ordering::order_key(self.block_number, self.log_index)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::b256;

    use super::*;

    fn flow_event() -> Event {
        Event {
            kind: EventKind::FlowUpdated {
                token: Address::repeat_byte(3),
                sender: Address::repeat_byte(1),
                receiver: Address::repeat_byte(2),
                flow_rate: FlowRate::new(10),
            },
            tx_hash: b256!("3333333333333333333333333333333333333333333333333333333333333333"),
            block_number: 100,
            log_index: 7,
            timestamp: Timestamp::new(1_700_000_000),
        }
    }

    #[test]
    fn test_event_kind_names() {
        let event = flow_event();
        assert_eq!(event.kind.name(), "FlowUpdated");

        let kind = EventKind::SubscriptionUnitsUpdated {
            token: Address::ZERO,
            subscriber: Address::ZERO,
            publisher: Address::ZERO,
            index_id: 0,
            units: U256::ZERO,
        };
        assert_eq!(kind.name(), "SubscriptionUnitsUpdated");
    }

    #[test]
    fn test_event_kind_token() {
        let event = flow_event();
        assert_eq!(event.kind.token(), Address::repeat_byte(3));
    }

    #[test]
    fn test_event_id_shape() {
        let event = flow_event();
        assert_eq!(event.id(), ids::event_id("FlowUpdated", event.tx_hash, 7));
    }

    #[test]
    fn test_event_order_key() {
        let event = flow_event();
        assert_eq!(event.order_key(), Ok(1_000_007));
    }

    #[test]
    fn test_event_order_key_out_of_bound() {
        let mut event = flow_event();
        event.log_index = 10_000;
        assert!(event.order_key().is_err());
    }

    #[test]
    fn test_event_serde_round_trip() {
        let event = flow_event();
        let json = serde_json::to_string(&event).expect("serialize");
        assert!(json.contains("flowUpdated"));
        assert!(json.contains("blockNumber"));

        let parsed: Event = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, event);
    }
}
