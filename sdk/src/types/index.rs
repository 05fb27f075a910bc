//! Distribution index entities.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::ids;

use super::primitives::Timestamp;

/// A distribution index published by an account for one token.
///
/// Identity = (publisher, token, index id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    /// Publishing account.
    pub publisher: Address,

    /// Token being distributed.
    pub token: Address,

    /// Publisher-chosen index discriminator.
    pub index_id: u32,

    /// Monotonic index value; grows with each distribution.
    pub index_value: U256,

    /// Units held by subscribers that have not approved the index.
    pub total_units_pending: U256,

    /// Units held by subscribers that have approved the index.
    pub total_units_approved: U256,

    /// Number of subscriptions that exist in the domain sense (strictly
    /// positive units).
    pub total_subscriptions_with_units: u64,

    /// Block timestamp when the index was created.
    pub created_at_timestamp: Timestamp,

    /// Chain-order key when the index was created.
    pub created_at_order: u64,

    /// Block timestamp of the last update.
    pub updated_at_timestamp: Timestamp,

    /// Chain-order key of the last update.
    pub updated_at_order: u64,
}

impl Index {
    /// Creates a fresh index at the given event coordinates.
    #[must_use]
    pub fn new(
        publisher: Address,
        token: Address,
        index_id: u32,
        timestamp: Timestamp,
        order: u64,
    ) -> Self {
        Self {
            publisher,
            token,
            index_id,
            index_value: U256::ZERO,
            total_units_pending: U256::ZERO,
            total_units_approved: U256::ZERO,
            total_subscriptions_with_units: 0,
            created_at_timestamp: timestamp,
            created_at_order: order,
            updated_at_timestamp: timestamp,
            updated_at_order: order,
        }
    }

    /// Returns the entity identity.
    #[must_use]
    pub fn id(&self) -> String {
        ids::index_id(self.publisher, self.token, self.index_id)
    }

    /// Returns the total units across pending and approved subscribers.
    #[must_use]
    pub fn total_units(&self) -> U256 {
        self.total_units_pending
            .saturating_add(self.total_units_approved)
    }
}

/// A subscription of one account to a distribution index.
///
/// The record persists once created; whether the subscription *exists* in the
/// domain sense is a separate question answered by [`Self::has_units`]. An
/// approved, zero-unit subscription is a record with no economic meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSubscription {
    /// Subscribing account.
    pub subscriber: Address,

    /// Publisher of the index subscribed to.
    pub publisher: Address,

    /// Token being distributed.
    pub token: Address,

    /// Publisher-chosen index discriminator.
    pub index_id: u32,

    /// Whether the subscriber approved the index.
    pub approved: bool,

    /// Units allocated to this subscriber.
    pub units: U256,

    /// Block timestamp of the last update.
    pub updated_at_timestamp: Timestamp,

    /// Chain-order key of the last update.
    pub updated_at_order: u64,
}

impl IndexSubscription {
    /// Creates a zero-unit, unapproved subscription record.
    #[must_use]
    pub fn new(
        subscriber: Address,
        publisher: Address,
        token: Address,
        index_id: u32,
        timestamp: Timestamp,
        order: u64,
    ) -> Self {
        Self {
            subscriber,
            publisher,
            token,
            index_id,
            approved: false,
            units: U256::ZERO,
            updated_at_timestamp: timestamp,
            updated_at_order: order,
        }
    }

    /// Returns the entity identity.
    #[must_use]
    pub fn id(&self) -> String {
        ids::subscription_id(self.subscriber, self.publisher, self.token, self.index_id)
    }

    /// Returns true if the subscription carries economic meaning.
    #[must_use]
    pub fn has_units(&self) -> bool {
        self.units > U256::ZERO
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    const PUBLISHER: Address = address!("00000000000000000000000000000000000000b2");
    const SUBSCRIBER: Address = address!("00000000000000000000000000000000000000a1");
    const TOKEN: Address = address!("00000000000000000000000000000000000000c3");

    #[test]
    fn test_index_new() {
        let index = Index::new(PUBLISHER, TOKEN, 1, Timestamp::new(100), 1_000_000);

        assert_eq!(index.index_value, U256::ZERO);
        assert_eq!(index.total_units(), U256::ZERO);
        assert_eq!(index.id(), ids::index_id(PUBLISHER, TOKEN, 1));
    }

    #[test]
    fn test_index_total_units() {
        let mut index = Index::new(PUBLISHER, TOKEN, 1, Timestamp::new(100), 0);
        index.total_units_pending = U256::from(30u64);
        index.total_units_approved = U256::from(12u64);

        assert_eq!(index.total_units(), U256::from(42u64));
    }

    #[test]
    fn test_subscription_new_has_no_units() {
        let sub = IndexSubscription::new(SUBSCRIBER, PUBLISHER, TOKEN, 1, Timestamp::new(100), 0);

        assert!(!sub.approved);
        assert!(!sub.has_units());
        assert_eq!(
            sub.id(),
            ids::subscription_id(SUBSCRIBER, PUBLISHER, TOKEN, 1)
        );
    }

    #[test]
    fn test_subscription_has_units() {
        let mut sub =
            IndexSubscription::new(SUBSCRIBER, PUBLISHER, TOKEN, 1, Timestamp::new(100), 0);

        sub.units = U256::from(1u64);
        assert!(sub.has_units());

        sub.units = U256::ZERO;
        assert!(!sub.has_units());
    }

    #[test]
    fn test_approved_zero_unit_subscription_has_no_units() {
        let mut sub =
            IndexSubscription::new(SUBSCRIBER, PUBLISHER, TOKEN, 1, Timestamp::new(100), 0);
        sub.approved = true;

        assert!(!sub.has_units());
    }

    #[test]
    fn test_index_serde_round_trip() {
        let index = Index::new(PUBLISHER, TOKEN, 9, Timestamp::new(5), 50_000);
        let json = serde_json::to_string(&index).expect("serialize");
        assert!(json.contains("totalUnitsApproved"));

        let parsed: Index = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, index);
    }
}
