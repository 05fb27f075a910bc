//! Per-account aggregates.

use alloy_primitives::{Address, I256};
use serde::{Deserialize, Serialize};

use crate::ids;

use super::primitives::{FlowRate, Timestamp};

/// Aggregate of one account's position in one token.
///
/// Identity = (account, token). Updated on every balance-relevant event for
/// the pair; amounts are settled up to `updated_at_timestamp` with the
/// accrual primitive, never polled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTokenSnapshot {
    /// Account address.
    pub account: Address,

    /// Token address.
    pub token: Address,

    /// Sum of the flow rates of streams into this account.
    pub total_inflow_rate: FlowRate,

    /// Sum of the flow rates of streams out of this account.
    pub total_outflow_rate: FlowRate,

    /// Inflow minus outflow rate.
    pub total_net_flow_rate: FlowRate,

    /// Stream-settled balance delta accumulated up to `updated_at_timestamp`.
    pub balance_until_updated_at: I256,

    /// Total amount streamed out of this account, settled up to
    /// `updated_at_timestamp`.
    pub total_amount_streamed_until_updated_at: I256,

    /// Block timestamp of the last update.
    pub updated_at_timestamp: Timestamp,

    /// Chain-order key of the last update.
    pub updated_at_order: u64,
}

impl AccountTokenSnapshot {
    /// Creates a zeroed snapshot for an (account, token) pair.
    #[must_use]
    pub fn new(account: Address, token: Address) -> Self {
        Self {
            account,
            token,
            total_inflow_rate: FlowRate::zero(),
            total_outflow_rate: FlowRate::zero(),
            total_net_flow_rate: FlowRate::zero(),
            balance_until_updated_at: I256::ZERO,
            total_amount_streamed_until_updated_at: I256::ZERO,
            updated_at_timestamp: Timestamp::zero(),
            updated_at_order: 0,
        }
    }

    /// Returns the entity identity.
    #[must_use]
    pub fn id(&self) -> String {
        ids::account_token_snapshot_id(self.account, self.token)
    }

    /// Returns true while any stream touches this account.
    #[must_use]
    pub fn has_active_streams(&self) -> bool {
        !self.total_inflow_rate.is_zero() || !self.total_outflow_rate.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    const ACCOUNT: Address = address!("00000000000000000000000000000000000000a1");
    const TOKEN: Address = address!("00000000000000000000000000000000000000c3");

    #[test]
    fn test_snapshot_new() {
        let snapshot = AccountTokenSnapshot::new(ACCOUNT, TOKEN);

        assert!(snapshot.total_net_flow_rate.is_zero());
        assert_eq!(snapshot.balance_until_updated_at, I256::ZERO);
        assert!(!snapshot.has_active_streams());
        assert_eq!(
            snapshot.id(),
            ids::account_token_snapshot_id(ACCOUNT, TOKEN)
        );
    }

    #[test]
    fn test_snapshot_has_active_streams() {
        let mut snapshot = AccountTokenSnapshot::new(ACCOUNT, TOKEN);

        snapshot.total_inflow_rate = FlowRate::new(5);
        assert!(snapshot.has_active_streams());

        snapshot.total_inflow_rate = FlowRate::zero();
        snapshot.total_outflow_rate = FlowRate::new(5);
        assert!(snapshot.has_active_streams());
    }

    #[test]
    fn test_snapshot_serde_round_trip() {
        let mut snapshot = AccountTokenSnapshot::new(ACCOUNT, TOKEN);
        snapshot.total_net_flow_rate = FlowRate::new(-12);
        snapshot.balance_until_updated_at = I256::try_from(-360).expect("fits");

        let json = serde_json::to_string(&snapshot).expect("serialize");
        assert!(json.contains("totalNetFlowRate"));

        let parsed: AccountTokenSnapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, snapshot);
    }
}
