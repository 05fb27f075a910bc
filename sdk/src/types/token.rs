//! Token entities.
//!
//! Provides the token record and its protocol-wide aggregate.

use std::fmt;

use alloy_primitives::{Address, I256, U256};
use serde::{Deserialize, Serialize};

use crate::ids;

use super::primitives::{FlowRate, Timestamp};

/// A protocol token.
///
/// Created on first sight of the address in any event and never deleted.
/// Descriptive fields are filled by best-effort enrichment: a failed contract
/// lookup leaves the documented defaults (zero address, empty strings, zero
/// decimals) rather than failing the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Token contract address.
    pub address: Address,

    /// Address of the wrapped underlying token; zero for native tokens.
    pub underlying_address: Address,

    /// Token name; empty when the lookup reverted.
    pub name: String,

    /// Token symbol; empty when the lookup reverted.
    pub symbol: String,

    /// Token decimals; zero when the lookup reverted.
    pub decimals: u8,

    /// Whether the resolver lists this address as the canonical token for its
    /// symbol.
    pub is_listed: bool,

    /// Block timestamp of the first event referencing this token.
    pub created_at_timestamp: Timestamp,

    /// Chain-order key of the first event referencing this token.
    pub created_at_order: u64,
}

impl Token {
    /// Creates an unenriched token first seen at the given event coordinates.
    #[must_use]
    pub fn new(address: Address, created_at_timestamp: Timestamp, created_at_order: u64) -> Self {
        Self {
            address,
            underlying_address: Address::ZERO,
            name: String::new(),
            symbol: String::new(),
            decimals: 0,
            is_listed: false,
            created_at_timestamp,
            created_at_order,
        }
    }

    /// Returns the entity identity (canonical lowercase hex address).
    #[must_use]
    pub fn id(&self) -> String {
        ids::address_hex(self.address)
    }

    /// Returns true if this token wraps no underlying asset.
    #[must_use]
    pub fn is_native(&self) -> bool {
        self.underlying_address == Address::ZERO
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({} {})", self.symbol, self.id())
    }
}

/// Protocol-wide aggregate for one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenStatistic {
    /// Token contract address.
    pub token: Address,

    /// Total token supply. For native tokens this is fetched once from the
    /// contract when still zero, not accumulated incrementally.
    pub total_supply: U256,

    /// Sum of the flow rates of all active streams of this token.
    pub total_outflow_rate: FlowRate,

    /// Total amount streamed through this token, settled up to
    /// `updated_at_timestamp`.
    pub total_amount_streamed_until_updated_at: I256,

    /// Number of streams currently flowing.
    pub total_number_of_active_streams: u64,

    /// Number of stream lifecycles that have been closed.
    pub total_number_of_closed_streams: u64,

    /// Block timestamp of the last update.
    pub updated_at_timestamp: Timestamp,

    /// Chain-order key of the last update.
    pub updated_at_order: u64,
}

impl TokenStatistic {
    /// Creates a zeroed statistic for a token.
    #[must_use]
    pub fn new(token: Address) -> Self {
        Self {
            token,
            total_supply: U256::ZERO,
            total_outflow_rate: FlowRate::zero(),
            total_amount_streamed_until_updated_at: I256::ZERO,
            total_number_of_active_streams: 0,
            total_number_of_closed_streams: 0,
            updated_at_timestamp: Timestamp::zero(),
            updated_at_order: 0,
        }
    }

    /// Returns the entity identity (canonical lowercase hex token address).
    #[must_use]
    pub fn id(&self) -> String {
        ids::address_hex(self.token)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    const TOKEN: Address = address!("00000000000000000000000000000000000000c3");

    #[test]
    fn test_token_new_defaults() {
        let token = Token::new(TOKEN, Timestamp::new(100), 1_000_001);

        assert_eq!(token.underlying_address, Address::ZERO);
        assert_eq!(token.name, "");
        assert_eq!(token.symbol, "");
        assert_eq!(token.decimals, 0);
        assert!(!token.is_listed);
        assert_eq!(token.created_at_timestamp, Timestamp::new(100));
        assert_eq!(token.created_at_order, 1_000_001);
    }

    #[test]
    fn test_token_id_is_lowercase_hex() {
        let token = Token::new(TOKEN, Timestamp::zero(), 0);
        assert_eq!(token.id(), "0x00000000000000000000000000000000000000c3");
    }

    #[test]
    fn test_token_is_native() {
        let mut token = Token::new(TOKEN, Timestamp::zero(), 0);
        assert!(token.is_native());

        token.underlying_address = address!("00000000000000000000000000000000000000ee");
        assert!(!token.is_native());
    }

    #[test]
    fn test_token_statistic_new() {
        let stats = TokenStatistic::new(TOKEN);

        assert_eq!(stats.total_supply, U256::ZERO);
        assert!(stats.total_outflow_rate.is_zero());
        assert_eq!(stats.total_number_of_active_streams, 0);
        assert_eq!(stats.total_number_of_closed_streams, 0);
        assert_eq!(stats.id(), "0x00000000000000000000000000000000000000c3");
    }

    #[test]
    fn test_token_serde_camel_case() {
        let token = Token::new(TOKEN, Timestamp::new(5), 50_000);
        let json = serde_json::to_string(&token).expect("serialize");

        assert!(json.contains("underlyingAddress"));
        assert!(json.contains("isListed"));

        let parsed: Token = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, token);
    }
}
