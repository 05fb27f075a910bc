//! In-memory chain capabilities for tests and local development.
//!
//! Unregistered tokens and keys revert on every call, matching how a node
//! responds for contracts that do not implement the queried interface.

use std::collections::HashMap;

use alloy_primitives::{Address, U256};

use super::{CallResult, ResolverRpc, TokenRpc};

/// Per-token contract state for [`MockTokenRpc`].
///
/// Each field is independently absent so individual calls can revert.
#[derive(Debug, Clone, Default)]
pub struct MockToken {
    /// Underlying token address; `None` reverts the call.
    pub underlying: Option<Address>,
    /// Token name; `None` reverts the call.
    pub name: Option<String>,
    /// Token symbol; `None` reverts the call.
    pub symbol: Option<String>,
    /// Token decimals; `None` reverts the call.
    pub decimals: Option<u8>,
    /// Host address; `None` reverts the call.
    pub host: Option<Address>,
    /// Total supply; `None` reverts the call.
    pub total_supply: Option<U256>,
}

impl MockToken {
    /// Creates a token whose every call reverts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fully populated token bound to a host.
    #[must_use]
    pub fn listed(name: &str, symbol: &str, host: Address) -> Self {
        Self {
            underlying: Some(Address::ZERO),
            name: Some(name.to_string()),
            symbol: Some(symbol.to_string()),
            decimals: Some(18),
            host: Some(host),
            total_supply: Some(U256::ZERO),
        }
    }

    /// Sets the underlying token address.
    #[must_use]
    pub fn with_underlying(mut self, underlying: Address) -> Self {
        self.underlying = Some(underlying);
        self
    }

    /// Sets the host address.
    #[must_use]
    pub fn with_host(mut self, host: Address) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the total supply.
    #[must_use]
    pub fn with_total_supply(mut self, total_supply: U256) -> Self {
        self.total_supply = Some(total_supply);
        self
    }
}

/// Configurable in-memory token contract capability.
#[derive(Debug, Clone, Default)]
pub struct MockTokenRpc {
    tokens: HashMap<Address, MockToken>,
}

impl MockTokenRpc {
    /// Creates a capability with no registered tokens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers contract state for a token address.
    pub fn register(&mut self, address: Address, token: MockToken) {
        self.tokens.insert(address, token);
    }

    /// Builder form of [`Self::register`].
    #[must_use]
    pub fn with_token(mut self, address: Address, token: MockToken) -> Self {
        self.register(address, token);
        self
    }
}

impl TokenRpc for MockTokenRpc {
    fn underlying_token(&self, token: Address) -> CallResult<Address> {
        self.tokens
            .get(&token)
            .and_then(|t| t.underlying)
            .into()
    }

    fn name(&self, token: Address) -> CallResult<String> {
        self.tokens.get(&token).and_then(|t| t.name.clone()).into()
    }

    fn symbol(&self, token: Address) -> CallResult<String> {
        self.tokens
            .get(&token)
            .and_then(|t| t.symbol.clone())
            .into()
    }

    fn decimals(&self, token: Address) -> CallResult<u8> {
        self.tokens.get(&token).and_then(|t| t.decimals).into()
    }

    fn host(&self, token: Address) -> CallResult<Address> {
        self.tokens.get(&token).and_then(|t| t.host).into()
    }

    fn total_supply(&self, token: Address) -> CallResult<U256> {
        self.tokens.get(&token).and_then(|t| t.total_supply).into()
    }
}

/// Configurable in-memory resolver registry capability.
#[derive(Debug, Clone, Default)]
pub struct MockResolverRpc {
    entries: HashMap<String, Address>,
}

impl MockResolverRpc {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an address under a key.
    pub fn register(&mut self, key: &str, address: Address) {
        self.entries.insert(key.to_string(), address);
    }

    /// Builder form of [`Self::register`].
    #[must_use]
    pub fn with_entry(mut self, key: &str, address: Address) -> Self {
        self.register(key, address);
        self
    }
}

impl ResolverRpc for MockResolverRpc {
    fn get(&self, key: &str) -> CallResult<Address> {
        self.entries.get(key).copied().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: Address = Address::repeat_byte(3);
    const HOST: Address = Address::repeat_byte(9);

    #[test]
    fn test_mock_token_rpc_unregistered_reverts() {
        let rpc = MockTokenRpc::new();

        assert!(rpc.underlying_token(TOKEN).is_reverted());
        assert!(rpc.name(TOKEN).is_reverted());
        assert!(rpc.symbol(TOKEN).is_reverted());
        assert!(rpc.decimals(TOKEN).is_reverted());
        assert!(rpc.host(TOKEN).is_reverted());
        assert!(rpc.total_supply(TOKEN).is_reverted());
    }

    #[test]
    fn test_mock_token_rpc_listed_token() {
        let rpc = MockTokenRpc::new().with_token(TOKEN, MockToken::listed("Flow DAI", "DAIx", HOST));

        assert_eq!(rpc.name(TOKEN), CallResult::Value("Flow DAI".to_string()));
        assert_eq!(rpc.symbol(TOKEN), CallResult::Value("DAIx".to_string()));
        assert_eq!(rpc.decimals(TOKEN), CallResult::Value(18));
        assert_eq!(rpc.host(TOKEN), CallResult::Value(HOST));
    }

    #[test]
    fn test_mock_token_rpc_partial_reverts() {
        let token = MockToken {
            symbol: Some("DAIx".to_string()),
            ..MockToken::new()
        };
        let rpc = MockTokenRpc::new().with_token(TOKEN, token);

        assert_eq!(rpc.symbol(TOKEN), CallResult::Value("DAIx".to_string()));
        assert!(rpc.name(TOKEN).is_reverted());
        assert!(rpc.decimals(TOKEN).is_reverted());
    }

    #[test]
    fn test_mock_resolver_rpc() {
        let resolver = MockResolverRpc::new().with_entry("supertokens.v1.DAIx", TOKEN);

        assert_eq!(
            resolver.get("supertokens.v1.DAIx"),
            CallResult::Value(TOKEN)
        );
        assert!(resolver.get("supertokens.v1.USDCx").is_reverted());
    }
}
