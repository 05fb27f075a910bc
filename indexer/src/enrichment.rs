//! Best-effort token enrichment.
//!
//! Fills descriptive fields on a token from external contract state. Every
//! lookup may revert; a revert substitutes the documented default and never
//! aborts entity creation.

use alloy_primitives::{address, Address, U256};
use flowgraph_sdk::{ids, Token, TokenStatistic};

use crate::chain::{CallResult, ResolverRpc, TokenRpc};
use crate::store::{EntityStore, StoreError};

/// Resolver deployment that serves the `test` listing namespace.
///
/// Every other resolver serves `v1`. A deployment distinction, not logic.
pub const TEST_RESOLVER_ADDRESS: Address = address!("e7f1725e7734ce288f8367e1bb143e90bb3f0512");

/// Fills the token's descriptive fields from contract state.
///
/// Defaults on revert: zero underlying address, empty name and symbol, zero
/// decimals.
pub fn enrich_token(token: &mut Token, rpc: &dyn TokenRpc) {
    token.underlying_address = rpc.underlying_token(token.address).value_or(Address::ZERO);
    token.name = rpc.name(token.address).value_or(String::new());
    token.symbol = rpc.symbol(token.address).value_or(String::new());
    token.decimals = rpc.decimals(token.address).value_or(0);
}

/// Marks whether the resolver lists this address as the canonical token for
/// its symbol.
///
/// The lookup key is `supertokens.<namespace>.<symbol>`, where the namespace
/// is `test` for [`TEST_RESOLVER_ADDRESS`] and `v1` otherwise.
pub fn refresh_listing(token: &mut Token, resolver: &dyn ResolverRpc, resolver_address: Address) {
    let namespace = if resolver_address == TEST_RESOLVER_ADDRESS {
        "test"
    } else {
        "v1"
    };
    let key = format!("supertokens.{}.{}", namespace, token.symbol);
    let registered = resolver.get(&key).value_or(Address::ZERO);

    token.is_listed = registered == token.address;
}

/// One-shot total-supply fetch for native tokens.
///
/// Native tokens (zero underlying address) mint and burn outside transfer
/// events, so their supply is read from the contract once, while the stored
/// statistic is still zero, instead of being accumulated incrementally. A
/// reverted call leaves the statistic unchanged.
pub fn update_total_supply_for_native_token(
    token: &Token,
    stats: &mut TokenStatistic,
    rpc: &dyn TokenRpc,
) {
    if !token.is_native() || stats.total_supply != U256::ZERO {
        return;
    }

    if let CallResult::Value(total_supply) = rpc.total_supply(token.address) {
        stats.total_supply = total_supply;
    }
}

/// Decides whether events for a token may create entities.
///
/// A token with an existing record has already been accepted and passes
/// unconditionally. An unknown token passes only if its contract reports the
/// expected protocol host; a reverted host lookup fails it. Tokens bound to a
/// foreign host would otherwise pollute the data set.
///
/// # Errors
///
/// Propagates store failures.
pub fn token_has_valid_host<S: EntityStore + ?Sized>(
    store: &S,
    rpc: &dyn TokenRpc,
    host_address: Address,
    token_address: Address,
) -> Result<bool, StoreError> {
    let token_id = ids::address_hex(token_address);
    if store.get_token(&token_id)?.is_some() {
        return Ok(true);
    }

    match rpc.host(token_address) {
        CallResult::Value(host) => Ok(host == host_address),
        CallResult::Reverted => {
            tracing::error!(token = %token_id, "host lookup reverted");
            Ok(false)
        }
    }
}
