//! Chain capability traits.
//!
//! On-chain lookups are external collaborators and best-effort: a call either
//! returns a value or reverts. [`CallResult`] makes both outcomes explicit at
//! every call site; nothing in the pipeline treats a revert as an error.

pub mod mock;

pub use mock::{MockResolverRpc, MockToken, MockTokenRpc};

use alloy_primitives::{Address, U256};

/// Outcome of a contract call that may revert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallResult<T> {
    /// The call returned a value.
    Value(T),
    /// The call reverted.
    Reverted,
}

impl<T> CallResult<T> {
    /// Returns the value, or the documented default when the call reverted.
    #[must_use]
    pub fn value_or(self, default: T) -> T {
        match self {
            Self::Value(value) => value,
            Self::Reverted => default,
        }
    }

    /// Converts to an `Option`, discarding the revert distinction.
    #[must_use]
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Reverted => None,
        }
    }

    /// Returns true if the call reverted.
    #[must_use]
    pub const fn is_reverted(&self) -> bool {
        matches!(self, Self::Reverted)
    }

    /// Maps the value, preserving a revert.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CallResult<U> {
        match self {
            Self::Value(value) => CallResult::Value(f(value)),
            Self::Reverted => CallResult::Reverted,
        }
    }
}

impl<T> From<Option<T>> for CallResult<T> {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Self::Value(value),
            None => Self::Reverted,
        }
    }
}

/// Read capabilities against a token contract.
///
/// Calls are blocking and synchronous; retries and backoff belong to the
/// ingestion collaborator, not here.
pub trait TokenRpc {
    /// Address of the wrapped underlying token.
    fn underlying_token(&self, token: Address) -> CallResult<Address>;

    /// Token name.
    fn name(&self, token: Address) -> CallResult<String>;

    /// Token symbol.
    fn symbol(&self, token: Address) -> CallResult<String>;

    /// Token decimals.
    fn decimals(&self, token: Address) -> CallResult<u8>;

    /// Protocol host the token is bound to.
    fn host(&self, token: Address) -> CallResult<Address>;

    /// Total token supply.
    fn total_supply(&self, token: Address) -> CallResult<U256>;
}

/// Read capability against the resolver registry.
pub trait ResolverRpc {
    /// Looks up the address registered under a key such as
    /// `supertokens.v1.DAIx`.
    fn get(&self, key: &str) -> CallResult<Address>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_result_value_or() {
        assert_eq!(CallResult::Value(7).value_or(0), 7);
        assert_eq!(CallResult::<u8>::Reverted.value_or(0), 0);
    }

    #[test]
    fn test_call_result_ok() {
        assert_eq!(CallResult::Value("a").ok(), Some("a"));
        assert_eq!(CallResult::<&str>::Reverted.ok(), None);
    }

    #[test]
    fn test_call_result_is_reverted() {
        assert!(CallResult::<u8>::Reverted.is_reverted());
        assert!(!CallResult::Value(1u8).is_reverted());
    }

    #[test]
    fn test_call_result_map() {
        assert_eq!(CallResult::Value(2).map(|v| v * 3), CallResult::Value(6));
        assert_eq!(
            CallResult::<u8>::Reverted.map(|v| v * 3),
            CallResult::Reverted
        );
    }

    #[test]
    fn test_call_result_from_option() {
        assert_eq!(CallResult::from(Some(1u8)), CallResult::Value(1));
        assert_eq!(CallResult::<u8>::from(None), CallResult::Reverted);
    }
}
