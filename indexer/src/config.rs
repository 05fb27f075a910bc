//! Indexer configuration.
//!
//! Deployment-specific addresses are constructed once at startup and passed
//! to the processor; protocol constants live in `flowgraph-sdk`.

use std::str::FromStr;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Configuration for the indexer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// Expected protocol host address (hex encoded).
    ///
    /// Events for tokens bound to any other host are dropped.
    pub host_address: String,

    /// Resolver registry address (hex encoded).
    ///
    /// Decides the listing namespace during token enrichment.
    pub resolver_address: String,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        let zero = "0x0000000000000000000000000000000000000000";
        Self {
            host_address: zero.to_string(),
            resolver_address: zero.to_string(),
        }
    }
}

impl IndexerConfig {
    /// Creates a configuration with the given addresses.
    #[must_use]
    pub fn new(host_address: &str, resolver_address: &str) -> Self {
        Self {
            host_address: host_address.to_string(),
            resolver_address: resolver_address.to_string(),
        }
    }

    /// Sets the host address.
    #[must_use]
    pub fn with_host_address(mut self, host_address: &str) -> Self {
        self.host_address = host_address.to_string();
        self
    }

    /// Sets the resolver address.
    #[must_use]
    pub fn with_resolver_address(mut self, resolver_address: &str) -> Self {
        self.resolver_address = resolver_address.to_string();
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any address does not parse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parse_host()?;
        self.parse_resolver()?;
        Ok(())
    }

    /// Parses the host address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidHostAddress` if it does not parse.
    pub fn parse_host(&self) -> Result<Address, ConfigError> {
        Address::from_str(&self.host_address)
            .map_err(|_| ConfigError::InvalidHostAddress(self.host_address.clone()))
    }

    /// Parses the resolver address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidResolverAddress` if it does not parse.
    pub fn parse_resolver(&self) -> Result<Address, ConfigError> {
        Address::from_str(&self.resolver_address)
            .map_err(|_| ConfigError::InvalidResolverAddress(self.resolver_address.clone()))
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Invalid host address.
    #[error("invalid host address: {0}")]
    InvalidHostAddress(String),

    /// Invalid resolver address.
    #[error("invalid resolver address: {0}")]
    InvalidResolverAddress(String),
}
