//! Deterministic entity-identity derivation.
//!
//! Every entity identity is a pure function of normalized event fields:
//! canonical lowercase hex representations joined with a fixed `-` delimiter
//! in a fixed field order. Higher-level identities (stream, stream period)
//! are built by concatenating a lower-level identity with an additional
//! discriminator, never by independent derivation.
//!
//! The field order and delimiter are a versioned encoding: changing either is
//! a breaking schema migration, not a refactor.

use std::str::FromStr;

use alloy_primitives::{hex, Address, B256};

use crate::error::SdkError;

/// Canonical lowercase hex encoding of an address, `0x`-prefixed.
///
/// This is the single field encoding used by every identity below.
#[must_use]
pub fn address_hex(address: Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// Canonical lowercase hex encoding of a 32-byte hash, `0x`-prefixed.
#[must_use]
pub fn hash_hex(hash: B256) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Identity of the revision counter for a stream relationship.
///
/// Field order: sender, receiver, token.
#[must_use]
pub fn stream_revision_id(sender: Address, receiver: Address, token: Address) -> String {
    format!(
        "{}-{}-{}",
        address_hex(sender),
        address_hex(receiver),
        address_hex(token)
    )
}

/// Identity of one stream lifecycle.
///
/// Built from the revision identity plus the revision index, so distinct
/// revisions of the same relationship yield disjoint identities.
#[must_use]
pub fn stream_id(
    sender: Address,
    receiver: Address,
    token: Address,
    revision_index: u32,
) -> String {
    format!(
        "{}-{}",
        stream_revision_id(sender, receiver, token),
        revision_index
    )
}

/// Identity of one constant-rate period within a stream lifecycle.
#[must_use]
pub fn stream_period_id(stream_id: &str, period_revision_index: u32) -> String {
    format!("{}-{}", stream_id, period_revision_index)
}

/// Identity of a flow-operator permission grant.
///
/// Field order: operator, token, sender.
#[must_use]
pub fn flow_operator_id(flow_operator: Address, token: Address, sender: Address) -> String {
    format!(
        "{}-{}-{}",
        address_hex(flow_operator),
        address_hex(token),
        address_hex(sender)
    )
}

/// Identity of a subscription to a distribution index.
///
/// Field order: subscriber, publisher, token, index id.
#[must_use]
pub fn subscription_id(
    subscriber: Address,
    publisher: Address,
    token: Address,
    index_id: u32,
) -> String {
    format!(
        "{}-{}-{}-{}",
        address_hex(subscriber),
        address_hex(publisher),
        address_hex(token),
        index_id
    )
}

/// Identity of a distribution index.
///
/// Field order: publisher, token, index id.
#[must_use]
pub fn index_id(publisher: Address, token: Address, index_id: u32) -> String {
    format!(
        "{}-{}-{}",
        address_hex(publisher),
        address_hex(token),
        index_id
    )
}

/// Identity of the per-account, per-token aggregate.
#[must_use]
pub fn account_token_snapshot_id(account: Address, token: Address) -> String {
    format!("{}-{}", address_hex(account), address_hex(token))
}

/// Identity of an audit record for one processed event.
#[must_use]
pub fn event_id(event_name: &str, tx_hash: B256, log_index: u64) -> String {
    format!("{}-{}-{}", event_name, hash_hex(tx_hash), log_index)
}

/// Inverse of [`stream_id`]: recovers the (sender, receiver, token, revision)
/// tuple from a stream identity.
///
/// Addresses are fixed-width, so the `-` delimiter cannot collide with field
/// content and the split is unambiguous.
///
/// # Errors
///
/// Returns `SdkError::InvalidStreamId` if the identity does not have exactly
/// four fields or any field fails to parse.
pub fn split_stream_id(id: &str) -> Result<(Address, Address, Address, u32), SdkError> {
    let invalid = || SdkError::InvalidStreamId(id.to_string());

    let mut parts = id.split('-');
    let (Some(sender), Some(receiver), Some(token), Some(revision), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return Err(invalid());
    };

    let sender = Address::from_str(sender).map_err(|_| invalid())?;
    let receiver = Address::from_str(receiver).map_err(|_| invalid())?;
    let token = Address::from_str(token).map_err(|_| invalid())?;
    let revision = revision.parse::<u32>().map_err(|_| invalid())?;

    Ok((sender, receiver, token, revision))
}
