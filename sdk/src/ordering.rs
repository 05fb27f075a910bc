//! Chain-order keys for entities.
//!
//! Entities carry a sortable "as-of" marker distinct from wall-clock time.
//! The key folds (block number, log index) into a single integer that orders
//! events exactly as the canonical chain does.

use crate::error::SdkError;

/// Log-index slots reserved per block in the order key.
///
/// Assumed upper bound on the number of logs a single block can carry. The
/// value is part of the persisted encoding: changing it is a breaking schema
/// migration. [`order_key`] rejects log indexes at or above this bound
/// instead of silently colliding into the next block's range.
pub const ORDER_MULTIPLIER: u64 = 10_000;

/// Derives the total-order key for an event at (block number, log index).
///
/// For any two events within the log-index bound, the earlier event in
/// block-then-log order produces a strictly smaller key.
///
/// # Errors
///
/// Returns `SdkError::LogIndexOutOfRange` if `log_index >= ORDER_MULTIPLIER`,
/// and `SdkError::Overflow` if the block number is too large for the key to
/// fit in 64 bits.
pub fn order_key(block_number: u64, log_index: u64) -> Result<u64, SdkError> {
    if log_index >= ORDER_MULTIPLIER {
        return Err(SdkError::LogIndexOutOfRange(log_index));
    }

    block_number
        .checked_mul(ORDER_MULTIPLIER)
        .and_then(|base| base.checked_add(log_index))
        .ok_or(SdkError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_key_formula() {
        assert_eq!(order_key(0, 0), Ok(0));
        assert_eq!(order_key(1, 0), Ok(10_000));
        assert_eq!(order_key(15_537_393, 211), Ok(155_373_930_211));
    }

    #[test]
    fn test_order_key_matches_chain_order() {
        // Same block, later log.
        assert!(order_key(100, 1).expect("key") < order_key(100, 2).expect("key"));
        // Later block beats any in-bound log index of an earlier block.
        assert!(order_key(100, 9_999).expect("key") < order_key(101, 0).expect("key"));
    }

    #[test]
    fn test_order_key_rejects_out_of_range_log_index() {
        assert_eq!(
            order_key(100, ORDER_MULTIPLIER),
            Err(SdkError::LogIndexOutOfRange(ORDER_MULTIPLIER))
        );
        assert_eq!(
            order_key(100, ORDER_MULTIPLIER + 1),
            Err(SdkError::LogIndexOutOfRange(ORDER_MULTIPLIER + 1))
        );
    }

    #[test]
    fn test_order_key_accepts_max_in_bound_log_index() {
        assert_eq!(
            order_key(2, ORDER_MULTIPLIER - 1),
            Ok(2 * ORDER_MULTIPLIER + ORDER_MULTIPLIER - 1)
        );
    }

    #[test]
    fn test_order_key_overflow() {
        assert_eq!(order_key(u64::MAX, 0), Err(SdkError::Overflow));
    }

    #[test]
    fn test_order_multiplier_value() {
        // The encoding constant itself, asserted so a change is deliberate.
        assert_eq!(ORDER_MULTIPLIER, 10_000);
    }
}
