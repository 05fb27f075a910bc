//! Continuous-flow accrual.
//!
//! The settlement primitive for every balance and statistic update between
//! two discrete events: the amount moved by a constant-rate flow over an
//! interval is a single integer multiplication, never a poll of continuous
//! state.

use alloy_primitives::{I256, U256};

use crate::types::{FlowRate, Timestamp};

/// Amount transferred by a constant flow between two timestamps.
///
/// `(current_time - last_updated_time) * flow_rate`, in the token's smallest
/// unit with no rounding. The flow rate may be negative (net outflow).
/// Callers must pass `current_time >= last_updated_time`; a negative result
/// signals a caller bug upstream, not a recoverable condition.
///
/// The product is computed in 256-bit signed arithmetic, so it cannot
/// overflow for any representable rate and interval.
#[must_use]
pub fn amount_flowed(
    current_time: Timestamp,
    last_updated_time: Timestamp,
    flow_rate: FlowRate,
) -> I256 {
    let delta = (current_time.value() as i128) - (last_updated_time.value() as i128);
    widen(delta) * widen(flow_rate.value())
}

/// Widens an i128 into 256-bit signed via sign and magnitude.
fn widen(value: i128) -> I256 {
    let magnitude = I256::from_raw(U256::from(value.unsigned_abs()));
    if value < 0 {
        -magnitude
    } else {
        magnitude
    }
}
