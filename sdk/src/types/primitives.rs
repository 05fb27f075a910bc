//! Primitive types for the Flowgraph SDK.
//!
//! Provides type-safe wrappers for flow rates and block timestamps.

use std::fmt;
use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::error::SdkError;

/// The largest flow rate the protocol can represent.
///
/// On-chain flow rates are 96-bit signed integers, so the magnitude bound is
/// `2^95 - 1` token units per second in either direction.
pub const MAX_FLOW_RATE: FlowRate = FlowRate::new((1i128 << 95) - 1);

/// A flow rate in token units per second.
///
/// Positive rates are inflows, negative rates are outflows. Values are in the
/// token's smallest unit; no rounding is ever applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlowRate(i128);

impl FlowRate {
    /// Creates a new flow rate.
    #[must_use]
    pub const fn new(value: i128) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(&self) -> i128 {
        self.0
    }

    /// Returns the zero rate.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Returns true if the rate is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if the rate magnitude is representable on-chain.
    #[must_use]
    pub const fn is_within_bound(&self) -> bool {
        self.0.unsigned_abs() <= MAX_FLOW_RATE.0.unsigned_abs()
    }

    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::Overflow` if the result overflows.
    pub fn checked_add(self, other: Self) -> Result<Self, SdkError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(SdkError::Overflow)
    }

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::Underflow` if the result underflows.
    pub fn checked_sub(self, other: Self) -> Result<Self, SdkError> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(SdkError::Underflow)
    }

    /// Saturating addition.
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction.
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Default for FlowRate {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for FlowRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i128> for FlowRate {
    fn from(value: i128) -> Self {
        Self(value)
    }
}

impl From<i64> for FlowRate {
    fn from(value: i64) -> Self {
        Self(i128::from(value))
    }
}

impl From<FlowRate> for i128 {
    fn from(rate: FlowRate) -> Self {
        rate.0
    }
}

impl Add for FlowRate {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Sub for FlowRate {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Neg for FlowRate {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

/// A block timestamp in unix seconds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a new timestamp.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Returns the epoch timestamp.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Returns the seconds elapsed since an earlier timestamp.
    ///
    /// Saturates to zero if `earlier` is in the future.
    #[must_use]
    pub const fn seconds_since(&self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Saturating addition of a number of seconds.
    #[must_use]
    pub const fn saturating_add_secs(self, seconds: u64) -> Self {
        Self(self.0.saturating_add(seconds))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Timestamp {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Timestamp> for u64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_rate_new() {
        let rate = FlowRate::new(500);
        assert_eq!(rate.value(), 500);
    }

    #[test]
    fn test_flow_rate_zero() {
        let rate = FlowRate::zero();
        assert!(rate.is_zero());
        assert_eq!(rate.value(), 0);
    }

    #[test]
    fn test_flow_rate_negative() {
        let rate = FlowRate::new(-42);
        assert!(!rate.is_zero());
        assert_eq!(rate.value(), -42);
    }

    #[test]
    fn test_flow_rate_max_bound() {
        assert_eq!(MAX_FLOW_RATE.value(), (1i128 << 95) - 1);
        assert!(MAX_FLOW_RATE.is_within_bound());
        assert!(FlowRate::new(-MAX_FLOW_RATE.value()).is_within_bound());
        assert!(!FlowRate::new(1i128 << 95).is_within_bound());
    }

    #[test]
    fn test_flow_rate_checked_add() {
        let a = FlowRate::new(100);
        let b = FlowRate::new(-30);
        assert_eq!(a.checked_add(b).map(|r| r.value()), Ok(70));
    }

    #[test]
    fn test_flow_rate_checked_add_overflow() {
        let a = FlowRate::new(i128::MAX);
        let b = FlowRate::new(1);
        assert!(a.checked_add(b).is_err());
    }

    #[test]
    fn test_flow_rate_checked_sub_underflow() {
        let a = FlowRate::new(i128::MIN);
        let b = FlowRate::new(1);
        assert!(a.checked_sub(b).is_err());
    }

    #[test]
    fn test_flow_rate_saturating_ops() {
        let a = FlowRate::new(i128::MAX);
        assert_eq!(a.saturating_add(FlowRate::new(1)).value(), i128::MAX);

        let b = FlowRate::new(i128::MIN);
        assert_eq!(b.saturating_sub(FlowRate::new(1)).value(), i128::MIN);
    }

    #[test]
    fn test_flow_rate_arithmetic() {
        let a = FlowRate::new(100);
        let b = FlowRate::new(40);

        assert_eq!((a + b).value(), 140);
        assert_eq!((a - b).value(), 60);
        assert_eq!((-a).value(), -100);
    }

    #[test]
    fn test_flow_rate_display() {
        assert_eq!(FlowRate::new(-5).to_string(), "-5");
    }

    #[test]
    fn test_flow_rate_serde() {
        let rate = FlowRate::new(1000);
        let json = serde_json::to_string(&rate).expect("serialize");
        assert_eq!(json, "1000");

        let parsed: FlowRate = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, rate);
    }

    #[test]
    fn test_timestamp_new() {
        let ts = Timestamp::new(1_700_000_000);
        assert_eq!(ts.value(), 1_700_000_000);
    }

    #[test]
    fn test_timestamp_seconds_since() {
        let earlier = Timestamp::new(100);
        let later = Timestamp::new(130);

        assert_eq!(later.seconds_since(earlier), 30);
        assert_eq!(earlier.seconds_since(later), 0);
        assert_eq!(later.seconds_since(later), 0);
    }

    #[test]
    fn test_timestamp_saturating_add() {
        let ts = Timestamp::new(u64::MAX);
        assert_eq!(ts.saturating_add_secs(10).value(), u64::MAX);
    }

    #[test]
    fn test_timestamp_ordering() {
        assert!(Timestamp::new(100) < Timestamp::new(200));
    }

    #[test]
    fn test_timestamp_serde() {
        let ts = Timestamp::new(123);
        let json = serde_json::to_string(&ts).expect("serialize");
        assert_eq!(json, "123");

        let parsed: Timestamp = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, ts);
    }
}
