//! Fee configuration and arithmetic
//!
//! The exchange charges a single integer-percentage fee on the ask amount of
//! every fill, credited to the configured fee account. The fee is always
//! `floor(amount * percent / 100)` in base units (truncating division).

use crate::amount::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An integer fee percentage in [0, 100], fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeePercent(u8);

impl FeePercent {
    /// The zero fee
    pub const ZERO: FeePercent = FeePercent(0);

    /// Create a new FeePercent
    ///
    /// # Panics
    /// Panics if `percent` exceeds 100
    pub fn new(percent: u8) -> Self {
        assert!(percent <= 100, "FeePercent must be in [0, 100]");
        Self(percent)
    }

    /// Try to create a FeePercent, returning None if out of range
    pub fn try_new(percent: u8) -> Option<Self> {
        if percent <= 100 {
            Some(Self(percent))
        } else {
            None
        }
    }

    /// Get the raw percentage
    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Fee owed on `amount`: exact `floor(amount * percent / 100)`
    ///
    /// Splitting `amount = 100q + r` keeps the multiplication inside u128
    /// for the full input domain: `floor(amount * p / 100) = q*p + (r*p)/100`,
    /// and `q*p <= amount` since `p <= 100`. The result never exceeds
    /// `amount`.
    pub fn fee_on(&self, amount: Amount) -> Amount {
        let p = self.0 as u128;
        let a = amount.as_u128();
        let q = a / 100;
        let r = a % 100;
        Amount::new(q * p + (r * p) / 100)
    }
}

impl fmt::Display for FeePercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_bounds() {
        assert_eq!(FeePercent::new(0).as_u8(), 0);
        assert_eq!(FeePercent::new(100).as_u8(), 100);
    }

    #[test]
    #[should_panic(expected = "FeePercent must be in [0, 100]")]
    fn test_new_out_of_range_panics() {
        FeePercent::new(101);
    }

    #[test]
    fn test_try_new() {
        assert!(FeePercent::try_new(10).is_some());
        assert!(FeePercent::try_new(100).is_some());
        assert!(FeePercent::try_new(101).is_none());
    }

    #[test]
    fn test_fee_on_reference_value() {
        // 10% of 1 unit at 18 decimals is exactly 0.1 unit
        let fee = FeePercent::new(10).fee_on(Amount::new(1_000_000_000_000_000_000));
        assert_eq!(fee, Amount::new(100_000_000_000_000_000));
    }

    #[test]
    fn test_fee_truncates() {
        // floor(99 * 10 / 100) = 9
        assert_eq!(FeePercent::new(10).fee_on(Amount::new(99)), Amount::new(9));
        // floor(1 * 10 / 100) = 0
        assert_eq!(FeePercent::new(10).fee_on(Amount::new(1)), Amount::ZERO);
    }

    #[test]
    fn test_fee_extremes() {
        let max = Amount::new(u128::MAX);
        assert_eq!(FeePercent::ZERO.fee_on(max), Amount::ZERO);
        assert_eq!(FeePercent::new(100).fee_on(max), max);
    }

    #[test]
    fn test_display() {
        assert_eq!(FeePercent::new(10).to_string(), "10%");
    }

    proptest! {
        /// fee_on matches the widening reference computation exactly
        #[test]
        fn prop_fee_matches_reference(a in any::<u64>(), p in 0u8..=100) {
            let fee = FeePercent::new(p).fee_on(Amount::new(a as u128));
            let reference = (a as u128) * (p as u128) / 100;
            prop_assert_eq!(fee.as_u128(), reference);
        }

        /// fee never exceeds the amount it is charged on, for the full domain
        #[test]
        fn prop_fee_bounded_by_amount(a in any::<u128>(), p in 0u8..=100) {
            let amount = Amount::new(a);
            let fee = FeePercent::new(p).fee_on(amount);
            prop_assert!(fee <= amount);
        }

        /// complementary percentages partition the amount up to one unit of
        /// truncation: fee_p(a) + fee_{100-p}(a) is a or a-1, even where the
        /// direct a*p product would overflow u128
        #[test]
        fn prop_fee_complement_partition(a in (u128::MAX / 100)..=u128::MAX, p in 0u8..=100) {
            let amount = Amount::new(a);
            let fee = FeePercent::new(p).fee_on(amount);
            let complement = FeePercent::new(100 - p).fee_on(amount);
            let sum = fee.checked_add(complement).unwrap().as_u128();
            prop_assert!(sum == a || sum + 1 == a);
        }
    }
}
