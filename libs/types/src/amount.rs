//! Unsigned base-unit quantities
//!
//! Amounts are opaque unsigned integers in an asset's smallest indivisible
//! unit, never floating point. Negative balances are unrepresentable by
//! construction; all arithmetic is checked so overflow surfaces as a typed
//! failure instead of wrapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A quantity of an asset in base units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u128);

impl Amount {
    /// The zero quantity
    pub const ZERO: Amount = Amount(0);

    /// Create from raw base units
    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Get the raw base-unit value
    pub fn as_u128(&self) -> u128 {
        self.0
    }

    /// Check for zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition; None on overflow
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Checked subtraction; None on underflow
    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero() {
        assert!(Amount::ZERO.is_zero());
        assert_eq!(Amount::ZERO.as_u128(), 0);
        assert!(!Amount::new(1).is_zero());
    }

    #[test]
    fn test_checked_add() {
        let a = Amount::new(10);
        let b = Amount::new(32);
        assert_eq!(a.checked_add(b), Some(Amount::new(42)));
        assert_eq!(Amount::new(u128::MAX).checked_add(Amount::new(1)), None);
    }

    #[test]
    fn test_checked_sub() {
        let a = Amount::new(10);
        assert_eq!(a.checked_sub(Amount::new(3)), Some(Amount::new(7)));
        assert_eq!(a.checked_sub(Amount::new(11)), None);
        assert_eq!(a.checked_sub(a), Some(Amount::ZERO));
    }

    #[test]
    fn test_ordering() {
        assert!(Amount::new(1) < Amount::new(2));
        assert!(Amount::new(2) <= Amount::new(2));
    }

    #[test]
    fn test_serialization() {
        let amount = Amount::new(1_000_000_000_000_000_000);
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "1000000000000000000");

        let deserialized: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(amount, deserialized);
    }

    proptest! {
        /// add then sub of the same amount is the identity when add succeeds
        #[test]
        fn prop_add_sub_round_trip(base in any::<u64>(), delta in any::<u64>()) {
            let base = Amount::new(base as u128);
            let delta = Amount::new(delta as u128);
            let sum = base.checked_add(delta).unwrap();
            prop_assert_eq!(sum.checked_sub(delta), Some(base));
        }

        /// subtraction never produces a value larger than the minuend
        #[test]
        fn prop_sub_never_grows(a in any::<u128>(), b in any::<u128>()) {
            let a = Amount::new(a);
            let b = Amount::new(b);
            if let Some(diff) = a.checked_sub(b) {
                prop_assert!(diff <= a);
            } else {
                prop_assert!(b > a);
            }
        }
    }
}
