//! Monetary amounts.

use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Non-negative amount in the smallest currency unit (cents).
///
/// Integer cents keep order totals exact: a total is always the plain sum of
/// its item prices. Persisted documents carry the decimal amount (`15.5`),
/// converted on the way in and out.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Convert a decimal amount (as typed by an operator) to cents.
    ///
    /// Rejects negative and non-finite input; rounds to the nearest cent.
    pub fn from_decimal(amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if amount < 0.0 {
            return Err(DomainError::validation("price cannot be negative"));
        }
        let cents = (amount * 100.0).round();
        if cents > u64::MAX as f64 {
            return Err(DomainError::validation("price is too large"));
        }
        Ok(Self(cents as u64))
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub fn as_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }
}

impl TryFrom<f64> for Money {
    type Error = DomainError;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        Money::from_decimal(amount)
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> f64 {
        money.as_decimal()
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn from_decimal_rounds_to_cents() {
        assert_eq!(Money::from_decimal(25.50).unwrap(), Money::from_cents(2550));
        assert_eq!(Money::from_decimal(0.1 + 0.2).unwrap(), Money::from_cents(30));
        assert_eq!(Money::from_decimal(0.0).unwrap(), Money::ZERO);
    }

    #[test]
    fn from_decimal_rejects_negative_and_nan() {
        assert!(Money::from_decimal(-0.01).unwrap_err().is_validation());
        assert!(Money::from_decimal(f64::NAN).unwrap_err().is_validation());
        assert!(Money::from_decimal(f64::INFINITY).unwrap_err().is_validation());
    }

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(Money::from_cents(3550).to_string(), "$35.50");
        assert_eq!(Money::from_cents(7).to_string(), "$0.07");
    }

    #[test]
    fn persists_as_decimal_amount() {
        assert_eq!(serde_json::to_string(&Money::from_cents(1550)).unwrap(), "15.5");
        assert_eq!(serde_json::to_string(&Money::from_cents(1500)).unwrap(), "15.0");

        let price: Money = serde_json::from_str("25.50").unwrap();
        assert_eq!(price, Money::from_cents(2550));
        let whole: Money = serde_json::from_str("15").unwrap();
        assert_eq!(whole, Money::from_cents(1500));
    }

    #[test]
    fn negative_persisted_amount_is_rejected() {
        assert!(serde_json::from_str::<Money>("-1.0").is_err());
    }

    #[test]
    fn sum_of_empty_is_zero() {
        let total: Money = Vec::<Money>::new().into_iter().sum();
        assert_eq!(total, Money::ZERO);
    }

    proptest! {
        #[test]
        fn sum_matches_cent_arithmetic(cents in prop::collection::vec(0u64..1_000_000u64, 0..20)) {
            let total: Money = cents.iter().copied().map(Money::from_cents).sum();
            prop_assert_eq!(total.cents(), cents.iter().sum::<u64>());
        }

        /// Property: every cent amount survives the decimal document format.
        #[test]
        fn decimal_format_preserves_cents(cents in 0u64..10_000_000_000u64) {
            let money = Money::from_cents(cents);
            let json = serde_json::to_string(&money).unwrap();
            prop_assert_eq!(serde_json::from_str::<Money>(&json).unwrap(), money);
        }
    }
}
