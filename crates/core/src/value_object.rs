//! Money: compared by value, never by identity.

use core::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Signed amount in the smallest currency unit (e.g. øre/cents).
///
/// Observable setters rely on value equality: assigning an equal amount is a no-op and
/// raises no change notification.
///
/// Balances may be negative; posting amounts are validated to be non-negative by the
/// posting input rules.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor_units: i64) -> Self {
        Self(minor_units)
    }

    /// Whole units plus hundredths, e.g. `Money::new(500, 0)` is 500.00.
    pub const fn new(units: i64, hundredths: i64) -> Self {
        Self(units * 100 + hundredths)
    }

    pub const fn minor_units(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(Money::new(500, 0).to_string(), "500.00");
        assert_eq!(Money::from_minor(-5).to_string(), "-0.05");
    }

    proptest! {
        #[test]
        fn addition_and_subtraction_cancel(a in -1_000_000_000i64..1_000_000_000, b in -1_000_000_000i64..1_000_000_000) {
            let (a, b) = (Money::from_minor(a), Money::from_minor(b));
            prop_assert_eq!(a + b - b, a);
        }
    }
}
