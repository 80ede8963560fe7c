//! Rupiah amounts using decimal arithmetic.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// An amount of Indonesian rupiah.
///
/// Amounts are kept as exact decimals through all arithmetic; rounding to
/// whole rupiah happens only at display time, half-up ("Rp 1.234.567" with
/// id-ID thousands grouping).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Rupiah(Decimal);

impl Rupiah {
    /// Zero rupiah.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create an amount from a decimal value.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a whole-rupiah amount.
    #[must_use]
    pub fn from_int(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Reduce the amount by a percentage in `[0, 100)`.
    #[must_use]
    pub fn discounted_by(&self, percent: u8) -> Self {
        Self(self.0 * (Decimal::from(100 - i64::from(percent)) / Decimal::ONE_HUNDRED))
    }

    /// Round to whole rupiah, half away from zero.
    #[must_use]
    pub fn rounded(&self) -> i64 {
        self.0
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(i64::MAX)
    }
}

impl Add for Rupiah {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Rupiah {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Rupiah {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<u32> for Rupiah {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Mul<Decimal> for Rupiah {
    type Output = Self;

    fn mul(self, factor: Decimal) -> Self {
        Self(self.0 * factor)
    }
}

impl Sum for Rupiah {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Rupiah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded();
        let sign = if rounded < 0 { "-" } else { "" };
        write!(f, "{sign}Rp {}", group_thousands(rounded.unsigned_abs()))
    }
}

/// Group a number with id-ID thousands separators ("1234567" -> "1.234.567").
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Rupiah::from_int(0).to_string(), "Rp 0");
        assert_eq!(Rupiah::from_int(999).to_string(), "Rp 999");
        assert_eq!(Rupiah::from_int(15_000).to_string(), "Rp 15.000");
        assert_eq!(Rupiah::from_int(100_000).to_string(), "Rp 100.000");
        assert_eq!(Rupiah::from_int(1_234_567).to_string(), "Rp 1.234.567");
    }

    #[test]
    fn test_display_rounds_half_up() {
        assert_eq!(Rupiah::new(Decimal::new(14995, 1)).to_string(), "Rp 1.500");
        assert_eq!(Rupiah::new(Decimal::new(14994, 1)).to_string(), "Rp 1.499");
    }

    #[test]
    fn test_discounted_by() {
        let price = Rupiah::from_int(200_000);
        assert_eq!(price.discounted_by(25), Rupiah::from_int(150_000));
        assert_eq!(price.discounted_by(0), price);
    }

    #[test]
    fn test_arithmetic() {
        let a = Rupiah::from_int(100_000);
        let b = Rupiah::from_int(15_000);
        assert_eq!(a + b, Rupiah::from_int(115_000));
        assert_eq!(a - b, Rupiah::from_int(85_000));
        assert_eq!(b * 2, Rupiah::from_int(30_000));
        let total: Rupiah = [a, b, b].into_iter().sum();
        assert_eq!(total, Rupiah::from_int(130_000));
    }

    #[test]
    fn test_serde_transparent() {
        let price = Rupiah::from_int(15_000);
        let json = serde_json::to_string(&price).expect("serialize");
        let back: Rupiah = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, price);
    }
}
