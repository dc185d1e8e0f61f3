use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

use crate::Currency;

/// Signed money amount represented as an **integer count of minor units**.
///
/// Use this type for **all** monetary values in the engine (expense amounts,
/// balances, settlement transfers) to avoid floating-point drift. Splitting an
/// expense allocates whole minor units, so a group's credits and debits always
/// cancel exactly.
///
/// The value is signed:
/// - positive = the group owes the participant (creditor)
/// - negative = the participant owes the group (debtor)
///
/// # Examples
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.minor(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// assert_eq!(amount.format(Currency::Eur), "12.34€");
/// ```
///
/// Dividing without losing a unit (the first shares absorb the remainder):
///
/// ```rust
/// use engine::Money;
///
/// let shares = Money::new(100).split_even(3);
/// assert_eq!(shares, vec![Money::new(34), Money::new(33), Money::new(33)]);
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from an integer count of minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Absolute value.
    #[must_use]
    pub const fn abs(self) -> Money {
        Money(self.0.abs())
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Splits the amount into `n` shares that sum back to it exactly.
    ///
    /// Every share gets the floored quotient; the remainder is handed out one
    /// minor unit at a time starting from the first share. Deterministic in
    /// the order of recipients. `n == 0` yields no shares.
    #[must_use]
    pub fn split_even(self, n: usize) -> Vec<Money> {
        if n == 0 {
            return Vec::new();
        }
        let n_i64 = n as i64;
        let base = self.0.div_euclid(n_i64);
        let remainder = self.0.rem_euclid(n_i64);
        (0..n_i64)
            .map(|i| {
                if i < remainder {
                    Money(base + 1)
                } else {
                    Money(base)
                }
            })
            .collect()
    }

    /// Truncating percentage of the amount (e.g. `percent(25)` of `1.00` is `0.25`).
    ///
    /// Intermediate math runs in `i128`, so it cannot overflow for any `i64`
    /// amount. Callers that allocate a full amount across percent shares must
    /// spread the truncation remainder themselves.
    #[must_use]
    pub fn percent(self, pct: u32) -> Money {
        let scaled = i128::from(self.0) * i128::from(pct) / 100;
        Money(scaled as i64)
    }

    /// Renders the amount with its currency symbol and fraction digits.
    ///
    /// EUR keeps the trailing-symbol convention (`12.34€`), CHF is spaced in
    /// front (`CHF 12.34`), everything else prefixes directly (`$12.34`,
    /// `¥1234`).
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let digits = u32::from(currency.minor_units());
        let scale = 10u64.pow(digits);
        let major = abs / scale;
        let minor = abs % scale;
        let number = if digits == 0 {
            format!("{major}")
        } else {
            format!("{major}.{minor:0width$}", width = digits as usize)
        };
        match currency {
            Currency::Eur => format!("{sign}{number}{}", currency.symbol()),
            Currency::Chf => format!("{sign}{} {number}", currency.symbol()),
            Currency::Usd | Currency::Gbp | Currency::Jpy => {
                format!("{sign}{}{number}", currency.symbol())
            }
        }
    }
}

impl fmt::Display for Money {
    /// Plain decimal rendering with two fraction digits and no symbol.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let major = abs / 100;
        let minor = abs % 100;
        write!(f, "{sign}{major}.{minor:02}")
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}
