//! Currency amounts
//!
//! Amounts are held as hundredths in an `i64` so that sums stay exact. The
//! persisted document stores them as plain JSON numbers in whole units
//! (`30000`, or `12.5` when there is a fraction).

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::profile::SUPPORTED_CURRENCIES;

/// Largest accepted amount in whole units, either sign.
///
/// Parsing and deserialization reject anything beyond it. Sums of many
/// amounts saturate instead of overflowing.
pub const MAX_UNITS: i64 = 10_000_000_000_000;

const MAX_CENTS: i64 = MAX_UNITS * 100;

/// An amount in hundredths of the currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("Invalid amount: {0}")]
    InvalidFormat(String),

    #[error("Amount too large: {0}")]
    OutOfRange(String),
}

impl Money {
    /// ```
    /// use fintrack::models::Money;
    /// assert_eq!(Money::from_cents(1050).to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// ```
    /// use fintrack::models::Money;
    /// assert_eq!(Money::from_units(30000).cents(), 3_000_000);
    /// ```
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    const fn whole_part(&self) -> i64 {
        self.0 / 100
    }

    const fn fraction_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Parse user input such as `4000`, `-12.5`, `₹10.50`, `₹-10` or `$ 1,200`.
    ///
    /// One supported currency symbol may precede the number, with the minus
    /// sign on either side of it. `,`/`_` separators are ignored. Digits past
    /// the second decimal place are dropped. Amounts beyond [`MAX_UNITS`] are
    /// out of range.
    pub fn parse(input: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(input.trim().to_string());
        let too_large = || MoneyParseError::OutOfRange(input.trim().to_string());

        let (minus_before, rest) = strip_minus(input.trim());
        let rest = SUPPORTED_CURRENCIES
            .iter()
            .find_map(|symbol| rest.strip_prefix(*symbol))
            .map_or(rest, str::trim_start);
        let (minus_after, rest) = strip_minus(rest);
        if minus_before && minus_after {
            return Err(invalid());
        }
        let sign = if minus_before || minus_after { -1 } else { 1 };

        let digits: String = rest.chars().filter(|c| !matches!(c, ',' | '_')).collect();

        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if fraction.contains('.') {
            return Err(invalid());
        }

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| too_large())?
        };
        let hundredths: i64 = format!("{:0<2}", fraction)[..2]
            .parse()
            .map_err(|_| invalid())?;

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(hundredths))
            .filter(|c| *c <= MAX_CENTS)
            .map(|c| Self(sign * c))
            .ok_or_else(too_large)
    }

    /// `₹ 30,000`, `$ 12.50`; a blank symbol gives the bare amount
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if symbol.is_empty() {
            self.to_string()
        } else {
            format!("{} {}", symbol, self)
        }
    }
}

fn strip_minus(s: &str) -> (bool, &str) {
    match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        f.write_str(&group_thousands(&self.whole_part().abs().to_string()))?;
        match self.fraction_part() {
            0 => Ok(()),
            fraction => write!(f, ".{:02}", fraction),
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.fraction_part() {
            0 => serializer.serialize_i64(self.whole_part()),
            _ => serializer.serialize_f64(self.0 as f64 / 100.0),
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl<'de> Visitor<'de> for AmountVisitor {
            type Value = Money;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
                if v.checked_abs().is_some_and(|units| units <= MAX_UNITS) {
                    Ok(Money(v * 100))
                } else {
                    Err(E::custom("amount out of range"))
                }
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
                let v = i64::try_from(v).map_err(|_| E::custom("amount out of range"))?;
                self.visit_i64(v)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
                let hundredths = (v * 100.0).round();
                if hundredths.is_finite() && hundredths.abs() <= MAX_CENTS as f64 {
                    Ok(Money(hundredths as i64))
                } else {
                    Err(E::custom("amount out of range"))
                }
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |total, m| total + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
