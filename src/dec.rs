//! Fixed-point decimal with 18 fractional digits over an arbitrary-precision integer
//!
//! Every value is stored as `i · 10^-18`. Multiplication and division round half-to-even
//! at the last digit, and any result whose scaled integer needs more than [`MAX_BIT_LEN`]
//! bits is rejected with [`BondError::NumericOverflow`] instead of growing without bound.

use crate::error::{BondError, Result};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

/// Number of fractional digits carried by every [`Dec`]
pub const PRECISION: usize = 18;

/// Largest bit length allowed for the scaled integer (255 integer bits + 60 precision bits)
pub const MAX_BIT_LEN: u64 = 315;

const SCALE: u64 = 1_000_000_000_000_000_000;
const HALF_PRECISION_SCALE: u64 = 1_000_000_000;

/// Integer token amount (coin amounts, supply, order limits)
pub type Amount = u128;

fn scale() -> BigInt {
    BigInt::from(SCALE)
}

/// Divide by 10^18, rounding half-to-even.
fn chop_precision_and_round(d: &BigInt) -> BigInt {
    if d.is_negative() {
        return -chop_precision_and_round(&-d);
    }
    let (quo, rem) = d.div_rem(&scale());
    if rem.is_zero() {
        return quo;
    }
    match (rem * 2u8).cmp(&scale()) {
        Ordering::Less => quo,
        Ordering::Greater => quo + 1u8,
        Ordering::Equal if quo.is_even() => quo,
        Ordering::Equal => quo + 1u8,
    }
}

/// Signed 18-digit fixed-point decimal
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dec(BigInt);

impl Dec {
    fn bounded(i: BigInt) -> Result<Dec> {
        if i.bits() > MAX_BIT_LEN {
            return Err(BondError::NumericOverflow);
        }
        Ok(Dec(i))
    }

    /// Zero
    pub fn zero() -> Dec {
        Dec(BigInt::zero())
    }

    /// One
    pub fn one() -> Dec {
        Dec(scale())
    }

    /// Whole-number decimal
    pub fn from_int(i: impl Into<BigInt>) -> Dec {
        Dec(i.into() * scale())
    }

    /// Whether the value is exactly zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Whether the value is strictly below zero
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Whether the value is strictly above zero
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    /// Whether the value has no fractional part
    pub fn is_integer(&self) -> bool {
        (&self.0 % scale()).is_zero()
    }

    /// Product, rounded half-to-even
    pub fn mul(&self, other: &Dec) -> Result<Dec> {
        Self::bounded(chop_precision_and_round(&(&self.0 * &other.0)))
    }

    /// Quotient, rounded half-to-even
    pub fn quo(&self, other: &Dec) -> Result<Dec> {
        if other.is_zero() {
            return Err(BondError::DivisionByZero);
        }
        let widened = &self.0 * scale() * scale();
        Self::bounded(chop_precision_and_round(&(widened / &other.0)))
    }

    /// `self^power` by square-and-multiply, rounding at every step
    pub fn power(&self, power: u64) -> Result<Dec> {
        if power == 0 {
            return Ok(Dec::one());
        }
        let mut base = self.clone();
        let mut acc = Dec::one();
        let mut i = power;
        while i > 1 {
            if i % 2 == 1 {
                acc = acc.mul(&base)?;
            }
            i /= 2;
            base = base.mul(&base)?;
        }
        base.mul(&acc)
    }

    /// Square root truncated to nine fractional digits
    pub fn sqrt(&self) -> Result<Dec> {
        if self.is_negative() {
            return Err(BondError::InvalidFunctionParams(format!(
                "square root of negative value {self}"
            )));
        }
        Self::bounded(self.0.sqrt() * BigInt::from(HALF_PRECISION_SCALE))
    }

    /// Smallest whole number not below `self`
    pub fn ceil(&self) -> Dec {
        Dec(self.0.div_ceil(&scale()) * scale())
    }

    /// Largest whole number not above `self`
    pub fn floor(&self) -> Dec {
        Dec(self.0.div_floor(&scale()) * scale())
    }

    /// Integer part, truncated toward zero
    pub fn truncate_int(&self) -> BigInt {
        &self.0 / scale()
    }

    /// Truncated integer part as a token amount
    pub fn to_amount(&self) -> Result<Amount> {
        if self.is_negative() {
            return Err(BondError::NumericOverflow);
        }
        self.truncate_int().to_u128().ok_or(BondError::NumericOverflow)
    }

    /// Lossy conversion for display and charts
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN) / SCALE as f64
    }
}

impl From<Amount> for Dec {
    fn from(amount: Amount) -> Dec {
        Dec::from_int(amount)
    }
}

impl Add for Dec {
    type Output = Dec;
    fn add(self, rhs: Dec) -> Dec {
        Dec(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Dec> for &'a Dec {
    type Output = Dec;
    fn add(self, rhs: &Dec) -> Dec {
        Dec(&self.0 + &rhs.0)
    }
}

impl Sub for Dec {
    type Output = Dec;
    fn sub(self, rhs: Dec) -> Dec {
        Dec(self.0 - rhs.0)
    }
}

impl<'a> Sub<&'a Dec> for &'a Dec {
    type Output = Dec;
    fn sub(self, rhs: &Dec) -> Dec {
        Dec(&self.0 - &rhs.0)
    }
}

impl Neg for Dec {
    type Output = Dec;
    fn neg(self) -> Dec {
        Dec(-self.0)
    }
}

impl FromStr for Dec {
    type Err = BondError;

    fn from_str(s: &str) -> Result<Dec> {
        let bad = || BondError::ParseDecimal(s.to_string());
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, frac) = match body.split_once('.') {
            Some((w, f)) => (w, f),
            None => (body, ""),
        };
        let digits_only = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !digits_only(whole) || !digits_only(frac) || frac.len() > PRECISION
        {
            return Err(bad());
        }
        if body.ends_with('.') {
            return Err(bad());
        }
        let padded = format!("{whole}{frac:0<width$}", width = PRECISION);
        let mut i = BigInt::from_str(&padded).map_err(|_| bad())?;
        if negative {
            i = -i;
        }
        Dec::bounded(i)
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (whole, frac) = self.0.abs().div_rem(&scale());
        if self.is_negative() {
            f.write_str("-")?;
        }
        write!(f, "{whole}")?;
        if !frac.is_zero() {
            let frac = format!("{frac:0>width$}", width = PRECISION);
            write!(f, ".{}", frac.trim_end_matches('0'))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dec({self})")
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Dec, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
