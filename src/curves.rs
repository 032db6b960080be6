//! Bonding curve functions: per-unit price and area under the curve

use crate::dec::Dec;
use crate::error::{BondError, Result};
use crate::params::FunctionParams;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of curve shapes a bond can use
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionType {
    /// `m·x^n + c`
    #[serde(rename = "power_function")]
    Power,
    /// Logistic-shaped price bounded by `0..2a`
    #[serde(rename = "sigmoid_function")]
    Sigmoid,
    /// Constant-product exchange between two reserve tokens
    #[serde(rename = "swapper_function")]
    Swapper,
}

impl FunctionType {
    /// Canonical identifier
    pub fn name(&self) -> &'static str {
        match self {
            FunctionType::Power => "power_function",
            FunctionType::Sigmoid => "sigmoid_function",
            FunctionType::Swapper => "swapper_function",
        }
    }

    /// Coefficients the function is parameterised by
    pub fn param_names(&self) -> &'static [&'static str] {
        match self {
            FunctionType::Power => &["m", "n", "c"],
            FunctionType::Sigmoid => &["a", "b", "c"],
            FunctionType::Swapper => &[],
        }
    }

    pub(crate) fn not_available(&self) -> BondError {
        BondError::FunctionNotAvailable(self.name().to_string())
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FunctionType {
    type Err = BondError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "power_function" | "power" => Ok(FunctionType::Power),
            "sigmoid_function" | "sigmoid" => Ok(FunctionType::Sigmoid),
            "swapper_function" | "swapper" => Ok(FunctionType::Swapper),
            other => Err(BondError::InvalidBond(format!("unknown function type {other}"))),
        }
    }
}

/// A curve with its coefficients resolved
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Curve {
    /// `price(x) = m·x^n + c`
    Power {
        /// Coefficient
        m: Dec,
        /// Exponent
        n: u64,
        /// Constant offset
        c: Dec,
    },
    /// `price(x) = a·((x−b)/√((x−b)²+c) + 1)`
    Sigmoid {
        /// Half of the upper asymptote
        a: Dec,
        /// Midpoint supply
        b: Dec,
        /// Flatness; larger is less steep
        c: Dec,
    },
    /// No price or integral; priced from reserve ratios instead
    Swapper,
}

impl Curve {
    /// Resolves the coefficients `function_type` needs from `params`
    pub fn new(function_type: FunctionType, params: &FunctionParams) -> Result<Self> {
        Ok(match function_type {
            FunctionType::Power => {
                let n = params.get("n");
                if !n.is_integer() {
                    return Err(BondError::InvalidFunctionParams(format!(
                        "exponent n={n} is not a whole number"
                    )));
                }
                let n = n
                    .truncate_int()
                    .to_u64()
                    .ok_or_else(|| BondError::InvalidFunctionParams(format!("exponent n={n}")))?;
                Curve::Power { m: params.get("m").clone(), n, c: params.get("c").clone() }
            }
            FunctionType::Sigmoid => Curve::Sigmoid {
                a: params.get("a").clone(),
                b: params.get("b").clone(),
                c: params.get("c").clone(),
            },
            FunctionType::Swapper => Curve::Swapper,
        })
    }

    /// Shape of this curve
    pub fn function_type(&self) -> FunctionType {
        match self {
            Curve::Power { .. } => FunctionType::Power,
            Curve::Sigmoid { .. } => FunctionType::Sigmoid,
            Curve::Swapper => FunctionType::Swapper,
        }
    }

    /// Marginal price of one more unit at `supply`
    pub fn price(&self, supply: &Dec) -> Result<Dec> {
        match self {
            Curve::Power { m, n, c } => Ok(supply.power(*n)?.mul(m)? + c.clone()),
            Curve::Sigmoid { a, b, c } => {
                let shifted = supply - b;
                let root = (shifted.mul(&shifted)? + c.clone()).sqrt()?;
                a.mul(&(shifted.quo(&root)? + Dec::one()))
            }
            Curve::Swapper => Err(self.function_type().not_available()),
        }
    }

    /// Reserve value backing all supply from zero to `supply`
    pub fn integral(&self, supply: &Dec) -> Result<Dec> {
        match self {
            Curve::Power { m, n, c } => {
                let n_plus_1 = n.checked_add(1).ok_or(BondError::NumericOverflow)?;
                let area = supply
                    .power(n_plus_1)?
                    .mul(m)?
                    .quo(&Dec::from_int(n_plus_1))?;
                Ok(area + supply.mul(c)?)
            }
            Curve::Sigmoid { a, b, c } => {
                let shifted = supply - b;
                let root = (shifted.power(2)? + c.clone()).sqrt()?;
                let at_supply = a.mul(&(root + supply.clone()))?;
                let at_zero = a.mul(&(b.power(2)? + c.clone()).sqrt()?)?;
                Ok(at_supply - at_zero)
            }
            Curve::Swapper => Err(self.function_type().not_available()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn power() -> Curve {
        Curve::Power { m: Dec::from_int(12), n: 2, c: Dec::from_int(100) }
    }

    fn sigmoid() -> Curve {
        Curve::Sigmoid { a: Dec::from_int(3), b: Dec::from_int(5), c: Dec::one() }
    }

    #[test]
    fn power_price_and_integral() {
        assert_eq!(power().price(&Dec::zero()).unwrap(), Dec::from_int(100));
        assert_eq!(power().price(&Dec::from_int(1000)).unwrap(), Dec::from_int(12_000_100));
        assert_eq!(power().integral(&Dec::from_int(100)).unwrap(), Dec::from_int(4_010_000));
    }

    #[test]
    fn sigmoid_price_and_integral() {
        let p = sigmoid().price(&Dec::from_int(1000)).unwrap();
        assert_eq!(p.to_string(), "5.999998484889207399");
        let i = sigmoid().integral(&Dec::from_int(100)).unwrap();
        assert_eq!(i.to_string(), "569.718730497");
    }

    #[test]
    fn integral_at_zero_is_zero() {
        assert!(power().integral(&Dec::zero()).unwrap().is_zero());
        assert!(sigmoid().integral(&Dec::zero()).unwrap().is_zero());
    }

    #[test]
    fn swapper_has_no_curve() {
        let err = Curve::Swapper.integral(&Dec::one()).unwrap_err();
        assert_eq!(err, BondError::FunctionNotAvailable("swapper_function".into()));
        assert!(Curve::Swapper.price(&Dec::one()).is_err());
    }

    #[test]
    fn function_type_names_round_trip() {
        for ft in [FunctionType::Power, FunctionType::Sigmoid, FunctionType::Swapper] {
            assert_eq!(ft.name().parse::<FunctionType>().unwrap(), ft);
        }
    }
}
