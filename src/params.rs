//! Named curve coefficients

use crate::curves::FunctionType;
use crate::dec::Dec;
use crate::error::{BondError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single named coefficient
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionParam {
    /// Coefficient name, e.g. `"m"`
    pub param: String,
    /// Coefficient value
    pub value: Dec,
}

impl FunctionParam {
    /// Builds a parameter
    pub fn new(param: impl Into<String>, value: Dec) -> Self {
        Self { param: param.into(), value }
    }
}

/// Ordered list of coefficients; order only matters for rendering
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunctionParams(Vec<FunctionParam>);

impl FunctionParams {
    /// Builds a parameter set, keeping the given order
    pub fn new(params: Vec<FunctionParam>) -> Self {
        Self(params)
    }

    /// Value of `name`.
    ///
    /// # Panics
    /// When the parameter is missing. Bonds are validated on creation, so a missing
    /// coefficient here is a programming error.
    pub fn get(&self, name: &str) -> &Dec {
        self.0
            .iter()
            .find(|p| p.param == name)
            .map(|p| &p.value)
            .unwrap_or_else(|| panic!("function parameter {name} missing from {self}"))
    }

    /// Snapshot as a name → value map
    pub fn as_map(&self) -> BTreeMap<String, Dec> {
        self.0
            .iter()
            .map(|p| (p.param.clone(), p.value.clone()))
            .collect()
    }

    /// Whether no parameters are present
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks that exactly the coefficients required by `function_type` are present and sane
    pub fn validate(&self, function_type: FunctionType) -> Result<()> {
        let expected = function_type.param_names();
        let mut seen: Vec<&str> = self.0.iter().map(|p| p.param.as_str()).collect();
        seen.sort_unstable();
        let mut wanted = expected.to_vec();
        wanted.sort_unstable();
        if seen != wanted {
            return Err(BondError::InvalidFunctionParams(format!(
                "{function_type} expects {expected:?}, got {self}"
            )));
        }
        for p in &self.0 {
            if p.value.is_negative() {
                return Err(BondError::InvalidFunctionParams(format!(
                    "{} must not be negative",
                    p.param
                )));
            }
        }
        match function_type {
            FunctionType::Power if !self.get("n").is_integer() => Err(
                BondError::InvalidFunctionParams("n must be a whole number".to_string()),
            ),
            FunctionType::Sigmoid if !self.get("c").is_positive() => Err(
                BondError::InvalidFunctionParams("c must be positive".to_string()),
            ),
            _ => Ok(()),
        }
    }
}

impl FromIterator<(&'static str, Dec)> for FunctionParams {
    fn from_iter<I: IntoIterator<Item = (&'static str, Dec)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| FunctionParam::new(k, v)).collect())
    }
}

impl fmt::Display for FunctionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|p| format!("{}:{}", p.param, p.value))
            .collect();
        write!(f, "{{{}}}", parts.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn power() -> FunctionParams {
        [("m", Dec::from_int(12)), ("n", Dec::from_int(2)), ("c", Dec::from_int(100))]
            .into_iter()
            .collect()
    }

    #[test]
    fn renders_in_insertion_order() {
        assert_eq!(FunctionParams::default().to_string(), "{}");
        let one: FunctionParams = [("a", Dec::one())].into_iter().collect();
        assert_eq!(one.to_string(), "{a:1}");
        assert_eq!(power().to_string(), "{m:12,n:2,c:100}");
    }

    #[test]
    fn as_map_keeps_every_value() {
        let map = power().as_map();
        assert_eq!(map.len(), 3);
        assert_eq!(map["m"], Dec::from_int(12));
        assert_eq!(map["n"], Dec::from_int(2));
        assert_eq!(map["c"], Dec::from_int(100));
    }

    #[test]
    fn validation_matches_function_type() {
        assert!(power().validate(FunctionType::Power).is_ok());
        assert!(power().validate(FunctionType::Sigmoid).is_err());
        assert!(FunctionParams::default().validate(FunctionType::Swapper).is_ok());

        let fractional_n: FunctionParams = [
            ("m", Dec::one()),
            ("n", "1.5".parse().unwrap()),
            ("c", Dec::zero()),
        ]
        .into_iter()
        .collect();
        assert!(fractional_n.validate(FunctionType::Power).is_err());

        let flat_sigmoid: FunctionParams = [("a", Dec::one()), ("b", Dec::one()), ("c", Dec::zero())]
            .into_iter()
            .collect();
        assert!(flat_sigmoid.validate(FunctionType::Sigmoid).is_err());
    }
}
