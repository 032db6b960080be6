//! Token amounts keyed by denomination
//!
//! Both collections are kept sorted by token and never carry explicit zero entries, so
//! two sets built along different paths compare equal whenever their holdings do.

use crate::dec::{Amount, Dec};
use crate::error::{BondError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Whole-unit amount of a single token
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    /// Token identifier
    pub denom: String,
    /// Amount held
    pub amount: Amount,
}

impl Coin {
    /// Builds a coin
    pub fn new(denom: impl Into<String>, amount: Amount) -> Self {
        Self { denom: denom.into(), amount }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Decimal amount of a single token
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecCoin {
    /// Token identifier
    pub denom: String,
    /// Amount held
    pub amount: Dec,
}

impl DecCoin {
    /// Builds a decimal coin
    pub fn new(denom: impl Into<String>, amount: Dec) -> Self {
        Self { denom: denom.into(), amount }
    }
}

impl From<Coin> for DecCoin {
    fn from(c: Coin) -> Self {
        DecCoin::new(c.denom, Dec::from(c.amount))
    }
}

fn valid_denom(denom: &str) -> bool {
    let mut chars = denom.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '/')
}

/// Splits `"100aaa"` / `"0.5aaa"` into amount text and denomination. Amounts are unsigned.
fn split_coin(s: &str) -> Result<(&str, &str)> {
    let s = s.trim();
    let at = s
        .find(|c: char| c.is_ascii_alphabetic())
        .ok_or_else(|| BondError::ParseDecimal(s.to_string()))?;
    let (amount, denom) = s.split_at(at);
    if amount.is_empty() || amount.starts_with(['-', '+']) || !valid_denom(denom) {
        return Err(BondError::ParseDecimal(s.to_string()));
    }
    Ok((amount, denom))
}

/// Set of whole-unit coins
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Amount>", into = "BTreeMap<String, Amount>")]
pub struct Coins(BTreeMap<String, Amount>);

impl Coins {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `coin`, merging with an existing entry of the same token.
    /// The set is left unchanged when the merged amount overflows.
    pub fn add(&mut self, coin: Coin) -> Result<()> {
        if coin.amount == 0 {
            return Ok(());
        }
        let entry = self.0.entry(coin.denom).or_insert(0);
        *entry = entry.checked_add(coin.amount).ok_or(BondError::NumericOverflow)?;
        Ok(())
    }

    /// Amount held of `denom` (zero when absent)
    pub fn amount_of(&self, denom: &str) -> Amount {
        self.0.get(denom).copied().unwrap_or(0)
    }

    /// Whether the set holds no tokens
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct tokens held
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Token identifiers in ascending order
    pub fn denoms(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `(token, amount)` pairs in ascending token order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Amount)> {
        self.0.iter().map(|(d, a)| (d.as_str(), *a))
    }

    /// True iff some token present in both sets is held in a larger amount here
    pub fn is_any_gt(&self, other: &Coins) -> bool {
        self.iter()
            .any(|(denom, amount)| other.0.get(denom).is_some_and(|limit| amount > *limit))
    }
}

/// Merging repeated tokens can overflow, so collecting coins is fallible
impl FromIterator<Coin> for Result<Coins> {
    fn from_iter<I: IntoIterator<Item = Coin>>(iter: I) -> Self {
        let mut coins = Coins::new();
        for c in iter {
            coins.add(c)?;
        }
        Ok(coins)
    }
}

impl From<BTreeMap<String, Amount>> for Coins {
    fn from(map: BTreeMap<String, Amount>) -> Self {
        Coins(map.into_iter().filter(|(_, a)| *a > 0).collect())
    }
}

impl From<Coins> for BTreeMap<String, Amount> {
    fn from(c: Coins) -> Self {
        c.0
    }
}

impl FromStr for Coins {
    type Err = BondError;

    /// Parses `"100aaa,200bbb"`; the empty string is the empty set
    fn from_str(s: &str) -> Result<Self> {
        let mut coins = Coins::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (amount, denom) = split_coin(part)?;
            let amount = amount
                .parse::<Amount>()
                .map_err(|_| BondError::ParseDecimal(part.to_string()))?;
            coins.add(Coin::new(denom, amount))?;
        }
        Ok(coins)
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(d, a)| format!("{a}{d}")).collect();
        f.write_str(&parts.join(","))
    }
}

/// Set of decimal coins
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Dec>", into = "BTreeMap<String, Dec>")]
pub struct DecCoins(BTreeMap<String, Dec>);

/// Per-reserve-token value: a price, a mint cost or a burn return
pub type MultitokenReserveValue = DecCoins;

impl DecCoins {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `coin`, merging with an existing entry of the same token
    pub fn add(&mut self, coin: DecCoin) {
        let entry = self.0.entry(coin.denom).or_insert_with(Dec::zero);
        *entry = &*entry + &coin.amount;
        self.0.retain(|_, v| !v.is_zero());
    }

    /// The same amount for every token in `denoms`
    pub fn broadcast<'a>(denoms: impl IntoIterator<Item = &'a String>, amount: &Dec) -> Self {
        denoms
            .into_iter()
            .map(|d| DecCoin::new(d.clone(), amount.clone()))
            .collect()
    }

    /// Amount held of `denom` (zero when absent)
    pub fn amount_of(&self, denom: &str) -> Dec {
        self.0.get(denom).cloned().unwrap_or_else(Dec::zero)
    }

    /// Whether the set holds no tokens
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct tokens held
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `(token, amount)` pairs in ascending token order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Dec)> {
        self.0.iter().map(|(d, a)| (d.as_str(), a))
    }
}

impl FromIterator<DecCoin> for DecCoins {
    fn from_iter<I: IntoIterator<Item = DecCoin>>(iter: I) -> Self {
        let mut coins = DecCoins::new();
        for c in iter {
            coins.add(c);
        }
        coins
    }
}

impl From<&Coins> for DecCoins {
    fn from(coins: &Coins) -> Self {
        coins
            .iter()
            .map(|(d, a)| DecCoin::new(d, Dec::from(a)))
            .collect()
    }
}

impl From<BTreeMap<String, Dec>> for DecCoins {
    fn from(map: BTreeMap<String, Dec>) -> Self {
        map.into_iter().map(|(d, a)| DecCoin::new(d, a)).collect()
    }
}

impl From<DecCoins> for BTreeMap<String, Dec> {
    fn from(c: DecCoins) -> Self {
        c.0
    }
}

impl FromStr for DecCoins {
    type Err = BondError;

    /// Parses `"0.5aaa,20bbb"`; the empty string is the empty set
    fn from_str(s: &str) -> Result<Self> {
        let mut coins = DecCoins::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (amount, denom) = split_coin(part)?;
            coins.add(DecCoin::new(denom, amount.parse()?));
        }
        Ok(coins)
    }
}

impl fmt::Display for DecCoins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(d, a)| format!("{a}{d}")).collect();
        f.write_str(&parts.join(","))
    }
}
