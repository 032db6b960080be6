//! JSON bond descriptions

use crate::bond::Bond;
use crate::coins::Coins;
use crate::curves::FunctionType;
use crate::dec::{Amount, Dec};
use crate::params::FunctionParams;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_true() -> bool {
    true
}

fn default_batch_blocks() -> u64 {
    1
}

/// Everything needed to create a [`Bond`]; the order of `reserve_tokens` is not significant
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BondConfig {
    /// The bond's own token
    pub token: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Address that created the bond
    pub creator: String,
    /// Curve shape
    pub function_type: FunctionType,
    /// Curve coefficients (empty for swappers)
    #[serde(default)]
    pub function_parameters: FunctionParams,
    /// Reserve tokens backing the bond
    pub reserve_tokens: Vec<String>,
    /// Where reserves are held
    #[serde(default)]
    pub reserve_address: String,
    /// Fee on buys and swaps, in percent
    #[serde(default)]
    pub tx_fee_percentage: Dec,
    /// Fee on sells, in percent
    #[serde(default)]
    pub exit_fee_percentage: Dec,
    /// Where fees are paid
    #[serde(default)]
    pub fee_address: String,
    /// Ceiling on circulating supply
    pub max_supply: Amount,
    /// Per-order ceilings keyed by reserve token
    #[serde(default)]
    pub order_quantity_limits: Coins,
    /// Expected reserve ratio; zero disables the check
    #[serde(default)]
    pub sanity_rate: Dec,
    /// Allowed deviation from `sanity_rate`, in percent
    #[serde(default)]
    pub sanity_margin_percentage: Dec,
    /// Whether burns are permitted
    #[serde(default = "default_true")]
    pub allow_sells: bool,
    /// Addresses allowed to edit the bond, in order
    #[serde(default)]
    pub signers: Vec<String>,
    /// Blocks per order batch
    #[serde(default = "default_batch_blocks")]
    pub batch_blocks: u64,
}

impl BondConfig {
    /// Parses a JSON description
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("parsing bond description")
    }

    /// Reads a JSON description and builds a validated bond
    pub fn load(path: impl AsRef<Path>) -> Result<Bond> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading bond description {}", path.display()))?;
        let bond = Bond::new(Self::from_json(&text)?);
        bond.validate()
            .with_context(|| format!("bond {} in {}", bond.token, path.display()))?;
        Ok(bond)
    }
}
