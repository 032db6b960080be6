//! The bond: curve definition plus its economic configuration

use crate::coins::{Coin, Coins};
use crate::config::BondConfig;
use crate::curves::{Curve, FunctionType};
use crate::dec::Dec;
use crate::error::{BondError, Result};
use crate::params::FunctionParams;
use serde::{Deserialize, Serialize};

/// A bonding-curve token and everything that prices it.
///
/// `reserve_tokens` and `order_quantity_limits` are sorted by token from construction on;
/// every comparison and every output ordering relies on that.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bond {
    /// The bond's own token
    pub token: String,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Address that created the bond
    pub creator: String,
    /// Curve shape
    pub function_type: FunctionType,
    /// Curve coefficients
    pub function_parameters: FunctionParams,
    /// Reserve tokens, sorted ascending
    pub reserve_tokens: Vec<String>,
    /// Where reserves are held
    pub reserve_address: String,
    /// Fee on buys and swaps, in percent
    pub tx_fee_percentage: Dec,
    /// Fee on sells, in percent
    pub exit_fee_percentage: Dec,
    /// Where fees are paid
    pub fee_address: String,
    /// Ceiling on `current_supply`, enforced by the caller
    pub max_supply: Coin,
    /// Per-order ceilings; an absent token is unlimited
    pub order_quantity_limits: Coins,
    /// Expected reserve ratio; zero disables the check
    pub sanity_rate: Dec,
    /// Allowed deviation from `sanity_rate`, in percent
    pub sanity_margin_percentage: Dec,
    /// Circulating supply of `token`
    pub current_supply: Coin,
    /// Whether burns are permitted
    pub allow_sells: bool,
    /// Addresses allowed to edit the bond; order is significant
    pub signers: Vec<String>,
    /// Blocks per order batch
    pub batch_blocks: u64,
}

impl Bond {
    /// Builds a bond with zero supply, sorting its reserve tokens
    pub fn new(cfg: BondConfig) -> Self {
        let mut reserve_tokens = cfg.reserve_tokens;
        reserve_tokens.sort();
        Self {
            max_supply: Coin::new(cfg.token.clone(), cfg.max_supply),
            current_supply: Coin::new(cfg.token.clone(), 0),
            token: cfg.token,
            name: cfg.name,
            description: cfg.description,
            creator: cfg.creator,
            function_type: cfg.function_type,
            function_parameters: cfg.function_parameters,
            reserve_tokens,
            reserve_address: cfg.reserve_address,
            tx_fee_percentage: cfg.tx_fee_percentage,
            exit_fee_percentage: cfg.exit_fee_percentage,
            fee_address: cfg.fee_address,
            order_quantity_limits: cfg.order_quantity_limits,
            sanity_rate: cfg.sanity_rate,
            sanity_margin_percentage: cfg.sanity_margin_percentage,
            allow_sells: cfg.allow_sells,
            signers: cfg.signers,
            batch_blocks: cfg.batch_blocks,
        }
    }

    /// Checks the configuration is economically sane
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(BondError::InvalidBond(msg));
        if self.token.is_empty() {
            return invalid("token must not be empty".into());
        }
        if self.reserve_tokens.is_empty() {
            return invalid("at least one reserve token is required".into());
        }
        if self.reserve_tokens.windows(2).any(|w| w[0] == w[1]) {
            return invalid("reserve tokens must be distinct".into());
        }
        if self.reserve_tokens.contains(&self.token) {
            return invalid(format!("{} cannot be its own reserve token", self.token));
        }
        if self.function_type == FunctionType::Swapper && self.reserve_tokens.len() != 2 {
            return invalid("swapper bonds need exactly two reserve tokens".into());
        }
        self.function_parameters.validate(self.function_type)?;

        let hundred = Dec::from_int(100);
        for (what, pct) in [("tx", &self.tx_fee_percentage), ("exit", &self.exit_fee_percentage)] {
            if pct.is_negative() || *pct > hundred {
                return invalid(format!("{what} fee percentage {pct} outside [0, 100]"));
            }
        }
        if &self.tx_fee_percentage + &self.exit_fee_percentage > hundred {
            return invalid("tx and exit fee percentages exceed 100 combined".into());
        }
        if self.sanity_rate.is_negative() || self.sanity_margin_percentage.is_negative() {
            return invalid("sanity rate and margin must not be negative".into());
        }
        if self.signers.is_empty() {
            return invalid("at least one signer is required".into());
        }
        if self.batch_blocks == 0 {
            return invalid("batch blocks must be positive".into());
        }
        Ok(())
    }

    /// The curve described by `function_type` and `function_parameters`
    pub fn curve(&self) -> Result<Curve> {
        Curve::new(self.function_type, &self.function_parameters)
    }

    /// Whether `signers` matches exactly, including order
    pub fn signers_equal_to(&self, signers: &[String]) -> bool {
        self.signers == signers
    }

    /// Whether `denoms` names the same reserve tokens, in any order
    pub fn reserve_denoms_equal_to<'a>(&self, denoms: impl IntoIterator<Item = &'a str>) -> bool {
        let mut denoms: Vec<&str> = denoms.into_iter().collect();
        denoms.sort_unstable();
        denoms.len() == self.reserve_tokens.len()
            && denoms.iter().zip(&self.reserve_tokens).all(|(a, b)| *a == b)
    }

    /// Whether any amount is above its token's configured per-order limit
    pub fn any_order_quantity_limits_exceeded(&self, amounts: &Coins) -> bool {
        amounts.is_any_gt(&self.order_quantity_limits)
    }
}
