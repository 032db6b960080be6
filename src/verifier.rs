//! Reserve sanity checks and curve shape verification

use crate::bond::Bond;
use crate::coins::Coins;
use crate::curves::Curve;
use crate::dec::{Amount, Dec};
use anyhow::{anyhow, Result};
use tracing::{debug, warn};

impl Bond {
    /// Whether `reserves` puts the first/second reserve ratio outside
    /// `sanity_rate ± sanity_margin_percentage%` (lower bound clamped at zero).
    ///
    /// Always false when `sanity_rate` is zero or the bond does not have exactly two
    /// reserve tokens. A zero second reserve has no ratio and counts as a violation.
    pub fn reserves_violate_sanity_rate(&self, reserves: &Coins) -> bool {
        if self.sanity_rate.is_zero() || self.reserve_tokens.len() != 2 {
            return false;
        }
        let reserve_a = Dec::from(reserves.amount_of(&self.reserve_tokens[0]));
        let reserve_b = Dec::from(reserves.amount_of(&self.reserve_tokens[1]));

        let window = reserve_a.quo(&reserve_b).and_then(|rate| {
            let margin = self
                .sanity_rate
                .mul(&self.sanity_margin_percentage)?
                .quo(&Dec::from_int(100))?;
            Ok((rate, margin))
        });
        let (rate, margin) = match window {
            Ok(w) => w,
            Err(e) => {
                // an empty second reserve has no ratio; treat it as out of range
                warn!(bond = %self.token, error = %e, "reserve ratio undefined");
                return true;
            }
        };
        let upper = &self.sanity_rate + &margin;
        let lower = (&self.sanity_rate - &margin).max(Dec::zero());
        debug!(bond = %self.token, %rate, %lower, %upper, "sanity window");
        rate < lower || rate > upper
    }
}

/// Verification report for a curve sampled over a supply range
#[derive(Debug)]
pub struct Report {
    /// Number of supply points checked
    pub points: usize,
    /// Largest supply checked
    pub max_supply: Amount,
    /// Reserve at the largest supply
    pub final_reserve: Dec,
    /// Whether `integral(0) == 0`
    pub zero_anchored: bool,
    /// Whether the integral never decreases as supply grows
    pub monotone_ok: bool,
    /// Whether every sampled price is non-negative
    pub prices_non_negative: bool,
}

impl Report {
    /// Whether every check passed
    pub fn ok(&self) -> bool {
        self.zero_anchored && self.monotone_ok && self.prices_non_negative
    }
}

/// `points` evenly spaced supplies from zero to `max_supply`, both ends included
pub fn sample_supplies(max_supply: Amount, points: usize) -> Result<Vec<Amount>> {
    if points < 2 {
        return Err(anyhow!("need at least 2 points (got {})", points));
    }
    let last = Dec::from((points - 1) as Amount);
    let top = Dec::from(max_supply);
    (0..points)
        .map(|i| -> Result<Amount> {
            let supply = top.mul(&Dec::from(i as Amount))?.quo(&last)?.floor();
            Ok(supply.to_amount()?)
        })
        .collect()
}

/// Sample `points` supplies in `0..=max_supply` and check the curve's shape
pub fn verify_curve(curve: &Curve, max_supply: Amount, points: usize) -> Result<Report> {
    let supplies = sample_supplies(max_supply, points)?;
    let zero_anchored = curve.integral(&Dec::zero())?.is_zero();

    let mut prev = Dec::zero();
    let mut monotone_ok = true;
    let mut prices_non_negative = true;
    for supply in supplies.iter().map(|s| Dec::from(*s)) {
        let reserve = curve.integral(&supply)?;
        if reserve < prev {
            monotone_ok = false;
        }
        if curve.price(&supply)?.is_negative() {
            prices_non_negative = false;
        }
        prev = reserve;
    }

    Ok(Report {
        points,
        max_supply,
        final_reserve: prev,
        zero_anchored,
        monotone_ok,
        prices_non_negative,
    })
}
