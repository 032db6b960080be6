//! Transaction and exit fees
//!
//! Fees are `ceil(amount × percentage / 100)`: any positive amount under a positive
//! percentage pays at least one unit, never zero by rounding.

use crate::bond::Bond;
use crate::coins::{Coin, Coins, DecCoin, DecCoins};
use crate::dec::Dec;
use crate::error::Result;

/// Ceiling-rounded percentage of a single coin
pub fn percentage_fee(percentage: &Dec, coin: &DecCoin) -> Result<Coin> {
    let rate = percentage.quo(&Dec::from_int(100))?;
    let amount = rate.mul(&coin.amount)?.ceil().to_amount()?;
    Ok(Coin::new(coin.denom.clone(), amount))
}

fn percentage_fees(percentage: &Dec, coins: &DecCoins) -> Result<Coins> {
    let mut fees = Coins::new();
    for (denom, amount) in coins.iter() {
        fees.add(percentage_fee(percentage, &DecCoin::new(denom, amount.clone()))?)?;
    }
    Ok(fees)
}

impl Bond {
    /// Fee charged on a buy or swap of `coin`
    pub fn tx_fee(&self, coin: &DecCoin) -> Result<Coin> {
        percentage_fee(&self.tx_fee_percentage, coin)
    }

    /// Fee charged on a sell of `coin`
    pub fn exit_fee(&self, coin: &DecCoin) -> Result<Coin> {
        percentage_fee(&self.exit_fee_percentage, coin)
    }

    /// Per-token tx fees; tokens with a zero fee are omitted
    pub fn tx_fees(&self, coins: &DecCoins) -> Result<Coins> {
        percentage_fees(&self.tx_fee_percentage, coins)
    }

    /// Per-token exit fees; tokens with a zero fee are omitted
    pub fn exit_fees(&self, coins: &DecCoins) -> Result<Coins> {
        percentage_fees(&self.exit_fee_percentage, coins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fee(input: &str, pct: &str) -> u128 {
        let coin = DecCoin::new("res", input.parse().unwrap());
        percentage_fee(&pct.parse().unwrap(), &coin).unwrap().amount
    }

    #[test]
    fn fees_round_up() {
        assert_eq!(fee("2000000000000", "0.1"), 2_000_000_000);
        assert_eq!(fee("2000", "0.1"), 2);
        assert_eq!(fee("200", "0.1"), 1);
        assert_eq!(fee("20", "0.1"), 1);
        assert_eq!(fee("0.000002", "0.1"), 1);
    }

    #[test]
    fn zero_in_zero_out() {
        assert_eq!(fee("0", "0.1"), 0);
        assert_eq!(fee("2000", "0"), 0);
        assert_eq!(fee("0.000002", "0"), 0);
    }
}
