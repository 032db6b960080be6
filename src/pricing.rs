//! Mint prices and burn returns, reconciled against actual reserve balances

use crate::bond::Bond;
use crate::coins::{Coins, DecCoin, MultitokenReserveValue};
use crate::curves::Curve;
use crate::dec::{Amount, Dec};
use crate::error::{BondError, Result};
use tracing::debug;

impl Bond {
    /// Reserve required to mint `amount` more tokens.
    ///
    /// Curve bonds charge `integral(supply + amount)` minus the reserve already held, so
    /// over- or under-funded reserves are absorbed by the next buyer. A buyer is always
    /// charged at least one unit of each reserve token.
    pub fn prices_to_mint(
        &self,
        amount: Amount,
        reserve_balances: &Coins,
    ) -> Result<MultitokenReserveValue> {
        let curve = self.curve()?;
        if let Curve::Swapper = curve {
            return self.reserve_delta_for_liquidity_delta(amount, reserve_balances);
        }

        let supply = self.current_supply.amount;
        let target = supply.checked_add(amount).ok_or(BondError::NumericOverflow)?;
        let reserve = self.reserve_balance(&curve, reserve_balances)?;
        let price = curve.integral(&Dec::from(target))? - reserve;
        debug!(bond = %self.token, supply = %supply, amount = %amount, %price, "price to mint");

        if price.is_negative() {
            return Ok(self.new_reserve_value(&Dec::one()));
        }
        Ok(self.new_reserve_value(&price))
    }

    /// Reserve returned for burning `amount` tokens.
    ///
    /// Curve bonds pay out the reserve held minus `integral(supply - amount)`, never less
    /// than zero. Burning more than the supply is treated as burning all of it.
    pub fn returns_for_burn(
        &self,
        amount: Amount,
        reserve_balances: &Coins,
    ) -> Result<MultitokenReserveValue> {
        let curve = self.curve()?;
        if let Curve::Swapper = curve {
            return self.reserve_delta_for_liquidity_delta(amount, reserve_balances);
        }

        let supply = self.current_supply.amount;
        let remaining = supply.saturating_sub(amount);
        let reserve = self.reserve_balance(&curve, reserve_balances)?;
        let mut returned = reserve - curve.integral(&Dec::from(remaining))?;
        if returned.is_negative() {
            returned = Dec::zero();
        }
        debug!(bond = %self.token, supply = %supply, amount = %amount, %returned, "return for burn");
        Ok(self.new_reserve_value(&returned))
    }

    /// Share of each actual reserve balance matching a change of `liquidity_delta` in supply:
    /// `liquidity_delta / current_supply × balance`
    ///
    /// Fails on a zero supply whatever the balances. With supply but no balances held the
    /// result is empty.
    pub fn reserve_delta_for_liquidity_delta(
        &self,
        liquidity_delta: Amount,
        reserve_balances: &Coins,
    ) -> Result<MultitokenReserveValue> {
        if self.current_supply.amount == 0 {
            return Err(BondError::RequiresNonZeroSupply);
        }
        let held: Vec<(&String, Amount)> = self
            .reserve_tokens
            .iter()
            .map(|t| (t, reserve_balances.amount_of(t)))
            .filter(|(_, a)| *a > 0)
            .collect();
        if held.is_empty() {
            return Ok(MultitokenReserveValue::new());
        }

        let share = Dec::from(liquidity_delta).quo(&Dec::from(self.current_supply.amount))?;
        held.into_iter()
            .map(|(token, balance)| -> Result<DecCoin> {
                Ok(DecCoin::new(token.clone(), share.mul(&Dec::from(balance))?))
            })
            .collect()
    }
}
