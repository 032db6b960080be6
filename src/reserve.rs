//! Spreading a single curve value across the bond's reserve tokens

use crate::bond::Bond;
use crate::coins::{Coins, DecCoins, MultitokenReserveValue};
use crate::curves::{Curve, FunctionType};
use crate::dec::{Amount, Dec};
use crate::error::Result;
use tracing::debug;

impl Bond {
    /// `amount` of every reserve token
    pub fn new_reserve_value(&self, amount: &Dec) -> MultitokenReserveValue {
        DecCoins::broadcast(&self.reserve_tokens, amount)
    }

    /// Curve price at `supply`, quoted against each reserve token
    pub fn prices_at_supply(&self, supply: Amount) -> Result<MultitokenReserveValue> {
        let price = self.curve()?.price(&Dec::from(supply))?;
        Ok(self.new_reserve_value(&price))
    }

    /// Price per token right now.
    ///
    /// Curve bonds quote the marginal price at the current supply. Swappers derive it from
    /// the ratio of the actual reserve balances, as the cost of minting one unit.
    pub fn current_prices(&self, reserve_balances: &Coins) -> Result<MultitokenReserveValue> {
        match self.function_type {
            FunctionType::Power | FunctionType::Sigmoid => {
                self.prices_at_supply(self.current_supply.amount)
            }
            FunctionType::Swapper => self.prices_to_mint(1, reserve_balances),
        }
    }

    /// Reserve actually backing the supply: the balance of the first reserve token held,
    /// or the curve's theoretical reserve when no balances are supplied.
    pub(crate) fn reserve_balance(&self, curve: &Curve, reserve_balances: &Coins) -> Result<Dec> {
        let held = self
            .reserve_tokens
            .iter()
            .map(|t| reserve_balances.amount_of(t))
            .find(|a| *a > 0);
        match held {
            Some(balance) => Ok(Dec::from(balance)),
            None => {
                let theoretical = curve.integral(&Dec::from(self.current_supply.amount))?;
                debug!(bond = %self.token, %theoretical, "no reserve balances, using curve reserve");
                Ok(theoretical)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::coins::DecCoins;
    use crate::dec::Dec;

    #[test]
    fn broadcast_covers_every_token() {
        let tokens = vec!["aaa".to_string(), "bbb".to_string()];
        let value = DecCoins::broadcast(&tokens, &Dec::from_int(10));
        assert_eq!(value, "10aaa,10bbb".parse().unwrap());
    }
}
