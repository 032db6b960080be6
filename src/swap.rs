//! Direct exchange between the two reserve tokens of a swapper bond

use crate::bond::Bond;
use crate::coins::{Coin, Coins, DecCoin};
use crate::curves::FunctionType;
use crate::error::{BondError, Result};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use tracing::debug;

impl Bond {
    /// Output and fee for swapping `from` into `to_token` against the actual reserves.
    ///
    /// The tx fee is taken from the input first; the rest is priced with the constant
    /// product `out = floor(to_balance × input / (from_balance + input))`.
    pub fn returns_for_swap(
        &self,
        from: &Coin,
        to_token: &str,
        reserve_balances: &Coins,
    ) -> Result<(Coins, Coin)> {
        if self.function_type != FunctionType::Swapper {
            return Err(self.function_type.not_available());
        }
        if !self.reserve_tokens.contains(&from.denom) {
            return Err(BondError::ReserveTokenInvalid(from.denom.clone()));
        }
        if to_token == from.denom || !self.reserve_tokens.iter().any(|t| t == to_token) {
            return Err(BondError::ReserveTokenInvalid(to_token.to_string()));
        }

        let fee = self.tx_fee(&DecCoin::from(from.clone()))?;
        let input = match from.amount.checked_sub(fee.amount) {
            Some(a) if a > 0 => a,
            _ => {
                return Err(BondError::SwapAmountInvalid(format!(
                    "{from} leaves nothing to swap after a fee of {fee}"
                )))
            }
        };

        let from_balance = BigInt::from(reserve_balances.amount_of(&from.denom));
        let to_balance = BigInt::from(reserve_balances.amount_of(to_token));
        let input = BigInt::from(input);
        let output = (to_balance * &input / (from_balance + &input))
            .to_u128()
            .ok_or(BondError::NumericOverflow)?;
        if output == 0 {
            return Err(BondError::SwapAmountInvalid(format!(
                "{from} is too small to return any {to_token}"
            )));
        }
        debug!(bond = %self.token, %from, to = to_token, output = %output, %fee, "swap");

        let mut out = Coins::new();
        out.add(Coin::new(to_token, output))?;
        Ok((out, fee))
    }
}
