//! Pool trait definitions for a unified quoting interface

use crate::{Direction, FeeConfig, Reserves, Result, SwapQuote, V2Quoter};
use num_bigint::BigUint;

/// Anything that can be priced as a constant-product pair
pub trait QuotePool {
    /// Current reserves in pair order
    fn reserves(&self) -> &Reserves;

    /// Fee layers applied to quotes against this pool
    fn fees(&self) -> &FeeConfig;

    /// Calculate output amount for given input
    fn quote_exact_in(&self, direction: Direction, amount: &BigUint) -> Result<SwapQuote> {
        V2Quoter::quote_exact_in(self.reserves(), direction, amount, self.fees())
    }

    /// Calculate required input for desired output
    fn quote_exact_out(&self, direction: Direction, amount_out: &BigUint) -> Result<SwapQuote> {
        V2Quoter::quote_exact_out(self.reserves(), direction, amount_out, self.fees())
    }
}

/// Reserves read from a pair at one point in time, with the fees to quote under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSnapshot {
    pub reserves: Reserves,
    pub fees: FeeConfig,
}

impl PairSnapshot {
    pub fn new(reserves: Reserves, fees: FeeConfig) -> Self {
        Self { reserves, fees }
    }
}

impl QuotePool for PairSnapshot {
    fn reserves(&self) -> &Reserves {
        &self.reserves
    }

    fn fees(&self) -> &FeeConfig {
        &self.fees
    }
}
