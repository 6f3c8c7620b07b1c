//! Uniswap V2 style quotes with layered fees
//!
//! Forward (amount in -> amount out) and inverse (amount out -> amount in)
//! quotes against a constant-product pool, plus the execution-quality
//! metrics derived from them. All values are 18-decimal fixed-point
//! integers; see [`crate::fixed_point`].
//!
//! Fee layering differs between the two directions. A forward quote
//! deducts the protocol fee from the nominal amount first and the pool fee
//! second. An inverse quote sizes the pool-fee-inclusive input and then adds
//! the protocol fee on top of it.

use crate::error::{DomainError, Result};
use crate::fixed_point::{apply_fee_deduction, apply_fee_surcharge, scale_div, validate_fee, ONE};
use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pool fee of the basic flow: 0.2%
pub const BASIC_POOL_FEE: u64 = 2_000_000_000_000_000;

/// Reference trade size of the basic flow, in whole tokens
pub const BASIC_NOTIONAL_TOKENS: u64 = 100;

/// Pool fee of the adapter-with-fee flow: 0.3%
pub const ADAPTER_POOL_FEE: u64 = 3_000_000_000_000_000;

/// Protocol fee charged by the adapter: 5%
pub const ADAPTER_PROTOCOL_FEE: u64 = 50_000_000_000_000_000;

/// Reference trade size of the adapter-with-fee flow, in whole tokens
pub const ADAPTER_NOTIONAL_TOKENS: u64 = 1;

/// Which side of the pair is sold into the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Token0ToToken1,
    Token1ToToken0,
}

impl Direction {
    /// `0` sells token0, anything else sells token1
    pub fn from_flag(flag: u8) -> Self {
        if flag == 0 {
            Direction::Token0ToToken1
        } else {
            Direction::Token1ToToken0
        }
    }

    /// Pick `(reserve_in, reserve_out)` out of the pair reserves
    pub fn project(self, reserves: &Reserves) -> (&BigUint, &BigUint) {
        match self {
            Direction::Token0ToToken1 => (&reserves.reserve0, &reserves.reserve1),
            Direction::Token1ToToken0 => (&reserves.reserve1, &reserves.reserve0),
        }
    }
}

/// Token balances held by a pair, in the pair's token order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reserves {
    pub reserve0: BigUint,
    pub reserve1: BigUint,
}

impl Reserves {
    pub fn new(reserve0: impl Into<BigUint>, reserve1: impl Into<BigUint>) -> Self {
        Self {
            reserve0: reserve0.into(),
            reserve1: reserve1.into(),
        }
    }
}

/// Fee fractions applied to a quote, both scaled by `ONE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeConfig {
    /// Fee kept by the pool on every swap
    pub pool_fee: BigUint,
    /// Fee charged by the routing adapter on top of the pool fee
    pub protocol_fee: BigUint,
}

impl FeeConfig {
    pub fn new(pool_fee: BigUint, protocol_fee: BigUint) -> Result<Self> {
        let fees = Self {
            pool_fee,
            protocol_fee,
        };
        fees.validate()?;
        Ok(fees)
    }

    /// Pool fee only, no protocol overlay
    pub fn pool_only(pool_fee: BigUint) -> Result<Self> {
        Self::new(pool_fee, BigUint::zero())
    }

    /// 0.2% pool fee, no protocol fee
    pub fn basic() -> Self {
        Self {
            pool_fee: BigUint::from(BASIC_POOL_FEE),
            protocol_fee: BigUint::zero(),
        }
    }

    /// 0.3% pool fee under a 5% protocol fee
    pub fn adapter_with_fee() -> Self {
        Self {
            pool_fee: BigUint::from(ADAPTER_POOL_FEE),
            protocol_fee: BigUint::from(ADAPTER_PROTOCOL_FEE),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_fee(&self.pool_fee)?;
        validate_fee(&self.protocol_fee)
    }
}

/// Whether the input or the output amount was held fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteKind {
    ExactIn,
    ExactOut,
}

/// Every intermediate value of a quote
///
/// For an exact-in quote `amount_in` is the nominal amount and
/// `amount_with_fee` what reaches the pool after both deductions. For an
/// exact-out quote `amount_with_fee` is the pool-fee-inclusive input and
/// `amount_in` the total the trader provides once the protocol fee is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapQuote {
    pub kind: QuoteKind,
    pub direction: Direction,
    pub reserve_in: BigUint,
    pub reserve_out: BigUint,
    pub amount_in: BigUint,
    pub amount_out: BigUint,
    pub amount_with_fee: BigUint,
    pub constant_product: BigUint,
    pub reserve_out_after_execution: BigUint,
    /// Executed price, input per output, fee included
    pub market_price: BigUint,
    /// Spot price before the trade, input per output
    pub mid_price: BigUint,
    /// `ONE - mid_price * ONE / market_price`; negative when execution beats spot
    pub price_impact: BigInt,
}

impl SwapQuote {
    /// `k - reserve_out_after * (reserve_in + amount_with_fee)`
    ///
    /// Lies in `[0, reserve_in + amount_with_fee)` since the post-trade
    /// reserve is a truncated quotient.
    pub fn invariant_residue(&self) -> BigInt {
        let settled =
            &self.reserve_out_after_execution * (&self.reserve_in + &self.amount_with_fee);
        BigInt::from(self.constant_product.clone()) - BigInt::from(settled)
    }
}

/// Constant-product quote math
pub struct V2Quoter;

impl V2Quoter {
    /// Quote the output of selling `amount` into the pool
    ///
    /// The protocol fee is deducted from `amount` first, then the pool fee.
    pub fn quote_exact_in(
        reserves: &Reserves,
        direction: Direction,
        amount: &BigUint,
        fees: &FeeConfig,
    ) -> Result<SwapQuote> {
        let (reserve_in, reserve_out) = direction.project(reserves);
        ensure_liquidity(reserve_in, reserve_out)?;

        let after_protocol_fee = apply_fee_deduction(amount, &fees.protocol_fee)?;
        let amount_with_fee = apply_fee_deduction(&after_protocol_fee, &fees.pool_fee)?;

        let constant_product = reserve_in * reserve_out;
        let reserve_out_after_execution = &constant_product / (reserve_in + &amount_with_fee);
        if reserve_out_after_execution > *reserve_out {
            return Err(DomainError::unsatisfiable(
                "post-trade output reserve exceeds the current reserve",
            ));
        }

        let amount_out = reserve_out - &reserve_out_after_execution;
        if amount_out.is_zero() {
            return Err(DomainError::unsatisfiable(
                "trade is too small to move the output reserve",
            ));
        }

        let (market_price, mid_price, price_impact) =
            price_metrics(reserve_in, reserve_out, &amount_with_fee, &amount_out)?;

        debug!(
            ?direction,
            %amount,
            %amount_with_fee,
            %amount_out,
            %price_impact,
            "exact-in quote"
        );

        Ok(SwapQuote {
            kind: QuoteKind::ExactIn,
            direction,
            reserve_in: reserve_in.clone(),
            reserve_out: reserve_out.clone(),
            amount_in: amount.clone(),
            amount_out,
            amount_with_fee,
            constant_product,
            reserve_out_after_execution,
            market_price,
            mid_price,
            price_impact,
        })
    }

    /// Quote the input needed to receive `amount_out` from the pool
    ///
    /// Solves `amount_with_fee = amount_out * reserve_in / ((reserve_out - amount_out) * (1 - pool_fee))`
    /// for the pool-fee-inclusive input, then adds the protocol fee on top.
    pub fn quote_exact_out(
        reserves: &Reserves,
        direction: Direction,
        amount_out: &BigUint,
        fees: &FeeConfig,
    ) -> Result<SwapQuote> {
        let (reserve_in, reserve_out) = direction.project(reserves);
        ensure_liquidity(reserve_in, reserve_out)?;
        fees.validate()?;

        if amount_out.is_zero() {
            return Err(DomainError::unsatisfiable("requested output is zero"));
        }
        if amount_out >= reserve_out {
            return Err(DomainError::unsatisfiable(format!(
                "requested output {} is not below the output reserve {}",
                amount_out, reserve_out
            )));
        }
        if fees.pool_fee == *ONE {
            return Err(DomainError::unsatisfiable(
                "pool fee consumes the entire input",
            ));
        }

        let numerator = amount_out * &*ONE * reserve_in;
        let denominator = (reserve_out - amount_out) * (&*ONE - &fees.pool_fee);
        let amount_with_fee = numerator / denominator;
        if amount_with_fee.is_zero() {
            return Err(DomainError::unsatisfiable(
                "required input truncates to zero",
            ));
        }

        let amount_in = apply_fee_surcharge(&amount_with_fee, &fees.protocol_fee)?;

        let constant_product = reserve_in * reserve_out;
        let reserve_out_after_execution = &constant_product / (reserve_in + &amount_with_fee);

        let (market_price, mid_price, price_impact) =
            price_metrics(reserve_in, reserve_out, &amount_with_fee, amount_out)?;

        debug!(
            ?direction,
            %amount_out,
            %amount_with_fee,
            %amount_in,
            %price_impact,
            "exact-out quote"
        );

        Ok(SwapQuote {
            kind: QuoteKind::ExactOut,
            direction,
            reserve_in: reserve_in.clone(),
            reserve_out: reserve_out.clone(),
            amount_in,
            amount_out: amount_out.clone(),
            amount_with_fee,
            constant_product,
            reserve_out_after_execution,
            market_price,
            mid_price,
            price_impact,
        })
    }

    /// Exact-in quote with the pool fee alone
    pub fn quote_pool_only(
        reserves: &Reserves,
        direction: Direction,
        amount: &BigUint,
        pool_fee: &BigUint,
    ) -> Result<SwapQuote> {
        let fees = FeeConfig::pool_only(pool_fee.clone())?;
        Self::quote_exact_in(reserves, direction, amount, &fees)
    }
}

fn ensure_liquidity(reserve_in: &BigUint, reserve_out: &BigUint) -> Result<()> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(DomainError::DegeneratePool {
            reserve_in: reserve_in.clone(),
            reserve_out: reserve_out.clone(),
        });
    }
    Ok(())
}

/// Market price, mid price and price impact for a sized trade
///
/// Market price keeps the fee in its numerator, unlike the Uniswap SDK
/// which prices the fee-free input.
fn price_metrics(
    reserve_in: &BigUint,
    reserve_out: &BigUint,
    amount_with_fee: &BigUint,
    amount_out: &BigUint,
) -> Result<(BigUint, BigUint, BigInt)> {
    let market_price = scale_div(amount_with_fee, amount_out)?;
    if market_price.is_zero() {
        return Err(DomainError::PrecisionLoss {
            quantity: "market price",
        });
    }

    let mid_price = scale_div(reserve_in, reserve_out)?;
    let price_ratio = scale_div(&mid_price, &market_price)?;
    let price_impact = BigInt::from((*ONE).clone()) - BigInt::from(price_ratio);

    Ok((market_price, mid_price, price_impact))
}
