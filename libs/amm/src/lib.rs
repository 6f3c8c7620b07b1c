//! # AMM Swap Quote Library - Constant-Product Pricing Engine
//!
//! ## Purpose
//!
//! Exact quoting for Uniswap V2 style pairs traded through a fee-charging
//! adapter. Given a pair's reserves, a trade direction and a layered fee
//! configuration (pool fee plus protocol fee), computes the output for a
//! fixed input, the input for a fixed output, and the execution-quality
//! metrics of either trade: market price, mid price and price impact.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Pair reserves `(reserve0, reserve1)` and a `from` flag
//!   supplied by the caller; this crate never reads chain state
//! - **Output Destinations**: [`SwapQuote`] records carrying every intermediate value
//! - **Precision**: 18-decimal fixed-point on arbitrary-precision integers, truncating division
//! - **Validation**: Degenerate pools and unsatisfiable trades surface as [`DomainError`]
//!
//! ## Architecture Role
//!
//! Pure and synchronous. No shared state, no I/O, so quotes can run from
//! any number of threads without coordination.

pub mod error;
pub mod fixed_point;
pub mod pool_traits;
pub mod v2_quote;

pub use error::{DomainError, Result};
pub use fixed_point::{
    apply_fee_deduction, apply_fee_surcharge, fee_from_decimal, format_signed_wad, format_wad,
    scale_div, scale_mul, wad, wad_from_decimal, ONE, WAD_DECIMALS,
};
pub use pool_traits::{PairSnapshot, QuotePool};
pub use v2_quote::{Direction, FeeConfig, QuoteKind, Reserves, SwapQuote, V2Quoter};

/// Common types for quote calculations
pub use num_bigint::{BigInt, BigUint};
pub use rust_decimal::Decimal;
