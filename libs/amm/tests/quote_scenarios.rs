//! Concrete quote scenarios with exact expected values
//!
//! Expected figures were worked out by hand with truncating integer
//! division at 18 decimals.

use amm::{wad, BigInt, BigUint, Direction, FeeConfig, PairSnapshot, QuoteKind, QuotePool, Reserves, V2Quoter};
use num_traits::{Signed, Zero};
use std::str::FromStr;

fn big(value: &str) -> BigUint {
    BigUint::from_str(value).unwrap()
}

/// 1M token0 against 2M token1
fn million_pair() -> Reserves {
    Reserves::new(wad(1_000_000), wad(2_000_000))
}

#[test]
fn adapter_flow_token0_to_token1() {
    let quote = V2Quoter::quote_exact_in(
        &million_pair(),
        Direction::Token0ToToken1,
        &wad(1),
        &FeeConfig::adapter_with_fee(),
    )
    .unwrap();

    assert_eq!(quote.kind, QuoteKind::ExactIn);
    assert_eq!(quote.amount_in, wad(1));
    assert_eq!(quote.amount_with_fee, big("947150000000000000"));
    assert_eq!(
        quote.constant_product,
        big("2000000000000000000000000000000000000000000000000")
    );
    assert_eq!(
        quote.reserve_out_after_execution,
        big("1999998105701794184545638")
    );
    assert_eq!(quote.amount_out, big("1894298205815454362"));
    assert_eq!(quote.market_price, big("500000473574999999"));
    assert_eq!(quote.mid_price, big("500000000000000000"));
    assert_eq!(quote.price_impact, BigInt::from(947_149_102_906i64));

    // 1:2 pool, so output is just under twice the effective input
    assert!(quote.amount_out < &quote.amount_with_fee * 2u32);
}

#[test]
fn adapter_flow_token1_to_token0() {
    let quote = V2Quoter::quote_exact_in(
        &million_pair(),
        Direction::Token1ToToken0,
        &wad(1),
        &FeeConfig::adapter_with_fee(),
    )
    .unwrap();

    assert_eq!(quote.reserve_in, wad(2_000_000));
    assert_eq!(quote.amount_with_fee, big("947150000000000000"));
    assert_eq!(quote.amount_out, big("473574775726825586"));
    assert_eq!(quote.mid_price, wad(2));
    assert_eq!(quote.market_price, big("2000000947149999996"));
    assert_eq!(quote.price_impact, BigInt::from(473_574_775_725i64));
}

#[test]
fn basic_flow_hundred_tokens() {
    let quote = V2Quoter::quote_pool_only(
        &Reserves::new(wad(1_000), wad(1_000)),
        Direction::Token0ToToken1,
        &wad(100),
        &BigUint::from(amm::v2_quote::BASIC_POOL_FEE),
    )
    .unwrap();

    assert_eq!(quote.amount_with_fee, wad(998) / 10u32);
    assert_eq!(quote.reserve_out_after_execution, big("909256228405164575377"));
    assert_eq!(quote.amount_out, big("90743771594835424623"));
    assert_eq!(quote.market_price, big("1099799999999999999"));
    assert_eq!(quote.mid_price, wad(1));
    assert_eq!(quote.price_impact, BigInt::from(90_743_771_594_835_424i64));
}

#[test]
fn exact_out_half_the_pool() {
    let quote = V2Quoter::quote_exact_out(
        &Reserves::new(wad(1_000), wad(1_000)),
        Direction::Token0ToToken1,
        &wad(500),
        &FeeConfig::adapter_with_fee(),
    )
    .unwrap();

    assert_eq!(quote.kind, QuoteKind::ExactOut);
    assert_eq!(quote.amount_with_fee, big("1003009027081243731193"));
    assert_eq!(quote.amount_in, big("1053159478435305917752"));
    assert_eq!(quote.reserve_out_after_execution, big("499248873309964947421"));
    assert_eq!(quote.market_price, big("2006018054162487462"));
    assert_eq!(quote.price_impact, BigInt::from(501_500_000_000_000_000i64));
}

#[test]
fn exact_out_without_protocol_fee_shows_pool_input() {
    let fees = FeeConfig::pool_only(BigUint::from(amm::v2_quote::ADAPTER_POOL_FEE)).unwrap();
    let quote = V2Quoter::quote_exact_out(&million_pair(), Direction::Token0ToToken1, &wad(1), &fees)
        .unwrap();

    assert_eq!(quote.amount_with_fee, big("501504764293004012"));
    assert_eq!(quote.amount_in, quote.amount_with_fee);
    assert_eq!(quote.price_impact, BigInt::from(3_000_498_500_000_000i64));
}

#[test]
fn zero_fees_leave_pure_slippage() {
    let fees = FeeConfig::new(BigUint::zero(), BigUint::zero()).unwrap();
    let quote = V2Quoter::quote_exact_in(&million_pair(), Direction::Token0ToToken1, &wad(1), &fees)
        .unwrap();

    assert_eq!(quote.amount_with_fee, wad(1));
    assert_eq!(quote.reserve_out_after_execution, big("1999998000001999998000001"));
    assert_eq!(quote.amount_out, big("1999998000001999999"));
    assert_eq!(quote.mid_price, big("500000000000000000"));
    assert_eq!(quote.market_price, big("500000499999999999"));
    assert!(quote.market_price > quote.mid_price);
    assert_eq!(quote.price_impact, BigInt::from(999_999_000_000i64));
}

#[test]
fn exact_out_recovers_input_without_protocol_fee() {
    let pool_fees = [BigUint::zero(), BigUint::from(amm::v2_quote::ADAPTER_POOL_FEE)];
    let amounts = [wad(1), wad(100), wad(12_345) + 7u32];
    let tolerance = BigInt::from(10);

    for pool_fee in &pool_fees {
        let fees = FeeConfig::pool_only(pool_fee.clone()).unwrap();
        for direction in [Direction::Token0ToToken1, Direction::Token1ToToken0] {
            for amount in &amounts {
                let forward =
                    V2Quoter::quote_exact_in(&million_pair(), direction, amount, &fees).unwrap();
                let inverse =
                    V2Quoter::quote_exact_out(&million_pair(), direction, &forward.amount_out, &fees)
                        .unwrap();

                let drift = BigInt::from(inverse.amount_in.clone()) - BigInt::from(amount.clone());
                assert!(
                    drift.abs() <= tolerance,
                    "pool_fee {} {:?} amount {}: drift {}",
                    pool_fee,
                    direction,
                    amount,
                    drift
                );
            }
        }
    }

    // Without any fee the trip is exact
    let fees = FeeConfig::pool_only(BigUint::zero()).unwrap();
    let forward =
        V2Quoter::quote_exact_in(&million_pair(), Direction::Token0ToToken1, &wad(1), &fees)
            .unwrap();
    let inverse =
        V2Quoter::quote_exact_out(&million_pair(), Direction::Token0ToToken1, &forward.amount_out, &fees)
            .unwrap();
    assert_eq!(inverse.amount_with_fee, wad(1));
    assert_eq!(inverse.amount_in, wad(1));
}

#[test]
fn reserves_beyond_u128_products() {
    // k is ~3e96, far past 128 bits
    let reserves = Reserves::new(wad(1_000_000_000_000) * wad(1), wad(3_000_000_000_000) * wad(1));
    let snapshot = PairSnapshot::new(reserves, FeeConfig::adapter_with_fee());

    let quote = snapshot
        .quote_exact_in(Direction::Token0ToToken1, &wad(1_000))
        .unwrap();

    assert_eq!(quote.amount_out, big("2841450000000000000000"));
    assert_eq!(quote.market_price, quote.mid_price);
    // Impact of this trade is below 18-decimal resolution
    assert!(quote.price_impact.is_zero());
    assert!(quote.invariant_residue() >= BigInt::zero());
}
