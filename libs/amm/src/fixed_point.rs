//! 18-decimal fixed-point helpers on arbitrary-precision integers
//!
//! Reserves, amounts, fees and prices are all integers scaled by [`ONE`].
//! Products such as `reserve_in * reserve_out` routinely exceed 128 bits for
//! real token balances, so everything runs on `BigUint`/`BigInt` and never
//! overflows. Every division truncates toward zero, the same way on-chain
//! integer math does.

use crate::error::{DomainError, Result};
use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, Zero};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;

/// Decimal places carried by the fixed-point unit
pub const WAD_DECIMALS: u32 = 18;

/// Fixed-point unit (10^18)
pub static ONE: Lazy<BigUint> = Lazy::new(|| pow10(WAD_DECIMALS));

fn pow10(exponent: u32) -> BigUint {
    BigUint::from(10u32).pow(exponent)
}

/// Whole tokens expressed in fixed-point units
pub fn wad(tokens: u64) -> BigUint {
    &*ONE * tokens
}

/// `a * b / ONE`
pub fn scale_mul(a: &BigUint, b: &BigUint) -> BigUint {
    a * b / &*ONE
}

/// `a * ONE / b`
pub fn scale_div(a: &BigUint, b: &BigUint) -> Result<BigUint> {
    if b.is_zero() {
        return Err(DomainError::DivisionByZero);
    }
    Ok(a * &*ONE / b)
}

/// Reject fee fractions above `ONE`
pub fn validate_fee(fee: &BigUint) -> Result<()> {
    if fee > &*ONE {
        return Err(DomainError::InvalidFee { fee: fee.clone() });
    }
    Ok(())
}

/// Take a fee out of an amount: `amount * (ONE - fee) / ONE`
pub fn apply_fee_deduction(amount: &BigUint, fee: &BigUint) -> Result<BigUint> {
    validate_fee(fee)?;
    Ok(scale_mul(amount, &(&*ONE - fee)))
}

/// Put a fee on top of an amount: `amount * (ONE + fee) / ONE`
pub fn apply_fee_surcharge(amount: &BigUint, fee: &BigUint) -> Result<BigUint> {
    validate_fee(fee)?;
    Ok(scale_mul(amount, &(&*ONE + fee)))
}

/// Convert a human decimal (`"0.003"`, `"100"`) into fixed-point units
///
/// Digits past the 18th decimal place are truncated.
pub fn wad_from_decimal(value: Decimal) -> Result<BigUint> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(DomainError::InvalidDecimal {
            input: value.to_string(),
        });
    }

    let mantissa = BigUint::from(value.mantissa().unsigned_abs());
    let scale = value.scale();
    if scale <= WAD_DECIMALS {
        Ok(mantissa * pow10(WAD_DECIMALS - scale))
    } else {
        Ok(mantissa / pow10(scale - WAD_DECIMALS))
    }
}

/// Convert a decimal fee fraction (`0.003` for 0.3%) into fixed-point units
pub fn fee_from_decimal(value: Decimal) -> Result<BigUint> {
    let fee = wad_from_decimal(value)?;
    validate_fee(&fee)?;
    Ok(fee)
}

/// Render fixed-point units as a decimal string without trailing zeros
pub fn format_wad(value: &BigUint) -> String {
    let whole = value / &*ONE;
    let fraction = value % &*ONE;
    if fraction.is_zero() {
        return whole.to_string();
    }

    let digits = format!(
        "{:0>width$}",
        fraction.to_string(),
        width = WAD_DECIMALS as usize
    );
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// Signed counterpart of [`format_wad`], used for price impact
pub fn format_signed_wad(value: &BigInt) -> String {
    let magnitude = format_wad(value.magnitude());
    if value.is_negative() {
        format!("-{}", magnitude)
    } else {
        magnitude
    }
}
