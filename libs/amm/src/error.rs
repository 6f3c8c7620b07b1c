//! Error types for swap quoting
//!
//! Every failure is a property of the inputs. Quotes are deterministic, so
//! callers get the error immediately and retrying never helps.

use num_bigint::BigUint;
use thiserror::Error;

/// Errors raised by the fixed-point helpers and the quote functions
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One side of the pool holds no liquidity
    #[error("Degenerate pool: reserve_in={reserve_in}, reserve_out={reserve_out}")]
    DegeneratePool {
        reserve_in: BigUint,
        reserve_out: BigUint,
    },

    /// The requested trade cannot be priced against this pool
    #[error("Unsatisfiable quote: {reason}")]
    UnsatisfiableQuote { reason: String },

    /// A value needed as a divisor truncated to zero at 18 decimals
    #[error("Precision loss: {quantity} truncated to zero")]
    PrecisionLoss { quantity: &'static str },

    /// Fee fraction outside [0, 10^18]
    #[error("Invalid fee {fee}: must lie within [0, 10^18]")]
    InvalidFee { fee: BigUint },

    /// Decimal input that has no non-negative fixed-point representation
    #[error("Invalid decimal '{input}': expected a non-negative value")]
    InvalidDecimal { input: String },

    /// Division by zero in fixed-point arithmetic
    #[error("Division by zero in fixed-point arithmetic")]
    DivisionByZero,
}

impl DomainError {
    pub(crate) fn unsatisfiable(reason: impl Into<String>) -> Self {
        Self::UnsatisfiableQuote {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
