//! Quote output formatting
//!
//! Text output prints one `name: value` line per quote field. JSON output
//! carries the same fields with every integer as a string, since reserves
//! and products overflow JSON numbers.

use amm::{format_signed_wad, format_wad, BigUint, Direction, QuoteKind, SwapQuote};
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Printable view of a [`SwapQuote`]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteReport {
    pub kind: QuoteKind,
    pub direction: Direction,
    pub reserve_in: String,
    pub reserve_out: String,
    pub amount_in: String,
    pub amount_with_fee: String,
    pub constant_product: String,
    pub reserve_out_after_execution: String,
    pub amount_out: String,
    pub market_price: String,
    pub mid_price: String,
    pub price_impact: String,
}

impl QuoteReport {
    /// Raw integers, or scaled decimals when `human` is set
    ///
    /// The constant product carries 36 decimals and always stays raw.
    pub fn from_quote(quote: &SwapQuote, human: bool) -> Self {
        let fixed = |value: &BigUint| {
            if human {
                format_wad(value)
            } else {
                value.to_string()
            }
        };
        let price_impact = if human {
            format_signed_wad(&quote.price_impact)
        } else {
            quote.price_impact.to_string()
        };

        Self {
            kind: quote.kind,
            direction: quote.direction,
            reserve_in: fixed(&quote.reserve_in),
            reserve_out: fixed(&quote.reserve_out),
            amount_in: fixed(&quote.amount_in),
            amount_with_fee: fixed(&quote.amount_with_fee),
            constant_product: quote.constant_product.to_string(),
            reserve_out_after_execution: fixed(&quote.reserve_out_after_execution),
            amount_out: fixed(&quote.amount_out),
            market_price: fixed(&quote.market_price),
            mid_price: fixed(&quote.mid_price),
            price_impact,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => {
                serde_json::to_string_pretty(self).context("Failed to serialize quote")
            }
        }
    }

    fn to_text(&self) -> String {
        let lines = [
            ("reserveIn", &self.reserve_in),
            ("reserveOut", &self.reserve_out),
            ("amountIn", &self.amount_in),
            ("amountWithFee", &self.amount_with_fee),
            ("constantProduct", &self.constant_product),
            ("reserveOutAfterExecution", &self.reserve_out_after_execution),
            ("amountOut", &self.amount_out),
            ("marketPrice", &self.market_price),
            ("midPrice", &self.mid_price),
            ("priceImpact", &self.price_impact),
        ];

        lines
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
