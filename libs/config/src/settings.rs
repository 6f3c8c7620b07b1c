//! Quote Settings Module
//!
//! Loads fee fractions and reference trade sizes for the quote engine.
//! Values are written as human decimals (`0.003` for 0.3%, `100` for one
//! hundred tokens) and converted to 18-decimal fixed-point on access.

use amm::v2_quote::{
    ADAPTER_NOTIONAL_TOKENS, ADAPTER_POOL_FEE, ADAPTER_PROTOCOL_FEE, BASIC_NOTIONAL_TOKENS,
    BASIC_POOL_FEE,
};
use amm::{fee_from_decimal, wad_from_decimal, BigUint, FeeConfig, WAD_DECIMALS};
use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File, FileFormat};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config file picked up when no explicit path is given
pub const DEFAULT_CONFIG_PATH: &str = "config/swap-quote.toml";

/// Environment variable prefix, e.g. `SWAP_QUOTE__FEES__PROTOCOL_FEE=0.01`
pub const ENV_PREFIX: &str = "SWAP_QUOTE";

fn fixed_point_decimal(raw: u64) -> Decimal {
    Decimal::from_i128_with_scale(raw as i128, WAD_DECIMALS).normalize()
}

/// Main quote configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct QuoteSettings {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Fee layers for exact-in and exact-out quotes
    pub fees: FeeSettings,

    /// Fee for pool-only quotes
    pub pool_only: PoolOnlySettings,

    /// Reference trade sizes, in whole tokens
    pub notional: NotionalSettings,
}

/// Fee layers for adapter-routed quotes
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct FeeSettings {
    pub pool_fee: Decimal,
    pub protocol_fee: Decimal,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PoolOnlySettings {
    pub pool_fee: Decimal,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct NotionalSettings {
    pub exact_in: Decimal,
    pub exact_out: Decimal,
    pub pool_only: Decimal,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            fees: FeeSettings::default(),
            pool_only: PoolOnlySettings::default(),
            notional: NotionalSettings::default(),
        }
    }
}

impl Default for FeeSettings {
    fn default() -> Self {
        Self {
            pool_fee: fixed_point_decimal(ADAPTER_POOL_FEE),
            protocol_fee: fixed_point_decimal(ADAPTER_PROTOCOL_FEE),
        }
    }
}

impl Default for PoolOnlySettings {
    fn default() -> Self {
        Self {
            pool_fee: fixed_point_decimal(BASIC_POOL_FEE),
        }
    }
}

impl Default for NotionalSettings {
    fn default() -> Self {
        Self {
            exact_in: Decimal::from(ADAPTER_NOTIONAL_TOKENS),
            exact_out: Decimal::from(ADAPTER_NOTIONAL_TOKENS),
            pool_only: Decimal::from(BASIC_NOTIONAL_TOKENS),
        }
    }
}

impl QuoteSettings {
    /// Load from an optional TOML file with environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_layered(path, ENV_PREFIX)
    }

    fn load_layered(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut builder = Config::builder();

        match resolve_config_path(path) {
            Some(file) => {
                info!("Loading quote config: {:?}", file);
                builder = builder.add_source(File::from(file.as_path()).required(true));
            }
            None => debug!("No quote config file, using built-in defaults"),
        }

        builder = builder.add_source(Environment::with_prefix(env_prefix).separator("__"));

        let config = builder.build().context("Failed to build configuration")?;
        let settings: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        settings.validate()?;
        debug!(?settings, "quote settings loaded");
        Ok(settings)
    }

    /// Parse settings from TOML text, ignoring the environment
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .context("Failed to build configuration")?;
        let settings: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        settings.validate()?;
        Ok(settings)
    }

    /// Check every fee and trade size converts to fixed-point
    pub fn validate(&self) -> Result<()> {
        self.fee_config()?;
        self.pool_only_fees()?;
        self.exact_in_amount()?;
        self.exact_out_amount()?;
        self.pool_only_amount()?;
        Ok(())
    }

    /// Pool and protocol fee for exact-in and exact-out quotes
    pub fn fee_config(&self) -> Result<FeeConfig> {
        let pool_fee = fee_from_decimal(self.fees.pool_fee).context("Invalid fees.pool_fee")?;
        let protocol_fee =
            fee_from_decimal(self.fees.protocol_fee).context("Invalid fees.protocol_fee")?;
        Ok(FeeConfig::new(pool_fee, protocol_fee)?)
    }

    /// Pool fee alone for pool-only quotes
    pub fn pool_only_fees(&self) -> Result<FeeConfig> {
        let pool_fee =
            fee_from_decimal(self.pool_only.pool_fee).context("Invalid pool_only.pool_fee")?;
        Ok(FeeConfig::pool_only(pool_fee)?)
    }

    pub fn exact_in_amount(&self) -> Result<BigUint> {
        trade_amount(self.notional.exact_in, "notional.exact_in")
    }

    pub fn exact_out_amount(&self) -> Result<BigUint> {
        trade_amount(self.notional.exact_out, "notional.exact_out")
    }

    pub fn pool_only_amount(&self) -> Result<BigUint> {
        trade_amount(self.notional.pool_only, "notional.pool_only")
    }
}

/// Convert a token amount to fixed-point, rejecting zero
pub(crate) fn trade_amount(tokens: Decimal, key: &str) -> Result<BigUint> {
    let amount = wad_from_decimal(tokens).with_context(|| format!("Invalid {}", key))?;
    if amount == BigUint::default() {
        bail!("Invalid {}: trade size must be positive, got {}", key, tokens);
    }
    Ok(amount)
}

/// File that [`load_settings`] reads for `path`
///
/// An explicit path is always returned, even if missing, so loading it
/// fails loudly. Without one, [`DEFAULT_CONFIG_PATH`] is used only if present.
pub fn resolve_config_path(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            default_path.exists().then(|| default_path.to_path_buf())
        }
    }
}

/// Load settings from `path`, or from [`DEFAULT_CONFIG_PATH`] when present
pub fn load_settings(path: Option<&Path>) -> Result<QuoteSettings> {
    QuoteSettings::load(path)
}

/// Parse settings from TOML text
pub fn load_settings_from_str(content: &str) -> Result<QuoteSettings> {
    QuoteSettings::from_toml_str(content)
}
