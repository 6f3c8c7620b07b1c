//! # Swap Quote Configuration
//!
//! Fee layers and reference trade sizes for the quote engine, loaded from
//! built-in defaults, an optional TOML file and `SWAP_QUOTE__*` environment
//! variables, in that order of precedence.
//!
//! ## Usage
//!
//! ```no_run
//! use quote_config::load_settings;
//!
//! let settings = load_settings(None)?;
//! let fees = settings.fee_config()?;
//! let amount = settings.exact_in_amount()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod settings;

pub use settings::{
    load_settings, load_settings_from_str, FeeSettings, NotionalSettings, PoolOnlySettings,
    resolve_config_path, QuoteSettings, DEFAULT_CONFIG_PATH, ENV_PREFIX,
};
