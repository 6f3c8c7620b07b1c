mod report;

use amm::{
    wad_from_decimal, BigInt, BigUint, Decimal, Direction, PairSnapshot, QuotePool, Reserves,
    SwapQuote, V2Quoter, ONE,
};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use quote_config::{load_settings, resolve_config_path, QuoteSettings};
use report::{OutputFormat, QuoteReport};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swap-quote")]
#[command(about = "Constant-product swap quotes with layered pool and protocol fees")]
#[command(version)]
struct Cli {
    /// TOML config file (defaults to config/swap-quote.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Print fixed-point values as decimals instead of raw integers
    #[arg(long, global = true)]
    human: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Output for a fixed input, after protocol and pool fees
    ExactIn(PairArgs),
    /// Input needed for a fixed output, protocol fee added on top
    ExactOut(PairArgs),
    /// Output for a fixed input under the pool fee alone
    PoolOnly(PairArgs),
}

#[derive(Args)]
struct PairArgs {
    /// Token0 reserve in raw token units
    #[arg(long)]
    reserve0: BigUint,

    /// Token1 reserve in raw token units
    #[arg(long)]
    reserve1: BigUint,

    /// 0 sells token0 for token1, 1 sells token1 for token0
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    from: u8,

    /// Trade size in whole tokens, overriding the configured notional
    #[arg(long)]
    amount: Option<Decimal>,
}

impl PairArgs {
    fn reserves(&self) -> Reserves {
        Reserves::new(self.reserve0.clone(), self.reserve1.clone())
    }

    fn direction(&self) -> Direction {
        Direction::from_flag(self.from)
    }

    fn amount_or(&self, configured: Result<BigUint>) -> Result<BigUint> {
        match self.amount {
            Some(tokens) => wad_from_decimal(tokens).context("Invalid --amount"),
            None => configured,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref())?;
    init_logging(&settings.log_level);
    // Loading runs before the subscriber exists, so report the source here
    match resolve_config_path(cli.config.as_deref()) {
        Some(file) => info!("Loaded quote config: {:?}", file),
        None => info!("No quote config file, using built-in defaults"),
    }

    let quote = run(&cli.command, &settings)?;

    let report = QuoteReport::from_quote(&quote, cli.human);
    println!("{}", report.render(cli.format)?);

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over the configured level
fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: &Commands, settings: &QuoteSettings) -> Result<SwapQuote> {
    let quote = match command {
        Commands::ExactIn(args) => {
            let snapshot = PairSnapshot::new(args.reserves(), settings.fee_config()?);
            let amount = args.amount_or(settings.exact_in_amount())?;
            info!(direction = ?args.direction(), %amount, "Quoting exact input");
            snapshot
                .quote_exact_in(args.direction(), &amount)
                .context("Exact-in quote failed")?
        }
        Commands::ExactOut(args) => {
            let snapshot = PairSnapshot::new(args.reserves(), settings.fee_config()?);
            let amount_out = args.amount_or(settings.exact_out_amount())?;
            info!(direction = ?args.direction(), %amount_out, "Quoting exact output");
            snapshot
                .quote_exact_out(args.direction(), &amount_out)
                .context("Exact-out quote failed")?
        }
        Commands::PoolOnly(args) => {
            let fees = settings.pool_only_fees()?;
            let amount = args.amount_or(settings.pool_only_amount())?;
            info!(direction = ?args.direction(), %amount, "Quoting exact input, pool fee only");
            V2Quoter::quote_pool_only(&args.reserves(), args.direction(), &amount, &fees.pool_fee)
                .context("Pool-only quote failed")?
        }
    };

    let one_percent = BigInt::from(&*ONE / 100u32);
    if quote.price_impact > one_percent {
        warn!(price_impact = %quote.price_impact, "Price impact above 1%");
    }

    Ok(quote)
}
