//! Tally command-line interface.
//!
//! Evaluates one money expression per invocation and prints the result,
//! one money value per line (or a JSON array with `--json`).

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tally_core::{Context, CurrencyRegistry, ExchangeRate, Money, MoneyFactory, RoundingMode};
use tally_shared::EngineConfig;

/// Exact money arithmetic from the command line.
#[derive(Debug, Parser)]
#[command(name = "tally", version, about)]
struct Cli {
    /// Rounding context: default, exact, cash:<step> or precision:<scale>[:<step>].
    #[arg(long, global = true)]
    context: Option<Context>,

    /// Rounding mode applied to inexact results (up, down, ceiling, floor,
    /// half_up, half_down, half_even, half_ceiling, half_floor, unnecessary).
    #[arg(long, global = true)]
    rounding: Option<RoundingMode>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create money and print its canonical form.
    Of {
        /// Amount: a decimal ("12.5") or a fraction ("3/7").
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Currency code.
        currency: String,
    },
    /// Allocate money across integer ratios.
    Allocate {
        /// Amount to allocate.
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Currency code.
        currency: String,
        /// Non-negative integer ratios.
        #[arg(required = true, num_args = 1..)]
        ratios: Vec<u64>,
        /// Return the undistributable remainder as an extra, last part.
        #[arg(long)]
        with_remainder: bool,
    },
    /// Split money into equal parts.
    Split {
        /// Amount to split.
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Currency code.
        currency: String,
        /// Number of parts.
        parts: usize,
        /// Return the undistributable remainder as an extra, last part.
        #[arg(long)]
        with_remainder: bool,
    },
    /// Convert money into another currency at a fixed rate.
    Convert {
        /// Amount to convert.
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Source currency code.
        from: String,
        /// Target currency code.
        to: String,
        /// Target units per source unit (decimal or fraction).
        rate: String,
    },
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "tally=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = EngineConfig::load().context("failed to load configuration")?;
    let factory = build_factory(&cli, &config)?;
    info!(context = %factory.context(), rounding = %factory.rounding(), "money factory ready");

    let results = run(&cli.command, &factory)?;
    println!("{}", render(&results, cli.json)?);

    Ok(())
}

/// Builds the factory from configuration, letting command-line options
/// override the configured defaults.
fn build_factory(cli: &Cli, config: &EngineConfig) -> Result<MoneyFactory<CurrencyRegistry>> {
    let registry = CurrencyRegistry::from_config(&config.registry);
    debug!(currencies = registry.len(), "currency registry loaded");

    let mut factory = MoneyFactory::from_config(registry, &config.defaults)
        .context("invalid defaults in configuration")?;
    if let Some(context) = cli.context {
        factory = factory.with_context(context);
    }
    if let Some(rounding) = cli.rounding {
        factory = factory.with_rounding(rounding);
    }
    Ok(factory)
}

fn run(command: &Command, factory: &MoneyFactory<CurrencyRegistry>) -> Result<Vec<Money>> {
    let results = match command {
        Command::Of { amount, currency } => vec![factory.of(amount.as_str(), currency)?],
        Command::Allocate {
            amount,
            currency,
            ratios,
            with_remainder,
        } => {
            let money = factory.of(amount.as_str(), currency)?;
            if *with_remainder {
                money.allocate_with_remainder(ratios)?
            } else {
                money.allocate(ratios)?
            }
        }
        Command::Split {
            amount,
            currency,
            parts,
            with_remainder,
        } => {
            let money = factory.of(amount.as_str(), currency)?;
            if *with_remainder {
                money.split_with_remainder(*parts)?
            } else {
                money.split(*parts)?
            }
        }
        Command::Convert {
            amount,
            from,
            to,
            rate,
        } => {
            let money = factory.of(amount.as_str(), from)?;
            let rate = ExchangeRate::new(money.currency(), &factory.currency(to)?, rate.as_str())?;
            vec![rate.convert(&money, factory.rounding())?]
        }
    };
    Ok(results)
}

fn render(results: &[Money], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(results)?);
    }
    Ok(results
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n"))
}
