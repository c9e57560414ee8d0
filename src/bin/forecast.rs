//! Run a twelve-month forecast from command line assumptions
//!
//! Values given on the command line override those loaded with --config.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use runway_forecast::assumptions::load_assumptions;
use runway_forecast::{report, Assumptions, ForecastEngine};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "forecast", about = "Twelve-month revenue, cash and runway forecast")]
struct Cli {
    /// JSON file of assumptions; missing fields take defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting active accounts [default: 65]
    #[arg(long)]
    starting_accounts: Option<i64>,

    /// New accounts per month [default: 11]
    #[arg(long, allow_hyphen_values = true)]
    new_accounts: Option<i64>,

    /// Average deal size [default: 5000]
    #[arg(long)]
    deal_size: Option<f64>,

    /// Fractional take rate % [default: 20]
    #[arg(long)]
    take_rate: Option<f64>,

    /// Account churn % [default: 3]
    #[arg(long)]
    churn: Option<f64>,

    /// Monthly GMV [default: 250000]
    #[arg(long, allow_hyphen_values = true)]
    monthly_gmv: Option<f64>,

    /// Marketplace take rate % [default: 18]
    #[arg(long)]
    marketplace_take_rate: Option<f64>,

    /// GMV growth % per month [default: -1]
    #[arg(long, allow_hyphen_values = true)]
    growth_rate: Option<f64>,

    /// Starting cash balance [default: 1400000]
    #[arg(long, allow_hyphen_values = true)]
    starting_cash: Option<f64>,

    /// Starting monthly expenses [default: 150000]
    #[arg(long, allow_hyphen_values = true)]
    starting_expenses: Option<f64>,

    /// Increase in monthly expenses each quarter [default: 20000]
    #[arg(long, allow_hyphen_values = true)]
    quarterly_increase: Option<f64>,

    /// Calendar year used for month labels
    #[arg(long, default_value_t = 2024)]
    year: i32,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write output here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl Cli {
    fn assumptions(&self) -> Result<Assumptions> {
        let mut assumptions = match &self.config {
            Some(path) => load_assumptions(path)
                .with_context(|| format!("Failed to load assumptions from {}", path.display()))?,
            None => Assumptions::default(),
        };

        if let Some(v) = self.starting_accounts {
            assumptions.starting_accounts = v;
        }
        if let Some(v) = self.new_accounts {
            assumptions.new_accounts_per_month = v;
        }
        if let Some(v) = self.deal_size {
            assumptions.deal_size = v;
        }
        if let Some(v) = self.take_rate {
            assumptions.take_rate_pct = v;
        }
        if let Some(v) = self.churn {
            assumptions.account_churn_pct = v;
        }
        if let Some(v) = self.monthly_gmv {
            assumptions.monthly_gmv = v;
        }
        if let Some(v) = self.marketplace_take_rate {
            assumptions.marketplace_take_rate_pct = v;
        }
        if let Some(v) = self.growth_rate {
            assumptions.growth_rate_pct = v;
        }
        if let Some(v) = self.starting_cash {
            assumptions.starting_cash_balance = v;
        }
        if let Some(v) = self.starting_expenses {
            assumptions.starting_monthly_expenses = v;
        }
        if let Some(v) = self.quarterly_increase {
            assumptions.quarterly_expense_increase = v;
        }

        Ok(assumptions)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let assumptions = cli.assumptions()?;
    log::info!("Running forecast with {:?}", assumptions);

    let engine = ForecastEngine::new(assumptions).context("Invalid assumptions")?;
    let result = engine.run().context("Forecast failed")?;

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match cli.format {
        OutputFormat::Table => {
            write!(out, "{}", report::render_table(&result, cli.year))?;
            writeln!(out)?;
            write!(out, "{}", report::render_kpis(&result.kpis, cli.year))?;
        }
        OutputFormat::Csv => report::write_csv(&result, cli.year, &mut out)?,
        OutputFormat::Json => {
            report::write_json(&result, &mut out)?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    if let Some(path) = &cli.output {
        log::info!("Output written to {}", path.display());
    }
    log::info!(
        "Year revenue {}, ending cash {}, runway {}",
        report::format_currency(result.kpis.total_revenue_year),
        report::format_currency(result.kpis.ending_cash_balance),
        result.kpis.ending_runway,
    );

    Ok(())
}
