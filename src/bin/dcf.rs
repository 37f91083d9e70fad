//! Value a company from a financials JSON export
//!
//! Prints the forecast table and headline figures; optionally writes the
//! forecast table to CSV or emits the full result as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use dcf_valuation::{
    input::load_financials, report, Assumptions, ParseMode, ValuationEngine,
};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dcf",
    about = "Discounted cash flow fair value estimate from company financials"
)]
struct Cli {
    /// Company financials JSON (currentPrice / keyMetrics / stockDetailsReusableData)
    input: PathBuf,

    #[arg(long, help = "Assumptions JSON file (ratios); flags below override it")]
    assumptions: Option<PathBuf>,

    #[arg(long, help = "FCF growth rate in percent [default: 15]")]
    fcf_growth: Option<f64>,

    #[arg(long, help = "Terminal growth rate in percent [default: 4]")]
    terminal_growth: Option<f64>,

    #[arg(long, help = "Discount rate in percent [default: 12]")]
    discount_rate: Option<f64>,

    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(1..=10),
        help = "Forecast period in years, 1-10 [default: 5]"
    )]
    years: Option<u32>,

    #[arg(long, help = "Fail on missing or malformed inputs instead of using 0")]
    strict: bool,

    #[arg(long, help = "Write the forecast table to this CSV file")]
    csv: Option<PathBuf>,

    #[arg(long, help = "Print the result as JSON instead of a text report")]
    json: bool,
}

impl Cli {
    fn resolve_assumptions(&self) -> Result<Assumptions> {
        let mut assumptions = match &self.assumptions {
            Some(path) => Assumptions::from_json_file(path)
                .with_context(|| format!("Failed to load assumptions from {}", path.display()))?,
            None => Assumptions::default(),
        };
        if let Some(pct) = self.fcf_growth {
            assumptions.fcf_growth_rate = pct / 100.0;
        }
        if let Some(pct) = self.terminal_growth {
            assumptions.terminal_growth_rate = pct / 100.0;
        }
        if let Some(pct) = self.discount_rate {
            assumptions.discount_rate = pct / 100.0;
        }
        if let Some(years) = self.years {
            assumptions.forecast_years = years;
        }
        Ok(assumptions)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mode = if cli.strict { ParseMode::Strict } else { ParseMode::Lenient };
    let loaded = load_financials(&cli.input, mode)
        .with_context(|| format!("Failed to load financials from {}", cli.input.display()))?;
    let assumptions = cli.resolve_assumptions()?;

    let result = ValuationEngine::new(assumptions)
        .value(&loaded.input)
        .context("Valuation failed")?;

    if let Some(path) = &cli.csv {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        report::write_forecast_csv(&result, file)?;
        log::info!("Forecast table written to {}", path.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", report::render_summary(&loaded, &assumptions, &result));
    }

    Ok(())
}
