use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use solar_sizing_core::loan;

use crate::input;

#[derive(Deserialize)]
pub struct AmortizeRequest {
    pub principal: Decimal,
    pub annual_rate_percent: Decimal,
    pub years: u32,
}

/// Arguments for an amortization schedule
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AmortizeArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate, percent
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub years: Option<u32>,
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: AmortizeRequest = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        AmortizeRequest {
            principal: args.principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.annual_rate_percent
                .ok_or("--annual-rate-percent is required (or provide --input)")?,
            years: args.years
                .ok_or("--years is required (or provide --input)")?,
        }
    };

    let schedule = loan::amortization_schedule(
        request.principal,
        request.annual_rate_percent,
        request.years,
    )?;
    Ok(serde_json::json!({ "results": schedule }))
}
