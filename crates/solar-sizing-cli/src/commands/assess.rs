use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use solar_sizing_core::assessment::{
    calculate_assessment, FinancingInputs, FinancingModel, SiteInputs,
};

use crate::input;

/// JSON request shape: site and financing inputs in one document.
#[derive(Deserialize)]
pub struct AssessmentRequest {
    pub site: SiteInputs,
    pub financing: FinancingInputs,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum FinancingModelArg {
    BankLoan,
    FlatRateLoan,
    ZeroInvestmentTiered,
}

impl From<FinancingModelArg> for FinancingModel {
    fn from(arg: FinancingModelArg) -> Self {
        match arg {
            FinancingModelArg::BankLoan => FinancingModel::BankLoan,
            FinancingModelArg::FlatRateLoan => FinancingModel::FlatRateLoan,
            FinancingModelArg::ZeroInvestmentTiered => FinancingModel::ZeroInvestmentTiered,
        }
    }
}

/// Arguments for a full site assessment
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AssessArgs {
    /// Path to JSON input file with {"site": ..., "financing": ...}
    /// (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Customer name (metadata only)
    #[arg(long)]
    pub customer_name: Option<String>,

    /// Postal PIN code for the irradiation lookup
    #[arg(long)]
    pub pin_code: Option<String>,

    /// Monthly consumption in units (kWh)
    #[arg(long)]
    pub net_units: Option<Decimal>,

    /// Contracted demand (CMD), kW
    #[arg(long, alias = "cmd")]
    pub contract_demand_kw: Option<Decimal>,

    /// Distribution transformer rating, kVA
    #[arg(long)]
    pub transformer_capacity_kva: Option<Decimal>,

    /// Available roof/ground area, sqft
    #[arg(long)]
    pub available_space_sqft: Option<Decimal>,

    /// Usable share of available area, percent
    #[arg(long)]
    pub space_utilization_percent: Option<Decimal>,

    /// Regional policy key (see `ssa regions`)
    #[arg(long)]
    pub region_key: Option<String>,

    /// Grid tariff per unit
    #[arg(long)]
    pub tariff_per_unit: Option<Decimal>,

    /// Installed system cost per kW before tax
    #[arg(long)]
    pub system_cost_per_kw: Option<Decimal>,

    /// Tax on system cost, percent
    #[arg(long)]
    pub tax_percent: Option<Decimal>,

    /// Utility charge per kW of CMD enhancement
    #[arg(long)]
    pub cmd_enhancement_cost_per_kw: Option<Decimal>,

    /// Panel footprint, sqft per kW
    #[arg(long)]
    pub sqft_per_kw: Option<Decimal>,

    /// Financing model
    #[arg(long)]
    pub financing_model: Option<FinancingModelArg>,

    /// Annual diminishing-balance bank rate, percent
    #[arg(long)]
    pub bank_interest_rate_percent: Option<Decimal>,

    /// Annual flat rate, percent
    #[arg(long)]
    pub flat_rate_percent: Option<Decimal>,

    /// Loan is with a private bank
    #[arg(long, default_value_t = false)]
    pub private_bank: bool,

    /// Loan term in years
    #[arg(long)]
    pub loan_term_years: Option<u32>,
}

pub fn run_assess(args: AssessArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: AssessmentRequest = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        AssessmentRequest {
            site: SiteInputs {
                customer_name: args.customer_name.unwrap_or_default(),
                business_type: String::new(),
                address: String::new(),
                contact_number: String::new(),
                email: String::new(),
                pin_code: args.pin_code.unwrap_or_default(),
                net_units: args.net_units
                    .ok_or("--net-units is required (or provide --input)")?,
                contract_demand_kw: args.contract_demand_kw
                    .ok_or("--contract-demand-kw is required (or provide --input)")?,
                transformer_capacity_kva: args.transformer_capacity_kva,
                available_space_sqft: args.available_space_sqft
                    .ok_or("--available-space-sqft is required (or provide --input)")?,
                space_utilization_percent: args.space_utilization_percent
                    .ok_or("--space-utilization-percent is required (or provide --input)")?,
                region_key: args.region_key
                    .ok_or("--region-key is required (or provide --input)")?,
                tariff_per_unit: args.tariff_per_unit
                    .ok_or("--tariff-per-unit is required (or provide --input)")?,
                system_cost_per_kw: args.system_cost_per_kw
                    .ok_or("--system-cost-per-kw is required (or provide --input)")?,
                tax_percent: args.tax_percent
                    .ok_or("--tax-percent is required (or provide --input)")?,
                cmd_enhancement_cost_per_kw: args.cmd_enhancement_cost_per_kw
                    .ok_or("--cmd-enhancement-cost-per-kw is required (or provide --input)")?,
                sqft_per_kw: args.sqft_per_kw
                    .ok_or("--sqft-per-kw is required (or provide --input)")?,
            },
            financing: FinancingInputs {
                financing_model: args.financing_model
                    .ok_or("--financing-model is required (or provide --input)")?
                    .into(),
                bank_interest_rate_percent: args.bank_interest_rate_percent
                    .unwrap_or_default(),
                flat_rate_percent: args.flat_rate_percent.unwrap_or_default(),
                uses_private_bank: args.private_bank,
                loan_term_years: args.loan_term_years
                    .ok_or("--loan-term-years is required (or provide --input)")?,
            },
        }
    };

    let output = calculate_assessment(&request.site, &request.financing)?;
    Ok(serde_json::to_value(&output)?)
}
