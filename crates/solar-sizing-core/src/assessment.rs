use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::irradiation::yield_factor;
use crate::loan;
use crate::policy::policy_for;
use crate::{types::*, SolarSizingError, SolarSizingResult};

const DAYS_PER_MONTH: Decimal = dec!(30);
const DAYS_PER_YEAR: Decimal = dec!(365);
const BANK_DOWN_PAYMENT_FRACTION: Decimal = dec!(0.10);
const PRIVATE_BANK_PAYBACK_PENALTY_YEARS: Decimal = dec!(1);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// How the installation is paid for. A closed set; each variant is a distinct
/// computation path in [`calculate_assessment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FinancingModel {
    /// 10% advance, 90% amortizing loan at a diminishing-balance rate.
    BankLoan,
    /// 100% financed, simple (flat) interest on the full principal.
    FlatRateLoan,
    /// 100% financed, marketed as tiered by capacity band.
    ZeroInvestmentTiered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteInputs {
    /// Customer metadata, opaque to the engine.
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub business_type: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub email: String,

    /// Postal PIN code, used for the irradiation lookup.
    #[serde(default)]
    pub pin_code: String,
    /// Monthly energy consumption from the bill, in units (kWh).
    pub net_units: Units,
    /// Contracted demand (CMD), kW.
    pub contract_demand_kw: Kilowatts,
    /// Distribution transformer rating, where known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformer_capacity_kva: Option<Kilowatts>,
    /// Roof or ground area available for panels, sqft.
    pub available_space_sqft: Decimal,
    /// Share of that area actually usable, percent.
    pub space_utilization_percent: Decimal,
    /// Key into the regional policy table.
    pub region_key: String,

    /// Grid tariff per unit, used for the savings estimate.
    pub tariff_per_unit: Money,
    /// Installed system cost per kW before tax.
    pub system_cost_per_kw: Money,
    /// Tax charged on the system cost, percent.
    pub tax_percent: Rate,
    /// Utility charge per kW of contracted-demand enhancement.
    pub cmd_enhancement_cost_per_kw: Money,
    /// Panel footprint, sqft per kW of capacity.
    pub sqft_per_kw: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingInputs {
    pub financing_model: FinancingModel,
    /// Annual diminishing-balance rate for the bank-loan model, percent.
    pub bank_interest_rate_percent: Rate,
    /// Annual flat rate for the 100%-financed models, percent.
    pub flat_rate_percent: Rate,
    /// Private banks extend disbursal and approval timelines.
    pub uses_private_bank: bool,
    pub loan_term_years: u32,
}

/// Immutable snapshot of one assessment. Valid only for the input set that
/// produced it; recompute whenever any input changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResults {
    // Capacity
    pub permitted_by_cmd_kw: Kilowatts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permitted_by_transformer_kw: Option<Kilowatts>,
    pub permitted_by_policy_kw: Kilowatts,
    pub space_limited_kw: Kilowatts,
    pub recommended_kw: Kilowatts,

    // Generation
    pub units_per_kw_per_day: Units,
    pub estimated_daily_units: Units,
    pub estimated_monthly_units: Units,
    pub estimated_annual_units: Units,
    pub coverage_percent: Decimal,

    // Costs
    pub base_system_cost: Money,
    pub tax_amount: Money,
    pub total_system_cost: Money,

    // CMD enhancement opportunity
    pub cmd_enhancement_needed: bool,
    pub additional_kw_possible: Kilowatts,
    pub required_additional_cmd_kw: Kilowatts,
    pub cmd_enhancement_cost_total: Money,

    // Financing
    pub down_payment: Money,
    pub loan_principal: Money,
    pub total_interest: Money,
    pub monthly_payment: Money,
    pub total_repayable: Money,

    // ROI. None means the savings stream cannot repay the outlay.
    pub annual_savings: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_years: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_months: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Size a solar installation against regulatory and space limits, then cost
/// and finance it.
///
/// Total over well-formed inputs: data-quality problems surface as warnings
/// in the output envelope, never as errors. `Err` is reserved for inputs no
/// number can be produced from (zero panel footprint, zero-length loan term).
pub fn calculate_assessment(
    site: &SiteInputs,
    financing: &FinancingInputs,
) -> SolarSizingResult<ComputationOutput<AssessmentResults>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(site, financing)?;

    let policy = policy_for(&site.region_key);

    // -- Policy-limited capacity ---------------------------------------------
    let permitted_by_cmd = site.contract_demand_kw * policy.cmd_multiplier;

    let permitted_by_transformer = site.transformer_capacity_kva.map(|transformer| {
        if transformer * dec!(0.8) < site.contract_demand_kw {
            warnings.push("Transformer capacity may restrict CMD - consult electrical team".into());
        }
        transformer * policy.transformer_multiplier.unwrap_or(dec!(0.50))
    });

    let permitted_by_policy = match permitted_by_transformer {
        Some(by_transformer) => permitted_by_cmd.min(by_transformer),
        None => permitted_by_cmd,
    };

    // -- Space-limited capacity ----------------------------------------------
    let utilization = if site.space_utilization_percent < Decimal::ZERO
        || site.space_utilization_percent > dec!(100)
    {
        warnings.push("Space utilization outside 0-100% - clamped for sizing".into());
        site.space_utilization_percent
            .clamp(Decimal::ZERO, dec!(100))
    } else {
        site.space_utilization_percent
    };
    let effective_space = site.available_space_sqft.max(Decimal::ZERO) * utilization / dec!(100);
    let space_limited = (effective_space / site.sqft_per_kw).floor();

    let recommended = permitted_by_policy.min(space_limited);

    // -- Generation ----------------------------------------------------------
    // Fixed 30/365 day counts, matching how tariff sheets quote generation.
    let units_per_kw_per_day = yield_factor(&site.pin_code);
    let daily_units = recommended * units_per_kw_per_day;
    let monthly_units = daily_units * DAYS_PER_MONTH;
    let annual_units = daily_units * DAYS_PER_YEAR;

    let coverage_percent = if site.net_units > Decimal::ZERO {
        monthly_units / site.net_units * dec!(100)
    } else {
        warnings.push("Net units consumed is zero or negative - please verify bill data".into());
        Decimal::ZERO
    };

    if coverage_percent > dec!(100) {
        warnings.push("Estimated generation exceeds consumption - verify net metering policy".into());
    }

    // -- System cost ---------------------------------------------------------
    let base_system_cost = recommended * site.system_cost_per_kw;
    let tax_amount = base_system_cost * site.tax_percent / dec!(100);
    let total_system_cost = base_system_cost + tax_amount;

    // -- CMD enhancement opportunity -----------------------------------------
    let cmd_enhancement_needed = space_limited > permitted_by_policy;
    let additional_kw_possible = (space_limited - permitted_by_policy).max(Decimal::ZERO);
    let required_additional_cmd = additional_kw_possible / policy.cmd_multiplier;
    let cmd_enhancement_cost_total = required_additional_cmd * site.cmd_enhancement_cost_per_kw;

    // -- Financing -----------------------------------------------------------
    let periods = financing.loan_term_years * 12;
    let term_years = Decimal::from(financing.loan_term_years);

    let (down_payment, loan_principal, total_interest, monthly_payment) =
        match financing.financing_model {
            FinancingModel::BankLoan => {
                let down = total_system_cost * BANK_DOWN_PAYMENT_FRACTION;
                let principal = total_system_cost - down;
                let rate = loan::monthly_rate(financing.bank_interest_rate_percent);
                let payment = loan::periodic_payment(principal, rate, periods)?;
                let interest = if rate.is_zero() {
                    Decimal::ZERO
                } else {
                    payment * Decimal::from(periods) - principal
                };
                (down, principal, interest, payment)
            }
            // TODO: give ZeroInvestmentTiered its own capacity-band tiers once
            // pricing bands are finalised; until then it follows the flat-rate
            // path.
            FinancingModel::FlatRateLoan | FinancingModel::ZeroInvestmentTiered => {
                let principal = total_system_cost;
                let interest = principal * financing.flat_rate_percent / dec!(100) * term_years;
                let payment = (principal + interest) / Decimal::from(periods);
                (Decimal::ZERO, principal, interest, payment)
            }
        };

    let total_repayable = down_payment + loan_principal + total_interest;

    // -- ROI -----------------------------------------------------------------
    let annual_savings = annual_units * site.tariff_per_unit;

    let (payback_years, payback_months) = if annual_savings > Decimal::ZERO {
        let mut years = total_repayable / annual_savings;
        if financing.uses_private_bank {
            years += PRIVATE_BANK_PAYBACK_PENALTY_YEARS;
        }
        let months = (years * dec!(12)).ceil();
        (Some(years), Some(months))
    } else {
        warnings.push("Annual savings are not positive - payback cannot be estimated".into());
        (None, None)
    };

    let results = AssessmentResults {
        permitted_by_cmd_kw: permitted_by_cmd,
        permitted_by_transformer_kw: permitted_by_transformer,
        permitted_by_policy_kw: permitted_by_policy,
        space_limited_kw: space_limited,
        recommended_kw: recommended,
        units_per_kw_per_day,
        estimated_daily_units: daily_units,
        estimated_monthly_units: monthly_units,
        estimated_annual_units: annual_units,
        coverage_percent,
        base_system_cost,
        tax_amount,
        total_system_cost,
        cmd_enhancement_needed,
        additional_kw_possible,
        required_additional_cmd_kw: required_additional_cmd,
        cmd_enhancement_cost_total,
        down_payment,
        loan_principal,
        total_interest,
        monthly_payment,
        total_repayable,
        annual_savings,
        payback_years,
        payback_months,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "region_policy": policy.name,
        "units_per_kw_per_day": units_per_kw_per_day.to_string(),
        "financing_model": financing.financing_model,
        "days_per_month": DAYS_PER_MONTH.to_string(),
        "days_per_year": DAYS_PER_YEAR.to_string(),
    });

    Ok(with_metadata(
        "Solar Sizing & Financing Assessment",
        &assumptions,
        warnings,
        elapsed,
        results,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_input(site: &SiteInputs, financing: &FinancingInputs) -> SolarSizingResult<()> {
    if site.sqft_per_kw <= Decimal::ZERO {
        return Err(SolarSizingError::InvalidInput {
            field: "sqft_per_kw".into(),
            reason: "Panel footprint per kW must be positive.".into(),
        });
    }
    if financing.loan_term_years == 0 {
        return Err(SolarSizingError::InvalidInput {
            field: "loan_term_years".into(),
            reason: "Loan term must be at least one year.".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
