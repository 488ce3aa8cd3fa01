use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use solar_sizing_core::assessment::{FinancingInputs, SiteInputs};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

#[derive(Deserialize)]
struct AssessmentRequest {
    site: SiteInputs,
    financing: FinancingInputs,
}

#[derive(Deserialize)]
struct AmortizeRequest {
    principal: rust_decimal::Decimal,
    annual_rate_percent: rust_decimal::Decimal,
    years: u32,
}

// ---------------------------------------------------------------------------
// Assessment engine
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_assessment(input_json: String) -> NapiResult<String> {
    let request: AssessmentRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        solar_sizing_core::assessment::calculate_assessment(&request.site, &request.financing)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loan schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let request: AmortizeRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let schedule = solar_sizing_core::loan::amortization_schedule(
        request.principal,
        request.annual_rate_percent,
        request.years,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&schedule).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

#[napi]
pub fn list_region_policies() -> NapiResult<String> {
    let policies: Vec<serde_json::Value> = solar_sizing_core::policy::all_policies()
        .into_iter()
        .map(|(key, policy)| {
            serde_json::json!({
                "key": key,
                "policy": policy,
            })
        })
        .collect();
    serde_json::to_string(&policies).map_err(to_napi_error)
}
