use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Regulatory caps a state places on rooftop generation capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionPolicy {
    pub name: String,
    /// Fraction of contracted demand (CMD) allowed as installed capacity.
    pub cmd_multiplier: Decimal,
    /// Fraction of transformer rating allowed, where the state regulates it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformer_multiplier: Option<Decimal>,
    pub description: String,
}

/// Region key used when a lookup misses.
pub const DEFAULT_REGION_KEY: &str = "telangana";

/// Policy for a region key. Exact match; unknown keys resolve to the
/// Telangana policy rather than failing, so an assessment can always be
/// produced from incomplete survey data.
pub fn policy_for(region_key: &str) -> RegionPolicy {
    let mut policies = all_policies();
    match policies.iter().position(|(key, _)| *key == region_key) {
        Some(pos) => policies.swap_remove(pos).1,
        // Index 0 is the default region
        None => policies.swap_remove(0).1,
    }
}

/// Every seeded region with its lookup key, in display order.
pub fn all_policies() -> Vec<(&'static str, RegionPolicy)> {
    vec![
        ("telangana", RegionPolicy {
            name: "Telangana".into(),
            cmd_multiplier: dec!(0.80),
            transformer_multiplier: Some(dec!(0.50)),
            description: "Min of 80% CMD or 50% transformer capacity".into(),
        }),
        ("andhra_pradesh", RegionPolicy {
            name: "Andhra Pradesh".into(),
            cmd_multiplier: dec!(1.00),
            transformer_multiplier: None,
            description: "100% of CMD allowed".into(),
        }),
        ("karnataka", RegionPolicy {
            name: "Karnataka".into(),
            cmd_multiplier: dec!(1.00),
            transformer_multiplier: None,
            description: "100% of CMD allowed".into(),
        }),
        ("tamil_nadu", RegionPolicy {
            name: "Tamil Nadu".into(),
            cmd_multiplier: dec!(1.00),
            transformer_multiplier: None,
            description: "100% of CMD allowed".into(),
        }),
        ("maharashtra", RegionPolicy {
            name: "Maharashtra".into(),
            cmd_multiplier: dec!(1.00),
            transformer_multiplier: None,
            description: "100% of CMD allowed".into(),
        }),
    ]
}
