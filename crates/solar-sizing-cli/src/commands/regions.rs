use serde_json::Value;

use solar_sizing_core::policy;

/// List every seeded regional policy with its lookup key.
pub fn run_regions() -> Result<Value, Box<dyn std::error::Error>> {
    let rows: Vec<Value> = policy::all_policies()
        .into_iter()
        .map(|(key, p)| {
            serde_json::json!({
                "key": key,
                "name": p.name,
                "cmd_multiplier": p.cmd_multiplier.to_string(),
                "transformer_multiplier": p
                    .transformer_multiplier
                    .map(|m| m.to_string()),
                "description": p.description,
            })
        })
        .collect();

    Ok(serde_json::json!({ "results": rows }))
}
