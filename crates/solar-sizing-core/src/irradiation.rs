use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::Units;

/// Yield assumed for PIN codes absent from the survey data.
pub const DEFAULT_YIELD_FACTOR: Decimal = dec!(4.5);

/// Expected generation in units per kW of installed capacity per day for a
/// postal PIN code. Exact match only; unsurveyed codes fall back to
/// [`DEFAULT_YIELD_FACTOR`]. Never fails.
pub fn yield_factor(pin_code: &str) -> Units {
    match pin_code {
        // Telangana
        "500001" | "500003" | "500016" | "500081" => dec!(5.2), // Hyderabad
        // Andhra Pradesh
        "520001" => dec!(5.4), // Vijayawada
        "530001" => dec!(5.3), // Visakhapatnam
        "517501" => dec!(5.5), // Tirupati
        // Karnataka
        "560001" | "560066" => dec!(5.0), // Bangalore
        // Tamil Nadu
        "600001" => dec!(5.3), // Chennai
        "641001" => dec!(5.4), // Coimbatore
        // Maharashtra
        "400001" => dec!(5.1), // Mumbai
        "411001" => dec!(5.2), // Pune
        _ => DEFAULT_YIELD_FACTOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_pin_code() {
        assert_eq!(yield_factor("500001"), dec!(5.2));
        assert_eq!(yield_factor("517501"), dec!(5.5));
    }

    #[test]
    fn test_unknown_pin_code_defaults() {
        assert_eq!(yield_factor("110001"), DEFAULT_YIELD_FACTOR);
        assert_eq!(yield_factor(""), DEFAULT_YIELD_FACTOR);
    }

    #[test]
    fn test_no_partial_match() {
        // A prefix of a surveyed code is still a miss
        assert_eq!(yield_factor("5000"), DEFAULT_YIELD_FACTOR);
        assert_eq!(yield_factor("5000011"), DEFAULT_YIELD_FACTOR);
    }
}
