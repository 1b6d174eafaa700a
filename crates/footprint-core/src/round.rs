//! Decimal rounding for displayed quantities.
//!
//! Kilograms are shown to 3 decimals and emissions to 2. Both use round half
//! away from zero, which is what [`f64::round`] does.

/// Decimal places for kilogram quantities.
pub const KG_DECIMALS: u32 = 3;

/// Decimal places for emissions values.
pub const CO2_DECIMALS: u32 = 2;

/// Values at or above this magnitude, once scaled, have no fractional part.
const MAX_EXACT_SCALED: f64 = 4_503_599_627_370_496.0; // 2^52

/// Round `value` half away from zero to `decimals` places.
///
/// Non-finite input is returned unchanged, and so are values too large to
/// carry `decimals` fractional digits.
#[must_use]
pub fn round_dp(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    let scaled = value * scale;
    if !scaled.is_finite() || scaled.abs() >= MAX_EXACT_SCALED {
        return value;
    }
    scaled.round() / scale
}

/// Round a kilogram quantity for display.
#[must_use]
pub fn round_kg(value: f64) -> f64 {
    round_dp(value, KG_DECIMALS)
}

/// Round an emissions value for display.
#[must_use]
pub fn round_co2(value: f64) -> f64 {
    round_dp(value, CO2_DECIMALS)
}

/// Add an emissions value to a running sum, rounding the result to 2 decimals.
///
/// Each step lands on the nearest `f64` to the exact decimal sum, so the
/// result does not depend on how the additions were grouped. Sums too large
/// to carry 2 decimals fall back to plain `f64` addition, where grouping can
/// move the last bits.
#[must_use]
pub fn add_co2(sum: f64, co2: f64) -> f64 {
    round_co2(sum + co2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_dp(2.5, 0), 3.0);
        assert_eq!(round_dp(-2.5, 0), -3.0);
        assert_eq!(round_dp(0.125, 2), 0.13);
        assert_eq!(round_dp(1.0, 3), 1.0);
    }

    #[test]
    fn test_round_kg_and_co2() {
        assert_eq!(round_kg(3.0 * 0.18), 0.54);
        assert_eq!(round_kg(0.453_592_37), 0.454);
        assert_eq!(round_co2(6.9 * 1.0), 6.9);
        assert_eq!(round_co2(21.0 * 0.25), 5.25);
    }

    #[test]
    fn test_round_non_finite_passthrough() {
        assert!(round_dp(f64::NAN, 2).is_nan());
        assert_eq!(round_dp(f64::INFINITY, 2), f64::INFINITY);
    }

    #[test]
    fn test_round_huge_values_unchanged() {
        let huge = 6.0e21;
        assert_eq!(round_co2(huge), huge);
        assert_eq!(round_kg(1.0e20), 1.0e20);
        assert_eq!(round_co2(f64::MAX), f64::MAX);
    }

    #[test]
    fn test_add_co2() {
        assert_eq!(add_co2(0.1, 0.2), 0.3);
        assert_eq!(add_co2(add_co2(0.0, 6.9), 5.25), 12.15);

        let big = 6.0e21;
        assert_eq!(add_co2(0.0, big), big);
        assert_eq!(add_co2(big, big), 1.2e22);
    }
}
