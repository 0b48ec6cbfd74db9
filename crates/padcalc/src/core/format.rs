//! Number formatting for the display

/// Magnitudes at or above this render in exponent form
const EXPONENT_ABOVE: f64 = 1e21;
/// Non-zero magnitudes below this render in exponent form
const EXPONENT_BELOW: f64 = 1e-7;

/// Formats a computed value for the display
///
/// Values that survive truncation to `i64` unchanged render as integers
/// (`25`, not `25.0`). Everything else uses the shortest decimal that
/// round-trips, switching to exponent form for very large or very small
/// magnitudes. Non-finite values render as `Infinity`, `-Infinity`, `NaN`.
#[must_use]
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return text.to_string();
    }

    // `as i64` saturates, so 2^63 would otherwise pass the round-trip check
    if value >= i64::MIN as f64 && value < i64::MAX as f64 {
        let truncated = value as i64;
        if truncated as f64 == value {
            return truncated.to_string();
        }
    }

    let magnitude = value.abs();
    if magnitude >= EXPONENT_ABOVE || magnitude < EXPONENT_BELOW {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_drop_fraction() {
        assert_eq!(format_value(15.0), "15");
        assert_eq!(format_value(-5.0), "-5");
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(-0.0), "0");
        assert_eq!(format_value(25.0), "25");
    }

    #[test]
    fn test_fractions_use_shortest_roundtrip() {
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_value(1.0 / 3.0), "0.3333333333333333");
    }

    #[test]
    fn test_large_integral_beyond_i64_is_not_truncated() {
        assert_eq!(format_value(1e19), "10000000000000000000");
    }

    #[test]
    fn test_i64_boundary_is_not_saturated() {
        assert_eq!(format_value(9_223_372_036_854_775_808.0), "9223372036854775808");
        assert_eq!(format_value(-9_223_372_036_854_775_808.0), "-9223372036854775808");
        assert_eq!(format_value(4_294_967_296.0 * 2_147_483_648.0), "9223372036854775808");
    }

    #[test]
    fn test_extreme_magnitudes_use_exponent() {
        assert_eq!(format_value(1e300), "1e300");
        assert_eq!(format_value(1.5e-8), "1.5e-8");
    }

    #[test]
    fn test_non_finite_values() {
        assert_eq!(format_value(f64::INFINITY), "Infinity");
        assert_eq!(format_value(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_value(f64::NAN), "NaN");
    }
}
