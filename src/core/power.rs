//! Power normalization and cylinder transposition.
//!
//! A spherocylindrical prescription has two equivalent notations related
//! by the transposition identity `SPH' = SPH + CYL`, `CYL' = -CYL` (the
//! axis shifts 90 degrees but only magnitudes matter for range checks).
//! Manufacturers declare tolerances in one canonical orientation, so a
//! prescription written in the other must be detected and converted
//! before any comparison, or compatible prescriptions get rejected.

use serde_json::Value;

/// Boundary coercion for prescription/catalog power fields: numbers pass
/// through, numeric strings are trimmed and parsed, everything else
/// (null, empty string, garbage) becomes `0`.
pub fn coerce_power(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().trim_matches('"').parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Rounds to 2 decimals. Resultant-power sums go through this before any
/// range comparison to keep floating-point artifacts out of the verdict.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Cross-cylinder detection: sphere and cylinder carry strictly opposite
/// signs and the cylinder magnitude dominates.
pub fn is_cross_cylinder(sph: f64, cyl: f64) -> bool {
    let opposite = (sph > 0.0 && cyl < 0.0) || (sph < 0.0 && cyl > 0.0);
    opposite && sph.abs() < cyl.abs()
}

/// Regular cross power: opposite signs regardless of which magnitude
/// dominates. Used only on the non-cross-cylinder evaluation path.
pub fn is_regular_cross(sph: f64, cyl: f64) -> bool {
    sph * cyl < 0.0
}

/// The transposition identity. Applying it twice is the identity on
/// `(sph, cyl)`.
pub fn transpose(sph: f64, cyl: f64) -> (f64, f64) {
    (sph + cyl, -cyl)
}

/// Cross-cylinder values as fed into the range checks. Only the
/// `SPH < 0, CYL > 0` sub-case is transposed; the mirror sub-case is
/// detected as cross-cylinder but evaluated on raw values. Historical
/// behavior, kept as-is (see DESIGN.md).
pub fn cross_cylinder_values(sph: f64, cyl: f64) -> (f64, f64) {
    if sph < 0.0 && cyl > 0.0 {
        transpose(sph, cyl)
    } else {
        (sph, cyl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerce_handles_strings_numbers_and_junk() {
        assert_eq!(coerce_power(&json!(-2.5)), -2.5);
        assert_eq!(coerce_power(&json!("-2.50")), -2.5);
        assert_eq!(coerce_power(&json!(" 1.75 ")), 1.75);
        assert_eq!(coerce_power(&json!("\"0.5\"")), 0.5);
        assert_eq!(coerce_power(&json!("")), 0.0);
        assert_eq!(coerce_power(&json!("abc")), 0.0);
        assert_eq!(coerce_power(&Value::Null), 0.0);
        assert_eq!(coerce_power(&json!(true)), 0.0);
    }

    #[test]
    fn round2_kills_float_artifacts() {
        assert_eq!(round2(0.1 + 0.2), 0.3);
        assert_eq!(round2(-2.004999), -2.0);
        assert_eq!(round2(-2.505), -2.5);
    }

    #[test]
    fn cross_cylinder_needs_opposite_signs_and_dominant_cylinder() {
        assert!(is_cross_cylinder(2.0, -3.0));
        assert!(is_cross_cylinder(-1.0, 2.5));
        // magnitude does not dominate
        assert!(!is_cross_cylinder(-6.0, 1.0));
        assert!(!is_cross_cylinder(3.0, -3.0));
        // same signs or zero
        assert!(!is_cross_cylinder(-2.0, -4.0));
        assert!(!is_cross_cylinder(0.0, -3.0));
        assert!(!is_cross_cylinder(2.0, 0.0));
    }

    #[test]
    fn regular_cross_is_sign_based_only() {
        assert!(is_regular_cross(-6.0, 1.0));
        assert!(is_regular_cross(2.0, -3.0));
        assert!(!is_regular_cross(-2.0, -0.5));
        assert!(!is_regular_cross(2.0, 0.0));
    }

    #[test]
    fn transposition_round_trips_exactly() {
        let cases = [(2.0, -3.0), (-1.0, 2.5), (-6.0, 1.0), (0.25, -4.75)];
        for (sph, cyl) in cases {
            let (ts, tc) = transpose(sph, cyl);
            let (back_s, back_c) = transpose(ts, tc);
            assert_eq!(back_s, sph);
            assert_eq!(back_c, cyl);
        }
    }

    #[test]
    fn only_negative_sphere_sub_case_is_transposed() {
        // SPH < 0, CYL > 0: transposed
        assert_eq!(cross_cylinder_values(-1.0, 2.5), (1.5, -2.5));
        // SPH > 0, CYL < 0: raw values pass through
        assert_eq!(cross_cylinder_values(1.0, -2.5), (1.0, -2.5));
    }
}
