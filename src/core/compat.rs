//! Compatibility Evaluator: per-eye range checks between a normalized
//! prescription and a lens's declared tolerances.

use crate::core::power::{cross_cylinder_values, is_cross_cylinder, is_regular_cross, round2, transpose};
use crate::domain::model::{AddRange, EyePower, PowerRange, Prescription};

fn within(value: f64, lo: f64, hi: f64) -> bool {
    value >= lo && value <= hi
}

/// One eye against one lens tolerance. Pure predicate; "incompatible" is
/// a normal outcome, never an error.
pub fn check_eye_power(eye: &EyePower, range: &PowerRange) -> bool {
    let sph = eye.sph;
    let cyl = eye.cyl;

    // Coarse pre-filter on the raw sphere, independent of cylinder.
    if !within(sph, range.rp_minus, range.rp_plus) {
        return false;
    }

    if is_cross_cylinder(sph, cyl) {
        let (t_sph, t_cyl) = cross_cylinder_values(sph, cyl);
        if !within(t_sph, range.rp_minus, range.rp_plus) {
            return false;
        }
        if t_cyl.abs() > range.max_cyl_cross.abs() {
            return false;
        }
        return within(t_cyl, range.max_cyl_minus, range.max_cyl_plus);
    }

    // Non-cross-cylinder path. Opposite signs still get transposed before
    // the sphere range check.
    let (final_sph, final_cyl) = if is_regular_cross(sph, cyl) {
        let (t_sph, t_cyl) = transpose(sph, cyl);
        if !within(t_sph, range.rp_minus, range.rp_plus) {
            return false;
        }
        (t_sph, t_cyl)
    } else {
        (sph, cyl)
    };

    let resultant = round2(final_sph + final_cyl);
    if !within(resultant, range.rp_minus, range.rp_plus) {
        return false;
    }
    within(final_cyl, range.max_cyl_minus, range.max_cyl_plus)
}

/// Both present eyes must pass; an absent eye passes trivially.
pub fn is_power_valid(rx: &Prescription, range: &PowerRange) -> bool {
    rx.eyes().all(|eye| check_eye_power(eye, range))
}

/// Addition power check for multifocal lens types. Present eyes only,
/// AND semantics like the power check; a missing ADD on a present eye
/// counts as 0.
pub fn is_addition_valid(rx: &Prescription, add_range: &AddRange) -> bool {
    rx.eyes()
        .all(|eye| within(eye.add, add_range.start, add_range.end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lens_range() -> PowerRange {
        PowerRange {
            rp_minus: -8.0,
            rp_plus: 4.0,
            max_cyl_minus: -4.0,
            max_cyl_plus: 2.0,
            max_cyl_cross: -6.0,
        }
    }

    fn eye(sph: f64, cyl: f64) -> EyePower {
        EyePower {
            sph,
            cyl,
            ..Default::default()
        }
    }

    fn right_only(e: EyePower) -> Prescription {
        Prescription {
            re: Some(e),
            le: None,
        }
    }

    #[test]
    fn plain_myopic_astigmatism_accepted() {
        // resultant -2.50 within [-8, 4], cylinder -0.50 within [-4, 2]
        assert!(check_eye_power(&eye(-2.0, -0.5), &lens_range()));
    }

    #[test]
    fn cross_cylinder_positive_sphere_evaluated_on_raw_values() {
        // SPH 2, CYL -3: cross-cylinder, but this sign pattern skips the
        // transposition. Raw sphere passes, |cyl| 3 <= |maxCylCross| 6,
        // cyl -3 within [-4, 2].
        assert!(check_eye_power(&eye(2.0, -3.0), &lens_range()));
    }

    #[test]
    fn regular_cross_power_transposed_before_range_check() {
        // SPH -6, CYL 1: opposite signs without cylinder dominance.
        // Transposed sphere -5 within [-8, 4], resultant -6, cyl -1.
        assert!(check_eye_power(&eye(-6.0, 1.0), &lens_range()));
    }

    #[test]
    fn raw_sphere_outside_range_rejected_early() {
        assert!(!check_eye_power(&eye(-9.0, 0.0), &lens_range()));
        assert!(!check_eye_power(&eye(5.0, -1.0), &lens_range()));
    }

    #[test]
    fn zero_max_cyl_cross_rejects_any_cross_cylinder() {
        let range = PowerRange {
            max_cyl_cross: 0.0,
            ..lens_range()
        };
        assert!(!check_eye_power(&eye(2.0, -3.0), &range));
        assert!(!check_eye_power(&eye(-0.5, 1.0), &range));
        // non-cross still fine
        assert!(check_eye_power(&eye(-2.0, -0.5), &range));
    }

    #[test]
    fn asymmetric_cross_cylinder_sub_cases() {
        // Regression: the two mirrored cross-cylinder patterns are not
        // handled symmetrically. With a tight sphere window the raw
        // sub-case passes on its raw sphere while the transposed mirror
        // lands outside the same window.
        let range = PowerRange {
            rp_minus: -1.2,
            rp_plus: 1.2,
            max_cyl_minus: -6.0,
            max_cyl_plus: 6.0,
            max_cyl_cross: 6.0,
        };
        assert!(check_eye_power(&eye(1.0, -2.5), &range));
        // transposed sphere 1.5 > 1.2
        assert!(!check_eye_power(&eye(-1.0, 2.5), &range));
    }

    #[test]
    fn narrowing_bounds_never_accepts_more() {
        let wide = lens_range();
        let narrow = PowerRange {
            rp_minus: -4.0,
            rp_plus: 2.0,
            max_cyl_minus: -2.0,
            max_cyl_plus: 1.0,
            max_cyl_cross: -3.0,
        };
        let mut sph = -7.0;
        while sph <= 5.0 {
            let mut cyl = -5.0;
            while cyl <= 5.0 {
                let e = eye(sph, cyl);
                if check_eye_power(&e, &narrow) {
                    assert!(
                        check_eye_power(&e, &wide),
                        "narrow accepted but wide rejected at sph={} cyl={}",
                        sph,
                        cyl
                    );
                }
                cyl += 0.25;
            }
            sph += 0.25;
        }
    }

    #[test]
    fn both_eyes_must_pass() {
        let rx = Prescription {
            re: Some(eye(-2.0, -0.5)),
            le: Some(eye(-9.0, 0.0)),
        };
        assert!(!is_power_valid(&rx, &lens_range()));
        assert!(is_power_valid(&right_only(eye(-2.0, -0.5)), &lens_range()));
    }

    #[test]
    fn empty_prescription_passes_permissively() {
        // Zero defaults sail through most ranges. Guarding against a
        // fully-empty prescription is the caller's job, not the core's.
        let rx = Prescription {
            re: Some(eye(0.0, 0.0)),
            le: Some(eye(0.0, 0.0)),
        };
        assert!(is_power_valid(&rx, &lens_range()));
        assert!(is_power_valid(&Prescription::default(), &lens_range()));
    }

    #[test]
    fn addition_checked_on_present_eyes_only() {
        let add_range = AddRange {
            start: 1.0,
            end: 3.5,
        };
        let rx = right_only(EyePower {
            sph: -6.0,
            cyl: 1.0,
            axis: 0.0,
            add: 2.0,
        });
        assert!(is_addition_valid(&rx, &add_range));

        let rx = Prescription {
            re: Some(EyePower {
                add: 2.0,
                ..Default::default()
            }),
            le: Some(EyePower {
                add: 4.0,
                ..Default::default()
            }),
        };
        assert!(!is_addition_valid(&rx, &add_range));

        // present eye with no ADD defaults to 0, outside [1.0, 3.5]
        let rx = right_only(eye(-1.0, 0.0));
        assert!(!is_addition_valid(&rx, &add_range));
    }
}
