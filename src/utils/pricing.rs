//! Store-side SRP derivation: `(lens × 4) + (fitting × 2) + accessories`.
//! Pricing policy lives outside the compatibility core; this backs the
//! `srp_calc` helper binary only.

/// Suggested retail price from component costs.
pub fn suggested_retail_price(lens_cost: f64, fitting_cost: f64, accessories: f64) -> f64 {
    (lens_cost * 4.0) + (fitting_cost * 2.0) + accessories
}

/// Applies a percentage discount to an SRP.
pub fn apply_discount(srp: f64, discount_percent: f64) -> f64 {
    srp - (srp * discount_percent) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srp_formula() {
        assert_eq!(suggested_retail_price(5000.0, 1500.0, 2000.0), 25000.0);
        assert_eq!(suggested_retail_price(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn discount_application() {
        assert_eq!(apply_discount(25000.0, 10.0), 22500.0);
        assert_eq!(apply_discount(25000.0, 0.0), 25000.0);
    }
}
