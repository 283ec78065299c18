//! Catalog Filter: applies the compatibility evaluator plus categorical
//! gates across the full catalog, then deduplicates and orders the
//! eligible subset.

use crate::core::compat::{is_addition_valid, is_power_valid};
use crate::core::power::is_cross_cylinder;
use crate::domain::model::{FrameType, LensProduct, LensType, Prescription};
use crate::utils::error::Result;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::OnceLock;

/// Everything one filtering pass needs, passed explicitly. The filter
/// never reads ambient state.
#[derive(Debug, Clone)]
pub struct FilterContext {
    pub prescription: Prescription,
    pub lens_type: LensType,
    pub frame_type: FrameType,
}

impl FilterContext {
    pub fn new(prescription: Prescription, lens_type: &str, frame_type: &str) -> Result<Self> {
        Ok(Self {
            prescription,
            lens_type: LensType::from_str(lens_type)?,
            frame_type: FrameType::from_str(frame_type)?,
        })
    }
}

/// Presentation-level re-sort keys for an already-filtered set. The
/// baseline ordering stays ascending declared retail price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Srp,
    SpecialPrice,
    DeliveryTime,
}

fn polycarbonate_marker() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| regex::Regex::new(r"(?i)poly[\s-]?carbonate").unwrap())
}

/// Per-candidate predicate, short-circuiting in the documented order.
pub fn lens_matches(ctx: &FilterContext, lens: &LensProduct) -> bool {
    // Polycarbonate lenses are only offered on rimless frames; a
    // materials rule, not an optics one.
    if polycarbonate_marker().is_match(&lens.name) && ctx.frame_type != FrameType::Rimless {
        return false;
    }

    if lens.lens_type != ctx.lens_type {
        return false;
    }

    if ctx.lens_type.is_multifocal() {
        // A multifocal record without declared bounds is unconstrained.
        if let Some(add_range) = &lens.add_range {
            if !is_addition_valid(&ctx.prescription, add_range) {
                return false;
            }
        }
    }

    let range = &lens.power_range;
    let any_cross = ctx
        .prescription
        .eyes()
        .any(|eye| is_cross_cylinder(eye.sph, eye.cyl));

    if any_cross {
        // Raw-sign re-check supersedes the per-eye power verdict for
        // cross-cylinder prescriptions: a zero maxCylCross means the lens
        // cannot serve them at all, otherwise both eyes' raw cylinder
        // magnitudes must fit.
        if range.max_cyl_cross == 0.0 {
            return false;
        }
        if !ctx
            .prescription
            .eyes()
            .all(|eye| eye.cyl.abs() <= range.max_cyl_cross.abs())
        {
            return false;
        }
    } else if !is_power_valid(&ctx.prescription, range) {
        return false;
    }

    // High-cylinder gate: |CYL| > 2 needs the specialized variant.
    let any_high_cyl = ctx.prescription.eyes().any(|eye| eye.cyl.abs() > 2.0);
    if any_high_cyl && !lens.is_high_cyl {
        return false;
    }

    if lens.is_high_cyl {
        // Fine-grained raw resultant bounds, untransposed. Fails closed.
        for eye in ctx.prescription.eyes() {
            let resultant = eye.resultant();
            if resultant < 0.0 && (-2.0..=0.0).contains(&eye.cyl) && resultant < range.rp_minus {
                return false;
            }
            if resultant >= 0.0 && (0.0..=2.0).contains(&eye.cyl) && resultant > range.rp_plus {
                return false;
            }
        }
    }

    true
}

/// Eligible subset of the catalog, deduplicated by display name and
/// ordered ascending by declared retail price. Empty catalog gives an
/// empty result, never an error.
pub fn filter_catalog(ctx: &FilterContext, catalog: &[LensProduct]) -> Vec<LensProduct> {
    let mut matched: Vec<LensProduct> = catalog
        .iter()
        .filter(|lens| lens_matches(ctx, lens))
        .cloned()
        .collect();
    tracing::debug!(
        "{} of {} catalog entries compatible",
        matched.len(),
        catalog.len()
    );

    matched = dedup_by_name(matched);
    matched.sort_by(|a, b| a.srp.total_cmp(&b.srp));
    matched
}

/// Keeps the lowest special-priced entry per display name, preserving
/// first-occurrence order. Idempotent.
pub fn dedup_by_name(lenses: Vec<LensProduct>) -> Vec<LensProduct> {
    let mut kept: Vec<LensProduct> = Vec::with_capacity(lenses.len());
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for lens in lenses {
        match by_name.get(&lens.name) {
            Some(&idx) => {
                if lens.special_price < kept[idx].special_price {
                    kept[idx] = lens;
                }
            }
            None => {
                by_name.insert(lens.name.clone(), kept.len());
                kept.push(lens);
            }
        }
    }
    kept
}

/// Reorders an already-filtered set for presentation. Does not touch the
/// eligibility verdicts.
pub fn sort_matched(lenses: &mut [LensProduct], key: SortKey) {
    match key {
        SortKey::Srp => lenses.sort_by(|a, b| a.srp.total_cmp(&b.srp)),
        SortKey::SpecialPrice => lenses.sort_by(|a, b| a.special_price.total_cmp(&b.special_price)),
        SortKey::DeliveryTime => lenses.sort_by_key(|lens| delivery_days(&lens.time)),
    }
}

/// Leading day count of a `"N days"` / `"N-M days"` delivery string.
/// Entries without one sort last.
fn delivery_days(time: &str) -> u64 {
    let digits: String = time
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(u64::MAX)
}
