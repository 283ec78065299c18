use crate::core::power::coerce_power;
use crate::utils::error::{LensError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// One eye's prescription after boundary normalization. Absent or
/// unparsable fields are already coerced to `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EyePower {
    pub sph: f64,
    pub cyl: f64,
    /// 1-180 degrees; only meaningful alongside a non-zero cylinder.
    pub axis: f64,
    pub add: f64,
}

impl EyePower {
    pub fn from_raw(raw: &RawEyePower) -> Self {
        Self {
            sph: raw.sph.as_ref().map(coerce_power).unwrap_or(0.0),
            cyl: raw.cyl.as_ref().map(coerce_power).unwrap_or(0.0),
            axis: raw.axis.as_ref().map(coerce_power).unwrap_or(0.0),
            add: raw.add.as_ref().map(coerce_power).unwrap_or(0.0),
        }
    }

    /// Raw resultant power, untransposed.
    pub fn resultant(&self) -> f64 {
        self.sph + self.cyl
    }
}

/// Wire shape of one eye: every field may be a string, a number, or null,
/// under either upper- or lower-case names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEyePower {
    #[serde(default, alias = "SPH")]
    pub sph: Option<Value>,
    #[serde(default, alias = "CYL")]
    pub cyl: Option<Value>,
    #[serde(default, alias = "AXIS")]
    pub axis: Option<Value>,
    #[serde(default, alias = "ADD")]
    pub add: Option<Value>,
}

/// A pair of optional eye powers. Immutable input for the duration of one
/// filtering pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub re: Option<EyePower>,
    pub le: Option<EyePower>,
}

impl Prescription {
    /// Normalizes either wire shape: `{ RE: {...}, LE: {...} }` (field
    /// names case-insensitive) or the flat legacy `{ sph, cyl }` object,
    /// which maps onto the right eye.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| LensError::ValidationError {
            message: "prescription must be a JSON object".to_string(),
        })?;

        let eye_keyed = ["RE", "LE", "re", "le"].iter().any(|k| map.contains_key(*k));
        if !eye_keyed {
            // Flat fallback shape used by legacy/demo callers.
            let raw: RawEyePower = serde_json::from_value(value.clone())?;
            return Ok(Self {
                re: Some(EyePower::from_raw(&raw)),
                le: None,
            });
        }

        let parse_eye = |key_upper: &str, key_lower: &str| -> Result<Option<EyePower>> {
            match map.get(key_upper).or_else(|| map.get(key_lower)) {
                Some(Value::Null) | None => Ok(None),
                Some(v) => {
                    let raw: RawEyePower = serde_json::from_value(v.clone())?;
                    Ok(Some(EyePower::from_raw(&raw)))
                }
            }
        };

        Ok(Self {
            re: parse_eye("RE", "re")?,
            le: parse_eye("LE", "le")?,
        })
    }

    /// Present eyes, right then left.
    pub fn eyes(&self) -> impl Iterator<Item = &EyePower> {
        self.re.iter().chain(self.le.iter())
    }

    /// True when nothing usable was entered. The core itself stays
    /// permissive about this; callers are expected to guard before
    /// filtering (an all-zero prescription passes most range checks).
    pub fn is_empty(&self) -> bool {
        self.eyes()
            .all(|e| e.sph == 0.0 && e.cyl == 0.0 && e.axis == 0.0 && e.add == 0.0)
    }
}

/// A lens product's declared optical tolerance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PowerRange {
    #[serde(deserialize_with = "de_f64_loose")]
    pub rp_minus: f64,
    #[serde(deserialize_with = "de_f64_loose")]
    pub rp_plus: f64,
    #[serde(deserialize_with = "de_f64_loose")]
    pub max_cyl_minus: f64,
    #[serde(deserialize_with = "de_f64_loose")]
    pub max_cyl_plus: f64,
    /// Zero means cross-cylinder prescriptions are unsupported.
    #[serde(deserialize_with = "de_f64_loose")]
    pub max_cyl_cross: f64,
}

/// Inclusive bounds on addition power, multifocal types only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddRange {
    #[serde(deserialize_with = "de_f64_loose")]
    pub start: f64,
    #[serde(deserialize_with = "de_f64_loose")]
    pub end: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LensType {
    SvNear,
    SvFar,
    SvFarContact,
    MfBifocal,
    MfProgressive,
    MfContact,
}

impl LensType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LensType::SvNear => "sv-near",
            LensType::SvFar => "sv-far",
            LensType::SvFarContact => "sv-far-contact",
            LensType::MfBifocal => "mf-bifocal",
            LensType::MfProgressive => "mf-progressive",
            LensType::MfContact => "mf-contact",
        }
    }

    pub fn is_multifocal(&self) -> bool {
        matches!(
            self,
            LensType::MfBifocal | LensType::MfProgressive | LensType::MfContact
        )
    }
}

impl FromStr for LensType {
    type Err = LensError;

    // The selection arrives JSON.stringify'd from the UI shell, so quotes
    // and casing are stripped before matching.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_matches('"').to_ascii_lowercase().as_str() {
            "sv-near" => Ok(LensType::SvNear),
            "sv-far" => Ok(LensType::SvFar),
            "sv-far-contact" => Ok(LensType::SvFarContact),
            "mf-bifocal" => Ok(LensType::MfBifocal),
            "mf-progressive" => Ok(LensType::MfProgressive),
            "mf-contact" => Ok(LensType::MfContact),
            other => Err(LensError::ValidationError {
                message: format!("unknown lens type: '{}'", other),
            }),
        }
    }
}

impl fmt::Display for LensType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LensType {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LensType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    Acetate,
    FullMetal,
    HalfMetal,
    Rimless,
}

impl FrameType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameType::Acetate => "acetate",
            FrameType::FullMetal => "full-metal",
            FrameType::HalfMetal => "half-metal",
            FrameType::Rimless => "rimless",
        }
    }
}

impl FromStr for FrameType {
    type Err = LensError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_matches('"').to_ascii_lowercase().as_str() {
            "acetate" => Ok(FrameType::Acetate),
            "full-metal" => Ok(FrameType::FullMetal),
            "half-metal" => Ok(FrameType::HalfMetal),
            "rimless" => Ok(FrameType::Rimless),
            other => Err(LensError::ValidationError {
                message: format!("unknown frame type: '{}'", other),
            }),
        }
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Thickness {
    #[serde(deserialize_with = "de_f64_loose")]
    pub index: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One catalog entry. Immutable once loaded; the filter never mutates
/// entries. Sparse records still parse: every commercial field defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LensProduct {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub lens_type: LensType,
    pub power_range: PowerRange,
    pub add_range: Option<AddRange>,
    pub is_high_cyl: bool,

    // Commercial/display attributes. Irrelevant to the optics checks
    // except for pricing order and the delivery-time re-sort.
    pub lens_material_country: String,
    pub poster: String,
    pub time: String,
    pub thickness: Thickness,
    pub lens_coating_warranty: String,
    pub frame_type_recommended: Vec<String>,
    #[serde(deserialize_with = "de_f64_loose")]
    pub srp: f64,
    #[serde(deserialize_with = "de_f64_loose")]
    pub special_price: f64,
    pub photochromic_colors: Vec<String>,

    pub filter_blue_violet_light: bool,
    pub photochromic: bool,
    pub unbreakable: bool,
    pub tintable: bool,
    pub clear: bool,
    pub resist_scratches: bool,
    pub reduces_glare: bool,
    pub sun_uv_protection: bool,
    pub low_reflection: bool,
    pub repels_water: bool,
    pub resist_smudges: bool,
    pub repels_dust: bool,
    pub allow_essential_blue_light: bool,
    pub drive_plus: bool,
    pub authenticity_card: bool,
    pub lens_material_warranty: bool,
}

impl Default for LensProduct {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            brand: String::new(),
            lens_type: LensType::SvFar,
            power_range: PowerRange::default(),
            add_range: None,
            is_high_cyl: false,
            lens_material_country: String::new(),
            poster: String::new(),
            time: String::new(),
            thickness: Thickness::default(),
            lens_coating_warranty: String::new(),
            frame_type_recommended: Vec::new(),
            srp: 0.0,
            special_price: 0.0,
            photochromic_colors: Vec::new(),
            filter_blue_violet_light: false,
            photochromic: false,
            unbreakable: false,
            tintable: false,
            clear: false,
            resist_scratches: false,
            reduces_glare: false,
            sun_uv_protection: false,
            low_reflection: false,
            repels_water: false,
            resist_smudges: false,
            repels_dust: false,
            allow_essential_blue_light: false,
            drive_plus: false,
            authenticity_card: false,
            lens_material_warranty: false,
        }
    }
}

/// Output of one filtering pass.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub matched: Vec<LensProduct>,
    pub total_considered: usize,
    pub csv_output: String,
}

fn de_f64_loose<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_power).unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prescription_accepts_both_field_casings() {
        let value = json!({
            "RE": { "SPH": "-2.00", "CYL": "-0.50", "AXIS": "90", "ADD": "" },
            "le": { "sph": -1.25, "cyl": null }
        });
        let rx = Prescription::from_value(&value).unwrap();
        let re = rx.re.unwrap();
        assert_eq!(re.sph, -2.0);
        assert_eq!(re.cyl, -0.5);
        assert_eq!(re.axis, 90.0);
        assert_eq!(re.add, 0.0);
        let le = rx.le.unwrap();
        assert_eq!(le.sph, -1.25);
        assert_eq!(le.cyl, 0.0);
    }

    #[test]
    fn flat_legacy_shape_maps_to_right_eye() {
        let value = json!({ "sph": "2", "cyl": "-3" });
        let rx = Prescription::from_value(&value).unwrap();
        assert_eq!(rx.re.unwrap().sph, 2.0);
        assert_eq!(rx.re.unwrap().cyl, -3.0);
        assert!(rx.le.is_none());
    }

    #[test]
    fn empty_prescription_detected() {
        let value = json!({
            "RE": { "SPH": "", "CYL": "", "AXIS": "", "ADD": "" },
            "LE": { "SPH": "", "CYL": "", "AXIS": "", "ADD": "" }
        });
        let rx = Prescription::from_value(&value).unwrap();
        assert!(rx.is_empty());

        let value = json!({ "RE": { "SPH": "-0.25" } });
        assert!(!Prescription::from_value(&value).unwrap().is_empty());
    }

    #[test]
    fn lens_type_parse_is_case_insensitive_and_quote_stripped() {
        assert_eq!("\"sv-near\"".parse::<LensType>().unwrap(), LensType::SvNear);
        assert_eq!(
            "MF-Progressive".parse::<LensType>().unwrap(),
            LensType::MfProgressive
        );
        assert!("varifocal".parse::<LensType>().is_err());
        assert!(LensType::MfContact.is_multifocal());
        assert!(!LensType::SvFarContact.is_multifocal());
    }

    #[test]
    fn sparse_catalog_record_parses_with_string_numbers() {
        let value = json!({
            "id": "lens-1",
            "name": "Crizal Sapphire",
            "brand": "Essilor",
            "lensType": "sv-far",
            "powerRange": {
                "rpMinus": "-8", "rpPlus": "4",
                "maxCylMinus": "-4", "maxCylPlus": "2", "maxCylCross": "-6"
            },
            "srp": "5400",
            "specialPrice": 4300
        });
        let lens: LensProduct = serde_json::from_value(value).unwrap();
        assert_eq!(lens.power_range.rp_minus, -8.0);
        assert_eq!(lens.power_range.max_cyl_cross, -6.0);
        assert_eq!(lens.srp, 5400.0);
        assert_eq!(lens.special_price, 4300.0);
        assert!(!lens.is_high_cyl);
        assert!(lens.add_range.is_none());
    }
}
