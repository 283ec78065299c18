pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_catalog_source, validate_non_empty_string, validate_path, validate_range, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(
    feature = "cli",
    command(
        name = "lensmatch",
        about = "Filter a lens catalog against an optical prescription"
    )
)]
pub struct CliConfig {
    /// Catalog JSON: an http(s) endpoint or a local file path.
    #[cfg_attr(feature = "cli", arg(long, default_value = "./data/lensData.json"))]
    pub catalog: String,

    /// Path to a prescription JSON file ({ RE, LE } or flat { sph, cyl }).
    #[cfg_attr(feature = "cli", arg(long))]
    pub prescription: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "sv-far"))]
    pub lens_type: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "acetate"))]
    pub frame_type: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "./output"))]
    pub output_path: String,

    /// Catalog request timeout in seconds.
    #[cfg_attr(feature = "cli", arg(long))]
    pub timeout_seconds: Option<u64>,

    /// Optional TOML session file; values there override these flags.
    #[cfg_attr(feature = "cli", arg(long))]
    pub config: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Log CPU/memory per phase"))]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn catalog_source(&self) -> &str {
        &self.catalog
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn lens_type(&self) -> &str {
        &self.lens_type
    }

    fn frame_type(&self) -> &str {
        &self.frame_type
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_catalog_source("catalog", &self.catalog)?;
        validate_path("prescription", &self.prescription)?;
        validate_non_empty_string("output_path", &self.output_path)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, 600)?;
        }
        // Lens/frame strings are parsed into their enums here so a typo
        // fails before any fetch happens.
        self.lens_type.parse::<crate::domain::model::LensType>()?;
        self.frame_type.parse::<crate::domain::model::FrameType>()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            catalog: "https://example.com/lensData.json".to_string(),
            prescription: "./rx.json".to_string(),
            lens_type: "sv-far".to_string(),
            frame_type: "acetate".to_string(),
            output_path: "./output".to_string(),
            timeout_seconds: None,
            config: None,
            verbose: false,
            monitor: false,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn bad_lens_or_frame_type_fails_before_any_fetch() {
        let mut config = base_config();
        config.lens_type = "varifocal".to_string();
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.frame_type = "wooden".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn timeout_out_of_range_rejected() {
        let mut config = base_config();
        config.timeout_seconds = Some(0);
        assert!(config.validate().is_err());

        config.timeout_seconds = Some(30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_catalog_source_rejected() {
        let mut config = base_config();
        config.catalog = String::new();
        assert!(config.validate().is_err());
    }
}
