use crate::config::CliConfig;
use crate::utils::error::{LensError, Result};
use crate::utils::validation::{
    validate_catalog_source, validate_non_empty_string, validate_path, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A stored matching session: catalog source, selection context, and
/// output settings in one reusable file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub session: SessionConfig,
    pub source: SourceConfig,
    pub selection: SelectionConfig,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Catalog endpoint or local file path.
    pub catalog: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub lens_type: String,
    pub frame_type: String,
    pub prescription_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LensError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| LensError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` markers with environment values; unknown
    /// variables are left verbatim.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// Overlays this session file onto the CLI flags.
    pub fn apply(&self, config: &mut CliConfig) {
        config.catalog = self.source.catalog.clone();
        config.lens_type = self.selection.lens_type.clone();
        config.frame_type = self.selection.frame_type.clone();
        config.prescription = self.selection.prescription_path.clone();
        config.output_path = self.load.output_path.clone();
        if let Some(timeout) = self.source.timeout_seconds {
            config.timeout_seconds = Some(timeout);
        }
        if let Some(monitoring) = &self.monitoring {
            config.monitor = monitoring.enabled;
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("session.name", &self.session.name)?;
        validate_catalog_source("source.catalog", &self.source.catalog)?;
        if let Some(timeout) = self.source.timeout_seconds {
            validate_range("source.timeout_seconds", timeout, 1, 600)?;
        }
        validate_path("selection.prescription_path", &self.selection.prescription_path)?;
        validate_non_empty_string("load.output_path", &self.load.output_path)?;
        Ok(())
    }
}
