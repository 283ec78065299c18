use crate::utils::error::{LensError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(LensError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(LensError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(LensError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LensError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LensError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// The catalog source is either an HTTP(S) endpoint or a local file path.
pub fn validate_catalog_source(field_name: &str, source: &str) -> Result<()> {
    if source.starts_with("http://") || source.starts_with("https://") {
        validate_url(field_name, source)
    } else {
        validate_path(field_name, source)
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LensError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(LensError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| LensError::MissingConfigError {
        field: field_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("catalog", "https://example.com/lensData.json").is_ok());
        assert!(validate_url("catalog", "http://example.com").is_ok());
        assert!(validate_url("catalog", "").is_err());
        assert!(validate_url("catalog", "not-a-url").is_err());
        assert!(validate_url("catalog", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_catalog_source() {
        assert!(validate_catalog_source("catalog", "https://example.com/lensData.json").is_ok());
        assert!(validate_catalog_source("catalog", "./data/lensData.json").is_ok());
        assert!(validate_catalog_source("catalog", "").is_err());
        assert!(validate_catalog_source("catalog", "http://[broken").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("axis", 90.0, 1.0, 180.0).is_ok());
        assert!(validate_range("axis", 0.0, 1.0, 180.0).is_err());
        assert!(validate_range("timeout_seconds", 30u64, 1, 600).is_ok());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("value".to_string());
        let absent: Option<String> = None;
        assert!(validate_required_field("prescription", &present).is_ok());
        assert!(validate_required_field("prescription", &absent).is_err());
    }
}
