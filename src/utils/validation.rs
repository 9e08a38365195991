use crate::utils::error::{OptimizerError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(OptimizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(OptimizerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(OptimizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(OptimizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(OptimizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(OptimizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// 浮點數必須為有限且大於 0（例如巡航速度）
pub fn validate_positive_f64(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(OptimizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number greater than 0".to_string(),
        });
    }
    Ok(())
}

/// 浮點數必須為有限且不為負（例如成本、票價）
pub fn validate_non_negative_f64(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(OptimizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number and not negative".to_string(),
        });
    }
    Ok(())
}

pub fn validate_finite_f64(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(OptimizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_allowed_values(field_name: &str, values: &[String], allowed: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed.iter().copied().collect();

    for value in values {
        if !allowed_set.contains(value.as_str()) {
            return Err(OptimizerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: format!("Unsupported value. Allowed values: {}", allowed.join(", ")),
            });
        }
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| OptimizerError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN 不在任何區間內
    if !(min..=max).contains(&value) {
        return Err(OptimizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("coordinates.endpoint", "https://example.com").is_ok());
        assert!(validate_url("coordinates.endpoint", "http://example.com").is_ok());
        assert!(validate_url("coordinates.endpoint", "").is_err());
        assert!(validate_url("coordinates.endpoint", "invalid-url").is_err());
        assert!(validate_url("coordinates.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("concurrent_requests", 5, 1).is_ok());
        assert!(validate_positive_number("concurrent_requests", 0, 1).is_err());
    }

    #[test]
    fn test_validate_positive_f64() {
        assert!(validate_positive_f64("cruise_speed_knots", 485.0).is_ok());
        assert!(validate_positive_f64("cruise_speed_knots", 0.0).is_err());
        assert!(validate_positive_f64("cruise_speed_knots", -1.0).is_err());
        assert!(validate_positive_f64("cruise_speed_knots", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_non_negative_f64() {
        assert!(validate_non_negative_f64("layover_cost_per_hour", 0.0).is_ok());
        assert!(validate_non_negative_f64("layover_cost_per_hour", -0.5).is_err());
        assert!(validate_non_negative_f64("layover_cost_per_hour", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_allowed_values() {
        let formats = vec!["json".to_string(), "csv".to_string()];
        assert!(validate_allowed_values("report_formats", &formats, &["json", "csv"]).is_ok());

        let invalid = vec!["xml".to_string()];
        assert!(validate_allowed_values("report_formats", &invalid, &["json", "csv"]).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("latitude", 45.0, -90.0, 90.0).is_ok());
        assert!(validate_range("latitude", 91.0, -90.0, 90.0).is_err());
        assert!(validate_range("latitude", -90.0, -90.0, 90.0).is_ok());
        assert!(validate_range("latitude", f64::NAN, -90.0, 90.0).is_err());
    }
}
