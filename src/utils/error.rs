use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Coordinate service request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("City not found: {city}")]
    LookupError { city: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Lookup,
    Processing,
    Network,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 程序退出碼，依嚴重程度區分
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl OptimizerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OptimizerError::ConfigError { .. }
            | OptimizerError::ConfigValidationError { .. }
            | OptimizerError::InvalidConfigValueError { .. }
            | OptimizerError::MissingConfigError { .. } => ErrorCategory::Configuration,
            OptimizerError::CsvError(_)
            | OptimizerError::SerializationError(_)
            | OptimizerError::ValidationError { .. } => ErrorCategory::Input,
            OptimizerError::LookupError { .. } => ErrorCategory::Lookup,
            OptimizerError::ProcessingError { .. } => ErrorCategory::Processing,
            OptimizerError::ApiError(_) => ErrorCategory::Network,
            OptimizerError::IoError(_) | OptimizerError::ZipError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Input | ErrorCategory::Lookup => {
                ErrorSeverity::High
            }
            ErrorCategory::Processing | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            OptimizerError::LookupError { city } => format!(
                "Add coordinates for '{}' to the coordinate table or check the city code in the route file",
                city
            ),
            OptimizerError::ValidationError { .. } => {
                "Every flight path needs at least an origin and a destination".to_string()
            }
            OptimizerError::CsvError(_) => {
                "Check that the file has the expected CSV header and one record per line".to_string()
            }
            OptimizerError::ApiError(_) => {
                "Check the coordinate service endpoint and network connectivity, then retry"
                    .to_string()
            }
            OptimizerError::IoError(_) => {
                "Check that the input files exist and the output directory is writable".to_string()
            }
            _ if self.category() == ErrorCategory::Configuration => {
                "Review the configuration values and try again".to_string()
            }
            _ => "Re-run with --verbose and inspect the log output".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("配置錯誤: {}", self),
            ErrorCategory::Input => format!("輸入資料錯誤: {}", self),
            ErrorCategory::Lookup => format!("找不到城市座標: {}", self),
            ErrorCategory::Processing => format!("處理失敗: {}", self),
            ErrorCategory::Network => format!("座標服務連線失敗: {}", self),
            ErrorCategory::System => format!("系統錯誤: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, OptimizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_is_high_severity() {
        let err = OptimizerError::LookupError {
            city: "XYZ".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Lookup);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("XYZ"));
        assert_eq!(err.to_string(), "City not found: XYZ");
    }

    #[test]
    fn test_config_errors_share_category() {
        let err = OptimizerError::InvalidConfigValueError {
            field: "model.cruise_speed_knots".to_string(),
            value: "0".to_string(),
            reason: "Value must be greater than 0".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.user_friendly_message().contains("cruise_speed_knots"));
    }

    #[test]
    fn test_every_failure_exits_non_zero() {
        let network = OptimizerError::ApiError(
            reqwest::Client::new().get("not a url").build().unwrap_err(),
        );
        let lookup = OptimizerError::LookupError {
            city: "ZZZ".to_string(),
        };
        let processing = OptimizerError::ProcessingError {
            message: "no candidate".to_string(),
        };

        assert_eq!(network.severity(), ErrorSeverity::Medium);
        assert_eq!(network.severity().exit_code(), 2);
        assert_eq!(lookup.severity().exit_code(), 1);
        assert_eq!(processing.severity().exit_code(), 3);
    }
}
