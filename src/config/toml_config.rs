use crate::config::model::{CoordinateSource, ModelConfig, DEFAULT_CONCURRENT_REQUESTS};
use crate::config::REPORT_FORMATS;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{OptimizerError, Result};
use crate::utils::validation::{validate_allowed_values, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub run: RunConfig,
    pub input: InputConfig,
    #[serde(default)]
    pub model: ModelConfig,
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub routes_file: String,
    pub coordinates: CoordinatesConfig,
}

/// `file` 與 `endpoint` 擇一設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatesConfig {
    pub file: Option<String>,
    pub endpoint: Option<String>,
    pub concurrent_requests: Option<usize>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    pub routes_file: Option<String>,
    #[serde(default)]
    pub report_formats: Vec<String>,
    pub archive: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
    pub json_logs: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(OptimizerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| OptimizerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COORDINATE_SERVICE_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| OptimizerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_path("input.routes_file", &self.input.routes_file)?;
        validate_path("output.output_path", &self.output.output_path)?;
        validate_path("output.routes_file", self.output_file())?;
        validate_allowed_values(
            "output.report_formats",
            &self.output.report_formats,
            REPORT_FORMATS,
        )?;

        let coordinates = &self.input.coordinates;
        if coordinates.file.is_some() && coordinates.endpoint.is_some() {
            return Err(OptimizerError::ConfigValidationError {
                field: "input.coordinates".to_string(),
                message: "Set either 'file' or 'endpoint', not both".to_string(),
            });
        }
        self.resolve_coordinate_source()?.validate()?;

        self.model.validate()
    }

    fn resolve_coordinate_source(&self) -> Result<CoordinateSource> {
        let coordinates = &self.input.coordinates;
        if let Some(endpoint) = &coordinates.endpoint {
            return Ok(CoordinateSource::Service {
                endpoint: endpoint.clone(),
                concurrent_requests: coordinates
                    .concurrent_requests
                    .unwrap_or(DEFAULT_CONCURRENT_REQUESTS),
                timeout_seconds: coordinates.timeout_seconds,
            });
        }

        let path = crate::utils::validation::validate_required_field(
            "input.coordinates.file",
            &coordinates.file,
        )?;
        Ok(CoordinateSource::File { path: path.clone() })
    }

    /// 是否啟用系統監控
    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn routes_file(&self) -> &str {
        &self.input.routes_file
    }

    fn coordinate_source(&self) -> CoordinateSource {
        // 驗證後才會呼叫；未設定時退回預設的座標檔
        self.resolve_coordinate_source()
            .unwrap_or_else(|_| CoordinateSource::File {
                path: "airports.csv".to_string(),
            })
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn output_file(&self) -> &str {
        self.output
            .routes_file
            .as_deref()
            .unwrap_or("profitable_flights.txt")
    }

    fn report_formats(&self) -> &[String] {
        &self.output.report_formats
    }

    fn archive_outputs(&self) -> bool {
        self.output.archive.unwrap_or(false)
    }

    fn model(&self) -> &ModelConfig {
        &self.model
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::ReallocationPolicy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[run]
name = "spring-schedule"

[input]
routes_file = "sorted_flights_new.txt"

[input.coordinates]
file = "airports.csv"

[model]
profit_threshold = 8000.0
reallocation_policy = "accumulate"

[output]
output_path = "./out"
report_formats = ["json", "csv"]
archive = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.run.name, "spring-schedule");
        assert_eq!(config.model.profit_threshold, 8000.0);
        assert_eq!(config.model.cruise_speed_knots, 485.0);
        assert_eq!(
            config.model.reallocation_policy,
            ReallocationPolicy::Accumulate
        );
        assert_eq!(config.output_file(), "profitable_flights.txt");
        assert!(config.archive_outputs());
        assert_eq!(
            config.coordinate_source(),
            CoordinateSource::File {
                path: "airports.csv".to_string()
            }
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_model_section_is_optional() {
        let toml_content = r#"
[run]
name = "defaults"

[input]
routes_file = "routes.csv"

[input.coordinates]
file = "airports.csv"

[output]
output_path = "./out"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.model, ModelConfig::default());
        assert!(config.report_formats().is_empty());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_COORDINATE_ENDPOINT", "https://geo.example.com/airports");

        let toml_content = r#"
[run]
name = "service"

[input]
routes_file = "routes.csv"

[input.coordinates]
endpoint = "${TEST_COORDINATE_ENDPOINT}"
concurrent_requests = 3

[output]
output_path = "./out"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.coordinate_source(),
            CoordinateSource::Service {
                endpoint: "https://geo.example.com/airports".to_string(),
                concurrent_requests: 3,
                timeout_seconds: None,
            }
        );

        std::env::remove_var("TEST_COORDINATE_ENDPOINT");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[run]
name = "broken"

[input]
routes_file = "routes.csv"

[input.coordinates]
file = "airports.csv"

[model]
cruise_speed_knots = 0.0

[output]
output_path = "./out"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_coordinate_source_is_rejected() {
        let toml_content = r#"
[run]
name = "no-coordinates"

[input]
routes_file = "routes.csv"

[input.coordinates]

[output]
output_path = "./out"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, OptimizerError::MissingConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[run]
name = "file-test"

[input]
routes_file = "routes.csv"

[input.coordinates]
file = "airports.csv"

[output]
output_path = "./out"
routes_file = "kept.csv"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.run.name, "file-test");
        assert_eq!(config.output_file(), "kept.csv");
    }
}
