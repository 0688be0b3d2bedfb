use crate::core::financial_year::financial_year_from_resource_id;
use crate::core::ConfigProvider;
use crate::utils::error::{ReportError, Result};
use crate::utils::paths;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_ENDPOINT: &str = "https://opendata.nhsbsa.net/api/3/action/datastore_search";
pub const DEFAULT_RESOURCE_ID: &str = "CONSOL_PHARMACY_LIST_202223Q4";
pub const DEFAULT_PROJECTION_FILE: &str = "workforce_projections.csv";
pub const DEFAULT_START_YEAR: i32 = 2025;
pub const DEFAULT_DURATION: u32 = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub projection: ProjectionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_resource_id")]
    pub resource_id: String,
    /// No timeout unless set.
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    #[serde(default = "default_projection_input")]
    pub input: String,
    #[serde(default = "default_start_year")]
    pub start_year: i32,
    #[serde(default = "default_duration")]
    pub duration: u32,
    pub output_dir: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

fn default_resource_id() -> String {
    DEFAULT_RESOURCE_ID.to_string()
}

fn default_projection_input() -> String {
    paths::data_dir(None)
        .join(DEFAULT_PROJECTION_FILE)
        .to_string_lossy()
        .into_owned()
}

fn default_start_year() -> i32 {
    DEFAULT_START_YEAR
}

fn default_duration() -> u32 {
    DEFAULT_DURATION
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            resource_id: default_resource_id(),
            timeout_seconds: None,
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            input: default_projection_input(),
            start_year: default_start_year(),
            duration: default_duration(),
            output_dir: None,
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReportError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("source.endpoint", &self.source.endpoint)?;
        validation::validate_required("source.resource_id", &self.source.resource_id)?;
        financial_year_from_resource_id(&self.source.resource_id)?;
        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_range("source.timeout_seconds", timeout, 1, 3600)?;
        }

        validation::validate_required("projection.input", &self.projection.input)?;
        validation::validate_path("projection.input", &self.projection.input)?;
        validation::validate_file_extension("projection.input", &self.projection.input, &["csv"])?;
        validation::validate_range("projection.start_year", self.projection.start_year, 1000, 9899)?;
        validation::validate_range("projection.duration", self.projection.duration, 1, 50)?;
        if let Some(output_dir) = &self.projection.output_dir {
            validation::validate_path("projection.output_dir", output_dir)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn resource_id(&self) -> &str {
        &self.source.resource_id
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }

    fn projection_input(&self) -> &str {
        &self.projection.input
    }

    fn start_year(&self) -> i32 {
        self.projection.start_year
    }

    fn duration(&self) -> u32 {
        self.projection.duration
    }

    fn output_dir(&self) -> Option<PathBuf> {
        self.projection.output_dir.as_ref().map(PathBuf::from)
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
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[source]
endpoint = "https://api.example.com/datastore_search"
resource_id = "CONSOL_PHARMACY_LIST_202324Q1"
timeout_seconds = 30

[projection]
input = "data/projections.csv"
start_year = 2026
duration = 10
output_dir = "./charts"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api_endpoint(), "https://api.example.com/datastore_search");
        assert_eq!(config.resource_id(), "CONSOL_PHARMACY_LIST_202324Q1");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.projection_input(), "data/projections.csv");
        assert_eq!(config.start_year(), 2026);
        assert_eq!(config.duration(), 10);
        assert_eq!(config.output_dir(), Some(PathBuf::from("./charts")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.api_endpoint(), DEFAULT_API_ENDPOINT);
        assert_eq!(config.resource_id(), DEFAULT_RESOURCE_ID);
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.start_year(), 2025);
        assert_eq!(config.duration(), 5);
        assert_eq!(config.output_dir(), None);
        assert!(config
            .projection_input()
            .ends_with("workforce_projections.csv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("NHS_INSIGHTS_TEST_RESOURCE", "CONSOL_PHARMACY_LIST_202122Q2");

        let toml_content = r#"
[source]
resource_id = "${NHS_INSIGHTS_TEST_RESOURCE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.resource_id(), "CONSOL_PHARMACY_LIST_202122Q2");

        std::env::remove_var("NHS_INSIGHTS_TEST_RESOURCE");
    }

    #[test]
    fn test_unknown_env_var_is_left_in_place() {
        let toml_content = r#"
[projection]
output_dir = "${NHS_INSIGHTS_SURELY_UNSET_VAR}"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.projection.output_dir.as_deref(),
            Some("${NHS_INSIGHTS_SURELY_UNSET_VAR}")
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = TomlConfig::default();
        config.source.endpoint = "invalid-url".to_string();
        assert!(config.validate().is_err());

        let mut config = TomlConfig::default();
        config.source.resource_id = "CONSOL_PHARMACY_LIST".to_string();
        assert!(matches!(
            config.validate(),
            Err(ReportError::InvalidResourceId { .. })
        ));

        let mut config = TomlConfig::default();
        config.projection.duration = 0;
        assert!(config.validate().is_err());

        let mut config = TomlConfig::default();
        config.projection.input = "projections.xlsx".to_string();
        assert!(config.validate().is_err());

        let mut config = TomlConfig::default();
        config.projection.input = " ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ReportError::MissingConfigError { ref field }) if field == "projection.input"
        ));

        let mut config = TomlConfig::default();
        config.source.resource_id = String::new();
        assert!(matches!(
            config.validate(),
            Err(ReportError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let result = TomlConfig::from_toml_str("[projection]\nduration = \"five\"\n");
        assert!(matches!(
            result,
            Err(ReportError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[projection]\nstart_year = 2030\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.start_year(), 2030);
    }
}
