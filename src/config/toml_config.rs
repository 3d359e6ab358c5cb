use crate::config::OutputFormat;
use crate::domain::model::Column;
use crate::utils::error::{TableError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DATASET_PATH: &str = "data/countries_1995_2012.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub view: ViewConfig,
    pub chart: Option<ChartConfig>,
    #[serde(default)]
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub path: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DATASET_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    pub year: Option<i64>,
    pub continents: Option<Vec<String>>,
    pub aggregate: Option<bool>,
    pub columns: Option<Vec<Column>>,
    /// Header activations replayed in order after the table is built.
    pub sort: Option<Vec<Column>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub enabled: bool,
    pub field: Option<Column>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    /// Default log level for this crate when `RUST_LOG` is unset.
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Loads a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TableError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TableError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TableError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn chart_field(&self) -> Option<Column> {
        self.chart
            .as_ref()
            .filter(|c| c.enabled)
            .map(|c| c.field.unwrap_or(crate::core::chart::DEFAULT_CHART_FIELD))
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("dataset.path", &self.dataset.path)?;
        validation::validate_file_extension("dataset.path", &self.dataset.path, &["json"])?;

        if let Some(year) = self.view.year {
            validation::validate_range("view.year", year, 0, 9999)?;
        }
        if let Some(continents) = &self.view.continents {
            for continent in continents {
                validation::validate_non_empty_string("view.continents", continent)?;
            }
        }
        if let Some(columns) = &self.view.columns {
            validation::validate_columns("view.columns", columns)?;
        }
        if let Some(field) = self.chart_field() {
            validation::validate_chart_field("chart.field", field)?;
        }
        if let Some(path) = &self.output.path {
            validation::validate_path("output.path", path)?;
        }
        if let Some(level) = self.log_level() {
            validation::validate_log_level("monitoring.log_level", level)?;
        }

        Ok(())
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
[dataset]
path = "data/world.json"

[view]
year = 2005
continents = ["Africa", "Asia"]
aggregate = true
columns = ["name", "population", "year"]
sort = ["population", "name"]

[chart]
enabled = true
field = "gdp"

[output]
format = "csv"
path = "./ranking.csv"

[monitoring]
enabled = true
log_level = "debug"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.dataset.path, "data/world.json");
        assert_eq!(config.view.year, Some(2005));
        assert_eq!(config.view.aggregate, Some(true));
        assert_eq!(
            config.view.columns,
            Some(vec![Column::Name, Column::Population, Column::Year])
        );
        assert_eq!(config.view.sort, Some(vec![Column::Population, Column::Name]));
        assert_eq!(config.chart_field(), Some(Column::Gdp));
        assert_eq!(config.output.format, Some(OutputFormat::Csv));
        assert!(config.monitoring_enabled());
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.dataset.path, DEFAULT_DATASET_PATH);
        assert_eq!(config.view.year, None);
        assert_eq!(config.chart_field(), None);
        assert!(!config.monitoring_enabled());
        assert_eq!(config.log_level(), None);
    }

    #[test]
    fn test_chart_without_field_uses_life_expectancy() {
        let config = TomlConfig::from_toml_str("[chart]\nenabled = true\n").unwrap();
        assert_eq!(config.chart_field(), Some(Column::LifeExpectancy));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("WORLD_TABLE_TEST_DATASET", "/tmp/countries.json");

        let config =
            TomlConfig::from_toml_str("[dataset]\npath = \"${WORLD_TABLE_TEST_DATASET}\"\n").unwrap();
        assert_eq!(config.dataset.path, "/tmp/countries.json");

        std::env::remove_var("WORLD_TABLE_TEST_DATASET");
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let result = TomlConfig::from_toml_str("[view]\ncolumns = [\"country\"]\n");
        assert!(matches!(result, Err(TableError::ConfigValidationError { .. })));
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            "[dataset]\npath = \"data.csv\"\n",
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[chart]\nenabled = true\nfield = \"name\"\n").unwrap();
        assert!(config.validate().is_err());

        let config =
            TomlConfig::from_toml_str("[monitoring]\nenabled = false\nlog_level = \"loud\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[view]\nyear = 1999\ncontinents = []\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.view.year, Some(1999));
        assert_eq!(config.view.continents, Some(Vec::new()));
    }
}
