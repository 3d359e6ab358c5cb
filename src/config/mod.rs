#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::core::pipeline::ViewParams;
use crate::core::present::DEFAULT_COLUMNS;
use crate::domain::model::Column;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Tsv,
}

/// Everything a run needs, after merging the config file with flags.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub dataset_path: String,
    /// `None` selects the first year present in the data.
    pub year: Option<i64>,
    pub continents: Vec<String>,
    pub aggregate: bool,
    pub columns: Vec<Column>,
    pub sort: Vec<Column>,
    pub chart: Option<Column>,
    pub format: OutputFormat,
    pub output_path: Option<String>,
    pub monitor: bool,
    pub log_level: Option<String>,
}

impl RunSettings {
    pub fn view_params(&self, first_year: Option<i64>) -> ViewParams {
        ViewParams {
            year: self.year.or(first_year).unwrap_or_default(),
            continents: self.continents.clone(),
            aggregate: self.aggregate,
        }
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        Self::from(TomlConfig::default())
    }
}

impl From<TomlConfig> for RunSettings {
    fn from(config: TomlConfig) -> Self {
        let chart = config.chart_field();
        let monitor = config.monitoring_enabled();
        let log_level = config.log_level().map(str::to_string);
        Self {
            dataset_path: config.dataset.path,
            year: config.view.year,
            continents: config.view.continents.unwrap_or_default(),
            aggregate: config.view.aggregate.unwrap_or(false),
            columns: config
                .view
                .columns
                .unwrap_or_else(|| DEFAULT_COLUMNS.to_vec()),
            sort: config.view.sort.unwrap_or_default(),
            chart,
            format: config.output.format.unwrap_or_default(),
            output_path: config.output.path,
            monitor,
            log_level,
        }
    }
}

impl Validate for RunSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("dataset", &self.dataset_path)?;
        validation::validate_file_extension("dataset", &self.dataset_path, &["json"])?;
        if let Some(year) = self.year {
            validation::validate_range("year", year, 0, 9999)?;
        }
        for continent in &self.continents {
            validation::validate_non_empty_string("continent", continent)?;
        }
        validation::validate_columns("columns", &self.columns)?;
        if let Some(field) = self.chart {
            validation::validate_chart_field("chart", field)?;
        }
        if let Some(path) = &self.output_path {
            validation::validate_path("output", path)?;
        }
        if let Some(level) = &self.log_level {
            validation::validate_log_level("log_level", level)?;
        }
        Ok(())
    }
}
