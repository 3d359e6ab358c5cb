use crate::config::toml_config::TomlConfig;
use crate::config::{OutputFormat, RunSettings};
use crate::domain::model::Column;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "world-table")]
#[command(about = "Rank countries by year, continent and aggregate statistics")]
pub struct CliConfig {
    /// Dataset JSON file (overrides the config file)
    #[arg(long)]
    pub data: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Year to show; defaults to the first year in the data
    #[arg(long)]
    pub year: Option<i64>,

    /// Continents to keep; none keeps every continent
    #[arg(long, value_delimiter = ',')]
    pub continent: Vec<String>,

    /// Aggregate rows by continent
    #[arg(long)]
    pub aggregate: bool,

    /// Columns to display, comma separated
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Header clicks to apply in order, comma separated
    #[arg(long, value_delimiter = ',')]
    pub sort: Vec<String>,

    /// Also draw a bar chart of this field
    #[arg(long)]
    pub chart: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the table to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log stage timings and memory usage")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

fn parse_columns(values: &[String]) -> Result<Vec<Column>> {
    values.iter().map(|v| v.trim().parse()).collect()
}

impl CliConfig {
    /// Loads the config file, if any, and lays the flags over it.
    pub fn resolve(&self) -> Result<RunSettings> {
        let base = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.apply_to(RunSettings::from(base))
    }

    pub fn apply_to(&self, mut settings: RunSettings) -> Result<RunSettings> {
        if let Some(data) = &self.data {
            settings.dataset_path = data.clone();
        }
        if self.year.is_some() {
            settings.year = self.year;
        }
        if !self.continent.is_empty() {
            settings.continents = self.continent.clone();
        }
        if self.aggregate {
            settings.aggregate = true;
        }
        if !self.columns.is_empty() {
            settings.columns = parse_columns(&self.columns)?;
        }
        if !self.sort.is_empty() {
            settings.sort = parse_columns(&self.sort)?;
        }
        if let Some(chart) = &self.chart {
            settings.chart = Some(chart.trim().parse()?);
        }
        if let Some(format) = self.format {
            settings.format = format;
        }
        if self.output.is_some() {
            settings.output_path = self.output.clone();
        }
        if self.monitor {
            settings.monitor = true;
        }
        Ok(settings)
    }
}
