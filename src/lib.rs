pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{CsvTableRenderer, LocalDataset, TextChartRenderer, TextTableRenderer};
pub use config::{OutputFormat, RunSettings};
pub use core::pipeline::{TablePipeline, UiEvent, ViewParams};
pub use core::present::{present, Table};
pub use domain::model::{Column, FlatRow, RawCountry};
pub use utils::error::{Result, TableError};
