pub mod aggregate;
pub mod chart;
pub mod filter;
pub mod flatten;
pub mod format;
pub mod pipeline;
pub mod present;
pub mod sort;

pub use crate::domain::model::{AggregatedRow, CellValue, Column, FlatRow, Measure, RawCountry};
pub use crate::domain::ports::{ChartRenderer, DatasetSource, TableRenderer};
pub use crate::utils::error::Result;
