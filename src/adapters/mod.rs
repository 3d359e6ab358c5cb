// Adapters layer: concrete collaborators for the pipeline (renderers, dataset loading).

pub mod csv_output;
pub mod dataset;
pub mod text;

pub use csv_output::CsvTableRenderer;
pub use dataset::{JsonDataset, LocalDataset};
pub use text::{TextChartRenderer, TextTableRenderer};
