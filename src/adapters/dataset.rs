use crate::domain::model::RawCountry;
use crate::domain::ports::DatasetSource;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Dataset stored as a JSON file on local disk.
#[derive(Debug, Clone)]
pub struct LocalDataset {
    path: PathBuf,
}

impl LocalDataset {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for LocalDataset {
    fn load(&self) -> Result<Vec<RawCountry>> {
        tracing::info!("Loading dataset from {}", self.path.display());
        let data = fs::read(&self.path)?;
        let countries: Vec<RawCountry> = serde_json::from_slice(&data)?;
        tracing::info!("Loaded {} countries", countries.len());
        Ok(countries)
    }
}

/// Dataset held as JSON text, for embedding and tests.
#[derive(Debug, Clone)]
pub struct JsonDataset {
    content: String,
}

impl JsonDataset {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl DatasetSource for JsonDataset {
    fn load(&self) -> Result<Vec<RawCountry>> {
        Ok(serde_json::from_str(&self.content)?)
    }
}
