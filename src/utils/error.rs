use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Dataset parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required setting: {field}")]
    MissingConfigError { field: String },

    #[error("Unknown column: {name}")]
    UnknownColumn { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TableError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TableError::IoError(_) | TableError::JsonError(_) => ErrorCategory::Input,
            TableError::CsvError(_) => ErrorCategory::Output,
            TableError::ConfigError { .. }
            | TableError::ConfigValidationError { .. }
            | TableError::InvalidConfigValueError { .. }
            | TableError::MissingConfigError { .. }
            | TableError::UnknownColumn { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TableError::IoError(_) => ErrorSeverity::Critical,
            TableError::JsonError(_) | TableError::CsvError(_) => ErrorSeverity::High,
            TableError::ConfigError { .. }
            | TableError::ConfigValidationError { .. }
            | TableError::InvalidConfigValueError { .. }
            | TableError::MissingConfigError { .. }
            | TableError::UnknownColumn { .. } => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            TableError::IoError(_) => {
                "Check that the dataset and output paths exist and are accessible".to_string()
            }
            TableError::JsonError(_) => {
                "The dataset must be a JSON array of countries with name, continent and years"
                    .to_string()
            }
            TableError::CsvError(_) => "Check that the output destination is writable".to_string(),
            TableError::ConfigError { .. } | TableError::ConfigValidationError { .. } => {
                "Review the configuration file syntax".to_string()
            }
            TableError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}'", field)
            }
            TableError::MissingConfigError { field } => format!("Provide a value for '{}'", field),
            TableError::UnknownColumn { .. } => format!(
                "Valid columns are: {}",
                crate::domain::model::Column::ALL
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Could not load the dataset: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Output => format!("Could not write the table: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, TableError>;
