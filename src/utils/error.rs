use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status} for {url}")]
    ApiStatusError { status: u16, url: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing field '{path}' in API response")]
    MissingFieldError { path: String },

    #[error("Invalid resource id '{resource_id}': {reason}")]
    InvalidResourceId { resource_id: String, reason: String },

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

    #[error("Missing required configuration '{field}'")]
    MissingConfigError { field: String },

    #[error("Chart rendering error: {message}")]
    ChartError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::ApiError(_) | ReportError::ApiStatusError { .. } => ErrorCategory::Network,
            ReportError::CsvError(_)
            | ReportError::SerializationError(_)
            | ReportError::MissingFieldError { .. }
            | ReportError::ProcessingError { .. } => ErrorCategory::Data,
            ReportError::InvalidResourceId { .. }
            | ReportError::ConfigError { .. }
            | ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. }
            | ReportError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ReportError::IoError(_) | ReportError::ChartError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // A flaky endpoint may succeed on a rerun.
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ReportError::ApiError(_) => {
                "Check your network connection and that the open-data endpoint is reachable".to_string()
            }
            ReportError::ApiStatusError { status, .. } if *status == 404 || *status == 409 => {
                "Check that the resource id exists on the open-data portal".to_string()
            }
            ReportError::ApiStatusError { .. } => {
                "The open-data portal rejected the request; try again later".to_string()
            }
            ReportError::CsvError(_) => {
                "Make sure the projection file has profession,scenario,year,total_registrants columns"
                    .to_string()
            }
            ReportError::IoError(_) => {
                "Check that the paths exist and that you have permission to read and write them"
                    .to_string()
            }
            ReportError::SerializationError(_) | ReportError::MissingFieldError { .. } => {
                "The API response format may have changed; inspect it with --verbose".to_string()
            }
            ReportError::InvalidResourceId { .. } => {
                "Resource ids must end with a segment like 202223Q4".to_string()
            }
            ReportError::ConfigError { .. }
            | ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. }
            | ReportError::MissingConfigError { .. } => {
                "Review the configuration file and command line flags".to_string()
            }
            ReportError::ChartError { .. } => {
                "Chart drawing failed; make sure system fonts are installed".to_string()
            }
            ReportError::ProcessingError { .. } => "Check the input data".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not fetch data: {}", self),
            ErrorCategory::Data => format!("Could not read the data: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}
