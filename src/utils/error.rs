use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Spreadsheet processing error: {0}")]
    SpreadsheetError(#[from] calamine::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Input error: {message}")]
    InputError { message: String },

    #[error("Credential error: {message}")]
    CredentialError { message: String },

    #[error("Classification error: {message}")]
    ClassificationError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// Coarse error category, mirrored in the CLI exit code and the
/// ERROR response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Credential,
    Classification,
    Config,
    Internal,
}

impl CheckError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CheckError::InputError { .. }
            | CheckError::CsvError(_)
            | CheckError::SpreadsheetError(_) => ErrorKind::Input,
            CheckError::CredentialError { .. } => ErrorKind::Credential,
            CheckError::ClassificationError { .. } | CheckError::ApiError(_) => {
                ErrorKind::Classification
            }
            CheckError::MissingConfigError { .. } | CheckError::InvalidConfigValueError { .. } => {
                ErrorKind::Config
            }
            CheckError::IoError(_) | CheckError::SerializationError(_) => ErrorKind::Internal,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.kind() {
            ErrorKind::Input => format!("The input file could not be processed: {}", self),
            ErrorKind::Credential => format!("Could not authorize with the aggregator: {}", self),
            ErrorKind::Classification => format!("Capability check failed: {}", self),
            ErrorKind::Config => format!("Configuration problem: {}", self),
            ErrorKind::Internal => format!("Unexpected error: {}", self),
        }
    }
}

impl ErrorKind {
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorKind::Input => 2,
            ErrorKind::Config => 3,
            ErrorKind::Credential => 4,
            ErrorKind::Classification => 5,
            ErrorKind::Internal => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;
