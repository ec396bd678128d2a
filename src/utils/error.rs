use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Required input file not found: {path}")]
    MissingInputError { path: String },

    #[error("Malformed holder entry for {symbol} on page {page}: {reason}")]
    MalformedHolderError {
        symbol: String,
        page: usize,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SnapshotError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SnapshotError::ApiError(_) => ErrorCategory::Network,
            SnapshotError::CsvError(_)
            | SnapshotError::IoError(_)
            | SnapshotError::SerializationError(_) => ErrorCategory::Storage,
            SnapshotError::ConfigError { .. }
            | SnapshotError::InvalidConfigValueError { .. }
            | SnapshotError::MissingInputError { .. } => ErrorCategory::Configuration,
            SnapshotError::MalformedHolderError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路錯誤在單一 token 範圍內可恢復
            SnapshotError::ApiError(_) => ErrorSeverity::Medium,
            SnapshotError::ConfigError { .. }
            | SnapshotError::InvalidConfigValueError { .. }
            | SnapshotError::MissingInputError { .. } => ErrorSeverity::High,
            // API 合約變更或快照寫入失敗
            SnapshotError::MalformedHolderError { .. }
            | SnapshotError::CsvError(_)
            | SnapshotError::IoError(_)
            | SnapshotError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SnapshotError::ApiError(_) => {
                "Check network connectivity and the explorer API base URL, then rerun"
            }
            SnapshotError::CsvError(_)
            | SnapshotError::IoError(_)
            | SnapshotError::SerializationError(_) => {
                "Check that the base directory exists, is writable and has free disk space"
            }
            SnapshotError::ConfigError { .. } | SnapshotError::InvalidConfigValueError { .. } => {
                "Review the command line flags and the TOML configuration file"
            }
            SnapshotError::MissingInputError { .. } => concat!(
                "Create Tokens.json in the base directory ",
                "with entries of the form {\"symbol\", \"contract\"}"
            ),
            SnapshotError::MalformedHolderError { .. } => concat!(
                "The explorer API response shape changed; ",
                "verify the holders endpoint before rerunning"
            ),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SnapshotError::ApiError(_) => "Could not reach the block explorer API".to_string(),
            SnapshotError::MissingInputError { path } => {
                format!("Required input file is missing: {}", path)
            }
            SnapshotError::MalformedHolderError { symbol, page, .. } => format!(
                "Holder data for {} (page {}) is missing required fields",
                symbol, page
            ),
            SnapshotError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            SnapshotError::ConfigError { message } => format!("Configuration problem: {}", message),
            SnapshotError::CsvError(_)
            | SnapshotError::IoError(_)
            | SnapshotError::SerializationError(_) => {
                "Failed to write snapshot output to disk".to_string()
            }
        }
    }
}

impl ErrorSeverity {
    /// 網路錯誤 2、設定或輸入錯誤 1、資料或寫入錯誤 3
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, SnapshotError>;
