use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Car info request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Car info service rejected {reg_num} with status {status}")]
    RemoteRejection { reg_num: String, status: u16 },

    #[error("Malformed car info response: {message}")]
    MalformedResponse { message: String },

    #[error("Enrichment cancelled")]
    Cancelled,

    #[error("Enrichment worker failed: {message}")]
    WorkerFailed { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Car {id} not found")]
    NotFound { id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// 供 CLI 決定退出碼
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Transport(_) | Self::RemoteRejection { .. } | Self::Cancelled => {
                ErrorSeverity::Medium
            }
            Self::MalformedResponse { .. }
            | Self::ValidationError { .. }
            | Self::NotFound { .. }
            | Self::SerializationError(_) => ErrorSeverity::High,
            Self::WorkerFailed { .. }
            | Self::IoError(_)
            | Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Transport(_) => "Could not reach the car info service".to_string(),
            Self::RemoteRejection { reg_num, status } => {
                format!("Car info service refused {} (HTTP {})", reg_num, status)
            }
            Self::MalformedResponse { .. } => {
                "Car info service returned data in an unexpected shape".to_string()
            }
            Self::Cancelled => "Enrichment was cancelled".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
