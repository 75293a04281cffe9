use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("State file error: {message}")]
    StateError { message: String },

    #[error("{channel} notification failed: {message}")]
    NotificationError { channel: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Storage,
    Notification,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 對應 CLI 的退出碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl WatchError {
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        WatchError::ConfigValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn notification(channel: impl Into<String>, message: impl Into<String>) -> Self {
        WatchError::NotificationError {
            channel: channel.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            WatchError::HttpError(_) => ErrorCategory::Network,
            WatchError::IoError(_) | WatchError::StateError { .. } => ErrorCategory::Storage,
            WatchError::SerializationError(_) => ErrorCategory::Data,
            WatchError::ConfigValidationError { .. }
            | WatchError::InvalidConfigValueError { .. }
            | WatchError::MissingConfigError { .. } => ErrorCategory::Configuration,
            WatchError::NotificationError { .. } => ErrorCategory::Notification,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤通常是暫時性的，下一輪會重試
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Notification => ErrorSeverity::Low,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// 是否值得在下一輪檢查時重試
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Network | ErrorCategory::Notification
        )
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            WatchError::HttpError(e) if e.is_timeout() => {
                "The request did not finish in time; raise the matching timeout_seconds setting or check connectivity".to_string()
            }
            WatchError::HttpError(e) if e.is_status() => {
                "The server rejected the request; verify the watched URL is still valid".to_string()
            }
            WatchError::HttpError(_) => {
                "Check network connectivity and DNS resolution for the watched host".to_string()
            }
            WatchError::IoError(_) | WatchError::StateError { .. } => {
                "Make sure the state directory exists and is writable (e.g. mount /data)".to_string()
            }
            WatchError::SerializationError(_) => {
                "A notification payload could not be encoded; report this as a bug".to_string()
            }
            WatchError::ConfigValidationError { field, .. }
            | WatchError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting in the config file or environment", field)
            }
            WatchError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            WatchError::NotificationError { channel, .. } => {
                format!("Verify the {} credentials and recipient settings", channel)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not fetch the watched page: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Storage => format!("Could not access the state file: {}", self),
            ErrorCategory::Notification => format!("Could not deliver a notification: {}", self),
            ErrorCategory::Data => format!("Unexpected data error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, WatchError>;
