use thiserror::Error;

/// Failure of a single request at the transport boundary.
///
/// Every variant is terminal for the call that produced it; nothing retries.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("connection failed: {message}")]
    Connection { message: String },

    #[error("request timed out after {timeout:?}")]
    Timeout { timeout: std::time::Duration },

    #[error("server responded with HTTP {status}")]
    Status { status: u16 },

    #[error("request failed: {message}")]
    Request { message: String },

    #[error("response body is not valid JSON: {message}")]
    Decode { message: String },
}

pub type TransportResult<T> = std::result::Result<T, TransportError>;

#[derive(Error, Debug)]
pub enum SpooferError {
    #[error("Invalid argument: {message}")]
    Argument { message: String },

    #[error("No data returned from {url}: {source}")]
    NoData {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {field}: {reason}")]
    Config { field: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Data,
    System,
}

impl SpooferError {
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument {
            message: message.into(),
        }
    }

    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Argument { .. } | Self::Config { .. } => ErrorCategory::Input,
            Self::NoData { .. } => ErrorCategory::Network,
            Self::MalformedResponse { .. } | Self::Serialization(_) | Self::Csv(_) => {
                ErrorCategory::Data
            }
            Self::Io(_) => ErrorCategory::System,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Argument { .. } => "Check the command arguments (items per page must be at least 1)",
            Self::Config { .. } => "Fix the configuration file or the overriding command-line flags",
            Self::NoData { source, .. } => match source {
                TransportError::Timeout { .. } => "Increase --timeout-seconds or try again later",
                TransportError::Connection { .. } => "Check network connectivity and the API endpoint",
                TransportError::Status { .. } => "Check the session id or query filters",
                _ => "The service may be unavailable; try again later",
            },
            Self::MalformedResponse { .. } => "The API response did not have the expected shape",
            Self::Io(_) => "Check that the output directory is writable",
            Self::Csv(_) | Self::Serialization(_) => "Report this as a bug",
        }
    }
}

pub type Result<T> = std::result::Result<T, SpooferError>;
