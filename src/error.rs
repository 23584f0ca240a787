use thiserror::Error;

use crate::api::ApiType;

#[derive(Debug, Error)]
pub enum CompanyInfoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{operation} is not supported by the {backend} API")]
    UnsupportedOperation {
        operation: &'static str,
        backend: ApiType,
    },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Network error: {0}")]
    TransportMessage(String),

    #[error("API error: status {status}, {body}")]
    ApiError { status: u16, body: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CompanyInfoError {
    /// Build an API error from a status code and raw body
    pub fn api_error(status: u16, body: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            body: body.into(),
        }
    }

    /// True for errors raised before any request was sent
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Config(_) | Self::UnsupportedOperation { .. })
    }

    /// True when no HTTP response was obtained
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::TransportMessage(_))
    }

    /// True when the backend answered with status >= 400
    pub fn is_api(&self) -> bool {
        matches!(self, Self::ApiError { .. })
    }

    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get user-friendly hint for the error
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Config(_) => Some(
                "Check .env / .env.local or ~/.company-info/config.yaml. \
                 Run 'company-info config show' to see the resolved settings."
                    .to_string(),
            ),
            Self::UnsupportedOperation { backend, .. } => match backend {
                ApiType::Meti => Some(
                    "The gBizINFO API only supports number search. \
                     Use --api mof for name search."
                        .to_string(),
                ),
                ApiType::Mof => None,
            },
            Self::Transport(_) | Self::TransportMessage(_) => {
                Some("Check your internet connection and try again.".to_string())
            }
            Self::ApiError { status, .. } => match status {
                401 | 403 => Some("Check that your application ID or API token is valid.".to_string()),
                404 => Some("No corporation matched the given key.".to_string()),
                _ => None,
            },
            Self::InvalidInput(_) => Some(
                "--options expects a JSON object, e.g. '{\"history\":\"1\"}'.".to_string(),
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompanyInfoError>;
