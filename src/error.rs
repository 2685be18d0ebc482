//! Error types for ngup.

use aws_sdk_eks::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

const CODE_RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";
const CODE_INVALID_PARAMETER: &str = "InvalidParameterException";
const CODE_PARAMETER_NOT_FOUND: &str = "ParameterNotFound";

/// Configuration rejected before any AWS call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Classified failure of an EKS or SSM call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Parameter not found: {0}")]
    ParameterNotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameter(String),

    #[error("[{code}] {message}")]
    Service { code: String, message: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ApiError {
    /// Classify an AWS SDK error by its service error code.
    ///
    /// Only `ServiceError` responses carry a code. Construction, dispatch,
    /// timeout and unparseable response failures are `Unexpected`.
    pub fn from_sdk<E, R>(err: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: std::fmt::Debug,
    {
        match &err {
            SdkError::ServiceError(_) => {
                let code = err.code().unwrap_or("Unknown").to_string();
                let message = err
                    .message()
                    .map(str::to_string)
                    .unwrap_or_else(|| code.clone());
                Self::from_code(&code, message)
            }
            _ => Self::Unexpected(DisplayErrorContext(&err).to_string()),
        }
    }

    /// Map an AWS error code and message to an error kind.
    pub fn from_code(code: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            CODE_RESOURCE_NOT_FOUND => Self::NotFound(message),
            CODE_PARAMETER_NOT_FOUND => Self::ParameterNotFound(message),
            CODE_INVALID_PARAMETER => Self::InvalidParameter(message),
            _ => Self::Service {
                code: code.to_string(),
                message,
            },
        }
    }

    /// The AWS error code when the failure came from the service.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::NotFound(_) => Some(CODE_RESOURCE_NOT_FOUND),
            Self::ParameterNotFound(_) => Some(CODE_PARAMETER_NOT_FOUND),
            Self::InvalidParameter(_) => Some(CODE_INVALID_PARAMETER),
            Self::Service { code, .. } => Some(code),
            Self::Unexpected(_) => None,
        }
    }

    /// The underlying message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(m)
            | Self::ParameterNotFound(m)
            | Self::InvalidParameter(m)
            | Self::Unexpected(m) => m,
            Self::Service { message, .. } => message,
        }
    }
}
