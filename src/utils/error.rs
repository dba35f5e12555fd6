use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// The session store rejected the caller (no token, expired or invalid JWT).
    #[error("{message}")]
    Auth { message: String },

    /// An upstream service failed and said why.
    #[error("{message}")]
    Service { message: String },

    /// An upstream service failed without a recognizable error body.
    #[error("Upstream {service} returned status {status} without an error message")]
    Opaque { service: String, status: u16 },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

/// How a route should surface an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    Unhandled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    Network,
    Upstream,
    Configuration,
    Validation,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn auth(message: impl Into<String>) -> Self {
        AppError::Auth {
            message: message.into(),
        }
    }

    pub fn service(message: impl Into<String>) -> Self {
        AppError::Service {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Auth { .. } => ErrorKind::Auth,
            _ => ErrorKind::Unhandled,
        }
    }

    /// Message placed in the `{ "error": ... }` body. Failures that carry no
    /// usable message fall back to `fallback`.
    pub fn public_message(&self, fallback: &str) -> String {
        let message = match self {
            AppError::Auth { message } | AppError::Service { message } => message.clone(),
            AppError::Opaque { .. } => String::new(),
            other => other.to_string(),
        };

        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Auth { .. } => ErrorCategory::Authentication,
            AppError::Service { .. } | AppError::Opaque { .. } => ErrorCategory::Upstream,
            AppError::ApiError(_) => ErrorCategory::Network,
            AppError::SerializationError(_) | AppError::InvalidHeader(_) => ErrorCategory::Data,
            AppError::IoError(_) => ErrorCategory::System,
            AppError::UrlError(_)
            | AppError::ConfigError { .. }
            | AppError::MissingConfigError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            AppError::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Authentication | ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Authentication => "Sign in again to refresh the session cookie",
            ErrorCategory::Network => "Check that the auth and progress endpoints are reachable",
            ErrorCategory::Upstream => "Inspect the upstream service logs for the failing request",
            ErrorCategory::Configuration => {
                "Review the configuration file and command-line flags"
            }
            ErrorCategory::Validation => "Correct the request parameters and retry",
            ErrorCategory::Data => "The upstream response was not valid JSON",
            ErrorCategory::System => "Check file permissions and that the bind address is free",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
