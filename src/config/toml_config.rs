use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_SESSION_COOKIE: &str = "sb-access-token";
pub const DEFAULT_FALLBACK_ERROR: &str = "An unexpected error occurred";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// Shown in `{ "error": ... }` when a failure carries no message.
    pub fallback_error_message: String,
    pub upstream_timeout_seconds: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            fallback_error_message: DEFAULT_FALLBACK_ERROR.to_string(),
            upstream_timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Base URL of the auth provider, e.g. `https://<project>.supabase.co`.
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    /// Cookie whose value is a bare access token (JWT). Chunked or base64
    /// `sb-<ref>-auth-token` cookies are not decoded; such clients must send
    /// `Authorization: Bearer` instead.
    pub session_cookie: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_socket_addr("server.bind", &self.server.bind)?;
        validation::validate_non_empty_string(
            "server.fallback_error_message",
            &self.server.fallback_error_message,
        )?;
        if let Some(timeout) = self.server.upstream_timeout_seconds {
            validation::validate_range("server.upstream_timeout_seconds", timeout, 1, 300)?;
        }

        let auth_endpoint = validation::validate_required_field("auth.endpoint", &self.auth.endpoint)?;
        validation::validate_url("auth.endpoint", auth_endpoint)?;
        if let Some(api_key) = &self.auth.api_key {
            validation::validate_non_empty_string("auth.api_key", api_key)?;
        }
        validation::validate_cookie_name("auth.session_cookie", &self.auth.session_cookie)?;

        let progress_endpoint =
            validation::validate_required_field("progress.endpoint", &self.progress.endpoint)?;
        validation::validate_url("progress.endpoint", progress_endpoint)?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn bind_addr(&self) -> Result<SocketAddr> {
        validation::validate_socket_addr("server.bind", &self.server.bind)
    }

    fn auth_endpoint(&self) -> Result<&str> {
        validation::validate_required_field("auth.endpoint", &self.auth.endpoint).map(String::as_str)
    }

    fn auth_api_key(&self) -> Option<&str> {
        self.auth.api_key.as_deref()
    }

    fn session_cookie(&self) -> &str {
        &self.auth.session_cookie
    }

    fn progress_endpoint(&self) -> Result<&str> {
        validation::validate_required_field("progress.endpoint", &self.progress.endpoint)
            .map(String::as_str)
    }

    fn upstream_timeout(&self) -> Option<Duration> {
        self.server.upstream_timeout_seconds.map(Duration::from_secs)
    }

    fn fallback_error_message(&self) -> &str {
        &self.server.fallback_error_message
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
