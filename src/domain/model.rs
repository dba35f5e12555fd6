use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity object returned by the session store. Its shape belongs to the
/// auth provider, so it is carried as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User(pub serde_json::Value);

impl User {
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(|v| v.as_str())
    }
}

/// A student's progress as computed by the progress service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressReport(pub serde_json::Value);

/// Progress state returned after the service advanced a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressUpdateResult(pub serde_json::Value);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(AppError::ValidationError {
                message: "studentId must be a non-empty string".to_string(),
            });
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller credentials lifted from an inbound request and forwarded upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Raw `Cookie` header value.
    pub cookie: Option<String>,
    /// Token from an `Authorization: Bearer` header.
    pub bearer: Option<String>,
}

impl Credentials {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn cookie_value(&self, name: &str) -> Option<&str> {
        self.cookie.as_deref()?.split(';').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            if key.trim() == name {
                Some(value.trim().trim_matches('"'))
            } else {
                None
            }
        })
    }

    /// Bearer header wins over the session cookie. The cookie's value is used
    /// as the access token itself; split (`name.0`, `name.1`) or base64-encoded
    /// session cookies are not reassembled.
    pub fn access_token(&self, session_cookie: &str) -> Option<&str> {
        self.bearer
            .as_deref()
            .or_else(|| self.cookie_value(session_cookie))
            .filter(|token| !token.is_empty())
    }
}
