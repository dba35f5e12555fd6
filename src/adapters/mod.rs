// Adapters layer: HTTP clients for the auth provider and the progress service.

pub mod auth;
pub mod progress;

pub use auth::SupabaseSessionClient;
pub use progress::HttpProgressService;

use crate::utils::error::{AppError, Result};
use reqwest::Response;
use url::Url;

/// Appends `segments` to `base`, percent-encoding each one as a single path segment.
pub(crate) fn endpoint_url(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)?;
    {
        let mut path = url.path_segments_mut().map_err(|_| AppError::ConfigError {
            message: format!("{} cannot be used as a base URL", base),
        })?;
        path.pop_if_empty().extend(segments);
    }
    Ok(url)
}

/// Error-body fields the auth provider uses, most specific first.
pub(crate) const AUTH_ERROR_KEYS: &[&str] = &["msg", "message", "error_description", "error"];

/// Error-body fields the progress service uses.
pub(crate) const PROGRESS_ERROR_KEYS: &[&str] = &["error", "message"];

/// Pulls a human-readable message out of an upstream error body, taking the
/// first of `keys` whose value is a non-blank string. Other values are skipped.
pub(crate) fn error_message(body: &serde_json::Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        let value = body.get(*key)?;
        match value {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            // { "error": { "message": "..." } }
            serde_json::Value::Object(_) => error_message(value, keys),
            _ => None,
        }
    })
}

pub(crate) async fn read_error_message(response: Response, keys: &[&str]) -> Option<String> {
    let body = response.bytes().await.ok()?;
    let json: serde_json::Value = serde_json::from_slice(&body).ok()?;
    error_message(&json, keys)
}

/// Non-success response from `service` turned into an error: a message when
/// the body has one, otherwise an opaque failure.
pub(crate) async fn upstream_failure(
    service: &str,
    response: Response,
    keys: &[&str],
) -> AppError {
    let status = response.status().as_u16();
    match read_error_message(response, keys).await {
        Some(message) => {
            tracing::debug!("📡 {} failed with {}: {}", service, status, message);
            AppError::service(message)
        }
        None => {
            tracing::debug!("📡 {} failed with {} and no error body", service, status);
            AppError::Opaque {
                service: service.to_string(),
                status,
            }
        }
    }
}
