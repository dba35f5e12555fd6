use crate::adapters::{endpoint_url, read_error_message, upstream_failure, AUTH_ERROR_KEYS};
use crate::domain::model::{Credentials, User};
use crate::domain::ports::{ConfigProvider, SessionClient};
use crate::utils::error::{AppError, Result};
use crate::utils::fetch::{AuthenticatedFetch, FetchOptions};
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Message the auth provider gives when the caller carries no session at all.
pub const MISSING_SESSION_MESSAGE: &str = "Auth session missing!";

/// Session client backed by a GoTrue-compatible `/auth/v1/user` endpoint.
pub struct SupabaseSessionClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    session_cookie: String,
    timeout: Option<Duration>,
}

impl SupabaseSessionClient {
    pub fn new(client: Client, endpoint: impl Into<String>, session_cookie: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: None,
            session_cookie: session_cookie.into(),
            timeout: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(client: Client, config: &C) -> Result<Self> {
        let mut session_client =
            Self::new(client, config.auth_endpoint()?, config.session_cookie())
                .with_timeout(config.upstream_timeout());
        if let Some(api_key) = config.auth_api_key() {
            session_client = session_client.with_api_key(api_key);
        }
        Ok(session_client)
    }
}

#[async_trait]
impl SessionClient for SupabaseSessionClient {
    async fn current_user(&self, credentials: &Credentials) -> Result<User> {
        let token = credentials
            .access_token(&self.session_cookie)
            .ok_or_else(|| AppError::auth(MISSING_SESSION_MESSAGE))?;

        let url = endpoint_url(&self.endpoint, &["auth", "v1", "user"])?;

        let mut options = FetchOptions::get()
            .timeout(self.timeout)
            .header(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", token))?);
        if let Some(api_key) = &self.api_key {
            options = options.header(HeaderName::from_static("apikey"), HeaderValue::from_str(api_key)?);
        }

        tracing::debug!("🔐 Looking up current user at {}", url);
        let response = AuthenticatedFetch::new(&self.client, credentials)
            .fetch(url.as_str(), options)
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = read_error_message(response, AUTH_ERROR_KEYS)
                .await
                .unwrap_or_else(|| format!("Session rejected by auth provider ({})", status));
            tracing::debug!("🔐 Session rejected: {}", message);
            return Err(AppError::auth(message));
        }
        if !status.is_success() {
            return Err(upstream_failure("auth", response, AUTH_ERROR_KEYS).await);
        }

        Ok(response.json::<User>().await?)
    }
}
