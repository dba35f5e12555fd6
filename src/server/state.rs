use crate::adapters::{HttpProgressService, SupabaseSessionClient};
use crate::core::{AuthGateway, ProgressPipeline};
use crate::domain::ports::{ConfigProvider, ProgressService, SessionClient};
use crate::utils::error::Result;
use reqwest::Client;
use std::sync::Arc;

/// Everything a route handler needs, built once at startup and shared by
/// every request.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthGateway,
    pub progress: ProgressPipeline,
    pub fallback_error_message: Arc<str>,
}

impl AppState {
    pub fn new(
        sessions: Arc<dyn SessionClient>,
        progress: Arc<dyn ProgressService>,
        fallback_error_message: &str,
    ) -> Self {
        Self {
            auth: AuthGateway::new(sessions),
            progress: ProgressPipeline::new(progress),
            fallback_error_message: Arc::from(fallback_error_message),
        }
    }

    /// Wires the HTTP adapters for the auth provider and progress service.
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("drivedesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let sessions = SupabaseSessionClient::from_config(client.clone(), config)?;
        let progress = HttpProgressService::from_config(client, config)?;

        Ok(Self::new(
            Arc::new(sessions),
            Arc::new(progress),
            config.fallback_error_message(),
        ))
    }
}
