use crate::domain::model::{Credentials, User};
use crate::domain::ports::SessionClient;
use crate::utils::error::Result;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthGateway {
    sessions: Arc<dyn SessionClient>,
}

impl AuthGateway {
    pub fn new(sessions: Arc<dyn SessionClient>) -> Self {
        Self { sessions }
    }

    pub async fn current_user(&self, credentials: &Credentials) -> Result<User> {
        match self.sessions.current_user(credentials).await {
            Ok(user) => {
                tracing::debug!("🔐 Resolved user {}", user.id().unwrap_or("<no id>"));
                Ok(user)
            }
            Err(e) => {
                tracing::warn!("🔐 Current user lookup failed: {}", e);
                Err(e)
            }
        }
    }
}
