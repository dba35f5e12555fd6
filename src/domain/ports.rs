use crate::domain::model::{Credentials, ProgressReport, ProgressUpdateResult, StudentId, User};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;

/// Answers "who is the current authenticated caller".
#[async_trait]
pub trait SessionClient: Send + Sync {
    async fn current_user(&self, credentials: &Credentials) -> Result<User>;
}

/// Owns student progress computation and mutation.
#[async_trait]
pub trait ProgressService: Send + Sync {
    async fn report(&self, credentials: &Credentials, student: &StudentId)
        -> Result<ProgressReport>;

    async fn update(
        &self,
        credentials: &Credentials,
        student: &StudentId,
    ) -> Result<ProgressUpdateResult>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_addr(&self) -> Result<SocketAddr>;
    fn auth_endpoint(&self) -> Result<&str>;
    fn auth_api_key(&self) -> Option<&str>;
    fn session_cookie(&self) -> &str;
    fn progress_endpoint(&self) -> Result<&str>;
    fn upstream_timeout(&self) -> Option<Duration>;
    fn fallback_error_message(&self) -> &str;
}
