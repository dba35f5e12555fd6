use crate::adapters::{endpoint_url, upstream_failure, PROGRESS_ERROR_KEYS};
use crate::domain::model::{Credentials, ProgressReport, ProgressUpdateResult, StudentId};
use crate::domain::ports::{ConfigProvider, ProgressService};
use crate::utils::error::Result;
use crate::utils::fetch::{AuthenticatedFetch, FetchOptions};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Progress service reached over HTTP:
/// `GET {endpoint}/progress/{id}` and `POST {endpoint}/progress/{id}/update`.
pub struct HttpProgressService {
    client: Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpProgressService {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(client: Client, config: &C) -> Result<Self> {
        Ok(Self::new(client, config.progress_endpoint()?).with_timeout(config.upstream_timeout()))
    }

    async fn call(
        &self,
        credentials: &Credentials,
        segments: &[&str],
        options: FetchOptions,
    ) -> Result<serde_json::Value> {
        let url = endpoint_url(&self.endpoint, segments)?;
        tracing::debug!("📡 {} {}", options.method, url);

        let response = AuthenticatedFetch::new(&self.client, credentials)
            .fetch(url.as_str(), options.timeout(self.timeout))
            .await?;

        tracing::debug!("📡 progress service responded {}", response.status());
        if !response.status().is_success() {
            return Err(upstream_failure("progress", response, PROGRESS_ERROR_KEYS).await);
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ProgressService for HttpProgressService {
    async fn report(
        &self,
        credentials: &Credentials,
        student: &StudentId,
    ) -> Result<ProgressReport> {
        let body = self
            .call(credentials, &["progress", student.as_str()], FetchOptions::get())
            .await?;
        Ok(ProgressReport(body))
    }

    async fn update(
        &self,
        credentials: &Credentials,
        student: &StudentId,
    ) -> Result<ProgressUpdateResult> {
        // No body: the service recomputes from its own records.
        let body = self
            .call(
                credentials,
                &["progress", student.as_str(), "update"],
                FetchOptions::post(),
            )
            .await?;
        Ok(ProgressUpdateResult(body))
    }
}
