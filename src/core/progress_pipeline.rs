use crate::domain::model::{Credentials, ProgressReport, ProgressUpdateResult, StudentId};
use crate::domain::ports::ProgressService;
use crate::utils::error::Result;
use std::sync::Arc;

/// Read/update pair keyed by student id. Validates the id taken from the
/// path, then hands off to the progress service.
#[derive(Clone)]
pub struct ProgressPipeline {
    service: Arc<dyn ProgressService>,
}

impl ProgressPipeline {
    pub fn new(service: Arc<dyn ProgressService>) -> Self {
        Self { service }
    }

    pub async fn report(&self, credentials: &Credentials, raw_id: &str) -> Result<ProgressReport> {
        let student = StudentId::parse(raw_id)?;
        tracing::info!("📥 Fetching progress report for student {}", student);

        let report = self.service.report(credentials, &student).await;
        if let Err(e) = &report {
            tracing::error!("❌ Progress report for {} failed: {}", student, e);
        }
        report
    }

    pub async fn update(
        &self,
        credentials: &Credentials,
        raw_id: &str,
    ) -> Result<ProgressUpdateResult> {
        let student = StudentId::parse(raw_id)?;
        tracing::info!("🔄 Updating progress for student {}", student);

        let result = self.service.update(credentials, &student).await;
        match &result {
            Ok(_) => tracing::info!("🔄 Progress for {} updated", student),
            Err(e) => tracing::error!("❌ Progress update for {} failed: {}", student, e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AppError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingService {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ProgressService for CountingService {
        async fn report(
            &self,
            _credentials: &Credentials,
            student: &StudentId,
        ) -> Result<ProgressReport> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if student.as_str() == "missing" {
                return Err(AppError::service("not found"));
            }
            Ok(ProgressReport(json!({"student": student.as_str(), "progress": 42})))
        }

        async fn update(
            &self,
            _credentials: &Credentials,
            _student: &StudentId,
        ) -> Result<ProgressUpdateResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ProgressUpdateResult(json!({"progress": 43})))
        }
    }

    #[tokio::test]
    async fn test_report_delegates_with_parsed_id() {
        let service = Arc::new(CountingService::default());
        let pipeline = ProgressPipeline::new(service.clone());

        let report = pipeline
            .report(&Credentials::anonymous(), "abc123")
            .await
            .unwrap();

        assert_eq!(report.0["student"], "abc123");
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_id_is_rejected_before_service_call() {
        let service = Arc::new(CountingService::default());
        let pipeline = ProgressPipeline::new(service.clone());

        let err = pipeline
            .update(&Credentials::anonymous(), "  ")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError { .. }));
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_service_errors_are_returned_unchanged() {
        let pipeline = ProgressPipeline::new(Arc::new(CountingService::default()));

        let err = pipeline
            .report(&Credentials::anonymous(), "missing")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "not found");
    }
}
