use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use drivedesk::domain::model::{
    Credentials, ProgressReport, ProgressUpdateResult, StudentId, User,
};
use drivedesk::domain::ports::{ProgressService, SessionClient};
use drivedesk::{AppError, AppServer, AppState};
use serde_json::{json, Value};

const FALLBACK: &str = "Ocurrió un error inesperado";

/// Session store keyed on the bearer token.
struct FakeSessions;

#[async_trait]
impl SessionClient for FakeSessions {
    async fn current_user(&self, credentials: &Credentials) -> drivedesk::Result<User> {
        match credentials.bearer.as_deref() {
            Some("valid-token") => Ok(User(json!({"id": "u-1", "email": "ana@school.test"}))),
            Some("network-down") => Err(AppError::Opaque {
                service: "auth".to_string(),
                status: 502,
            }),
            Some(_) => Err(AppError::auth("invalid JWT: token is expired")),
            None => Err(AppError::auth("Auth session missing!")),
        }
    }
}

/// Progress store with one known student.
struct FakeProgress;

#[async_trait]
impl ProgressService for FakeProgress {
    async fn report(
        &self,
        _credentials: &Credentials,
        student: &StudentId,
    ) -> drivedesk::Result<ProgressReport> {
        match student.as_str() {
            "abc123" => Ok(ProgressReport(json!({"progress": 42, "status": "active"}))),
            "broken" => Err(AppError::Opaque {
                service: "progress".to_string(),
                status: 500,
            }),
            _ => Err(AppError::service("not found")),
        }
    }

    async fn update(
        &self,
        _credentials: &Credentials,
        student: &StudentId,
    ) -> drivedesk::Result<ProgressUpdateResult> {
        match student.as_str() {
            "abc123" => Ok(ProgressUpdateResult(json!({"progress": 43, "status": "active"}))),
            _ => Err(AppError::service("not found")),
        }
    }
}

async fn start_server() -> Result<AppServer> {
    let state = AppState::new(Arc::new(FakeSessions), Arc::new(FakeProgress), FALLBACK);
    Ok(AppServer::start("127.0.0.1:0".parse()?, state).await?)
}

#[tokio::test]
async fn test_current_user_with_valid_session() -> Result<()> {
    let server = start_server().await?;
    let client = reqwest::Client::new();

    let resp = client
        .get(server.url("/api/auth/user"))
        .bearer_auth("valid-token")
        .send()
        .await?;

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await?;
    assert_eq!(body, json!({"id": "u-1", "email": "ana@school.test"}));

    server.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_current_user_auth_failures_are_401() -> Result<()> {
    let server = start_server().await?;
    let client = reqwest::Client::new();

    let resp = client.get(server.url("/api/auth/user")).send().await?;
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await?;
    assert_eq!(body, json!({"error": "Auth session missing!"}));

    let resp = client
        .get(server.url("/api/auth/user"))
        .bearer_auth("expired")
        .send()
        .await?;
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await?;
    assert_eq!(body["error"], "invalid JWT: token is expired");

    server.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_current_user_unexpected_failure_is_500_with_fallback() -> Result<()> {
    let server = start_server().await?;
    let client = reqwest::Client::new();

    let resp = client
        .get(server.url("/api/auth/user"))
        .bearer_auth("network-down")
        .send()
        .await?;

    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await?;
    assert_eq!(body, json!({"error": FALLBACK}));

    server.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_progress_report_scenario() -> Result<()> {
    let server = start_server().await?;
    let client = reqwest::Client::new();

    let resp = client.get(server.url("/api/progress/abc123")).send().await?;

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await?;
    assert_eq!(body, json!({"progress": 42, "status": "active"}));

    server.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_progress_not_found_collapses_to_500() -> Result<()> {
    let server = start_server().await?;
    let client = reqwest::Client::new();

    let resp = client.get(server.url("/api/progress/missing")).send().await?;

    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await?;
    assert_eq!(body, json!({"error": "not found"}));

    server.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_progress_failures_always_carry_a_message() -> Result<()> {
    let server = start_server().await?;
    let client = reqwest::Client::new();

    let resp = client.get(server.url("/api/progress/broken")).send().await?;
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await?;
    assert_eq!(body["error"], FALLBACK);

    // Whitespace-only id: rejected before the service is called.
    let resp = client.get(server.url("/api/progress/%20%20")).send().await?;
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await?;
    assert!(!body["error"].as_str().unwrap_or_default().is_empty());

    server.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_update_progress() -> Result<()> {
    let server = start_server().await?;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/api/progress/abc123/update"))
        .send()
        .await?;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await?;
    assert_eq!(body, json!({"progress": 43, "status": "active"}));

    let resp = client
        .post(server.url("/api/progress/missing/update"))
        .json(&json!({"ignored": true}))
        .send()
        .await?;
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await?;
    assert_eq!(body, json!({"error": "not found"}));

    // Update is POST-only.
    let resp = client
        .get(server.url("/api/progress/abc123/update"))
        .send()
        .await?;
    assert_eq!(resp.status(), 405);

    server.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_health() -> Result<()> {
    let server = start_server().await?;

    let resp = reqwest::get(server.url("/api/health")).await?;

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "drivedesk");
    assert!(body["time"].is_string());

    server.shutdown();
    Ok(())
}
