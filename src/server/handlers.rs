// Route handlers: map one method+path to one gateway/pipeline call and the
// result to JSON. Error kinds are mapped to statuses here, per route.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::model::Credentials;
use crate::server::state::AppState;
use crate::utils::error::{AppError, ErrorKind};

/// Caller credentials lifted from the `Cookie` and `Authorization` headers.
pub struct RequestCredentials(pub Credentials);

impl RequestCredentials {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let cookie = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join("; ");

        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        Self(Credentials {
            cookie: (!cookie.is_empty()).then_some(cookie),
            bearer,
        })
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequestCredentials {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn auth_status(err: &AppError) -> StatusCode {
    match err.kind() {
        ErrorKind::Auth => StatusCode::UNAUTHORIZED,
        ErrorKind::Unhandled => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// GET /api/health
pub async fn health() -> Response {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "time": chrono::Utc::now().to_rfc3339(),
    }))
    .into_response()
}

/// GET /api/auth/user
pub async fn current_user(
    State(state): State<AppState>,
    RequestCredentials(credentials): RequestCredentials,
) -> Response {
    match state.auth.current_user(&credentials).await {
        Ok(user) => Json(user).into_response(),
        Err(e) => error_response(auth_status(&e), e.public_message(&state.fallback_error_message)),
    }
}

/// GET /api/progress/{student_id}. Every failure, not-found included, is a 500.
pub async fn progress_report(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    RequestCredentials(credentials): RequestCredentials,
) -> Response {
    match state.progress.report(&credentials, &student_id).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            e.public_message(&state.fallback_error_message),
        ),
    }
}

/// POST /api/progress/{student_id}/update. The request body is ignored.
pub async fn update_progress(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    RequestCredentials(credentials): RequestCredentials,
) -> Response {
    match state.progress.update(&credentials, &student_id).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            e.public_message(&state.fallback_error_message),
        ),
    }
}
