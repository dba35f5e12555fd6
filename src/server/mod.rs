pub mod handlers;
pub mod state;

pub use state::AppState;

use std::future::Future;
use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;

use crate::utils::error::Result;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/auth/user", get(handlers::current_user))
        .route("/api/progress/{student_id}", get(handlers::progress_report))
        .route(
            "/api/progress/{student_id}/update",
            post(handlers::update_progress),
        )
        .with_state(state)
}

/// Serve on `bind` until `shutdown` resolves.
pub async fn serve<F>(bind: SocketAddr, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(bind).await?;
    tracing::info!("🚗 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("🚗 Server stopped");
    Ok(())
}

/// Handle to a server running on a background task.
pub struct AppServer {
    addr: SocketAddr,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl AppServer {
    /// Bind `bind` (port 0 picks a free port) and serve in the background.
    pub async fn start(bind: SocketAddr, state: AppState) -> Result<Self> {
        let listener = TcpListener::bind(bind).await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        let app = router(state);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
            {
                tracing::error!("❌ Server task exited: {}", e);
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
