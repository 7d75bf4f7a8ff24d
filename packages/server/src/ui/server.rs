//! Server execution logic.

use std::{future::Future, sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::{net::TcpListener, task::JoinHandle, time::MissedTickBehavior};
use tower_http::trace::TraceLayer;

use super::{
    handler::{get_rooms, health_check, video_api},
    signal::shutdown_signal,
    state::AppState,
};

/// Room signaling server
///
/// # Example
///
/// ```ignore
/// let app_state = Arc::new(AppState::new(repository, clock, ExpiryPolicy::default()));
/// let server = Server::new(app_state, Some(Duration::from_secs(60)));
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    app_state: Arc<AppState>,
    /// Background sweep period; `None` leaves only the per-request sweep
    sweep_interval: Option<Duration>,
}

impl Server {
    pub fn new(app_state: Arc<AppState>, sweep_interval: Option<Duration>) -> Self {
        Self {
            app_state,
            sweep_interval,
        }
    }

    /// Build the router with every endpoint
    pub fn router(&self) -> Router {
        Router::new()
            // ルーム操作エンドポイント
            .route("/api/video", post(video_api))
            // 運用向けエンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .layer(TraceLayer::new_for_http())
            .with_state(self.app_state.clone())
    }

    /// Run the server until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Room server listening on {}", listener.local_addr()?);
        tracing::info!("Room API: POST http://{}/api/video", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let sweeper = self.sweep_interval.map(|interval| {
            tracing::info!("Background room sweep every {:?}", interval);
            spawn_sweeper(self.app_state.clone(), interval)
        });

        let result = axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await;

        if let Some(sweeper) = sweeper {
            sweeper.abort();
        }
        result
    }
}

fn spawn_sweeper(app_state: Arc<AppState>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // 最初の tick は即座に完了するので読み捨てる
        interval.tick().await;

        loop {
            interval.tick().await;
            if let Err(e) = app_state.sweep_expired_rooms_usecase.execute().await {
                tracing::warn!("Background room sweep failed: {}", e);
            }
        }
    })
}
