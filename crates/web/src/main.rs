use axum::{
    routing::{get, post},
    Router,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chess_rules_core::{ChessService, Database};

mod config;
mod routes;

use config::Config;

pub struct AppState {
    service: Mutex<ChessService>,
}

impl AppState {
    pub fn new(service: ChessService) -> Self {
        Self {
            service: Mutex::new(service),
        }
    }

    /// The service stays usable even if a handler panicked while holding it.
    pub fn service(&self) -> MutexGuard<'_, ChessService> {
        self.service.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/games", post(routes::create_game))
        .route("/games/:id", get(routes::games::show_game))
        .route("/games/:id/move", post(routes::games::move_piece))
        .route("/games/:id/status", get(routes::games::status))
        .route("/games/:id/end", post(routes::games::end_game))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::from_env()?;
    let db = Database::open(&config.database_path)?;
    let state = Arc::new(AppState::new(ChessService::new(db)));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(
        database = %config.database_path.display(),
        "Server running at http://{}",
        config.bind_addr
    );

    axum::serve(listener, app(state)).await?;
    Ok(())
}
