pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use flashcard_core::{CardStore, StoreError};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::ApiError;
use crate::services::sessions::SessionRegistry;
use crate::services::storage::JsonFileStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CardStore>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(store: impl CardStore + 'static) -> Self {
        Self::with_sessions(store, SessionRegistry::new())
    }

    pub fn with_sessions(store: impl CardStore + 'static, sessions: SessionRegistry) -> Self {
        Self {
            store: Arc::new(store),
            sessions: Arc::new(sessions),
        }
    }

    /// Run a store operation on the blocking thread pool.
    pub async fn with_store<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&dyn CardStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|e| ApiError::Store(StoreError::Unavailable(e.to_string())))
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Grading
        .route("/api/grade", post(routes::grade::grade))
        // Saved deck
        .route(
            "/api/cards",
            get(routes::cards::list)
                .put(routes::cards::save)
                .delete(routes::cards::clear),
        )
        .route("/api/cards/export", get(routes::cards::export))
        .route("/api/cards/import", post(routes::cards::import))
        .route("/api/categories", get(routes::cards::list_categories))
        .route("/api/storage", get(routes::cards::storage_info))
        // Test sessions
        .route("/api/tests", post(routes::study::start))
        .route(
            "/api/tests/:id",
            get(routes::study::status).delete(routes::study::end),
        )
        .route("/api/tests/:id/answer", post(routes::study::answer))
        .route("/api/tests/:id/next", post(routes::study::next))
        .route("/api/tests/:id/report", get(routes::study::report))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Using flashcard data file {}", config.data_file.display());
    let state = AppState::with_sessions(
        JsonFileStore::new(&config.data_file),
        SessionRegistry::with_idle_timeout(config.session_idle_timeout),
    );

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashcard_core::{Card, MemoryStore};

    #[tokio::test]
    async fn test_with_store_runs_off_the_runtime() {
        let state = AppState::new(MemoryStore::new());

        let cards = vec![Card::new(1, "Paris", "Capital of France", "Geography")];
        let saved = cards.clone();
        state
            .with_store(move |store| store.save(&saved))
            .await
            .expect("join")
            .expect("save");

        let loaded = state.with_store(|store| store.load()).await.expect("join");
        assert_eq!(loaded, cards);
    }

    #[tokio::test]
    async fn test_with_store_reports_panics_as_storage_errors() {
        let state = AppState::new(MemoryStore::new());

        let result = state
            .with_store(|_store| -> Vec<Card> { panic!("store failure") })
            .await;

        assert!(matches!(
            result,
            Err(ApiError::Store(StoreError::Unavailable(_)))
        ));
    }
}
