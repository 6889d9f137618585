//! Common test utilities and fixtures for integration tests.
//!
//! Each TestContext owns a temporary directory holding its saved deck, so
//! tests run in parallel without sharing state.

pub mod fixtures;

use std::path::PathBuf;

use axum::Router;
use axum_test::TestServer;
use tempfile::TempDir;

use flashy_backend::services::storage::JsonFileStore;
use flashy_backend::{router, AppState};

/// Test context with a file-backed store in a temp directory.
pub struct TestContext {
    _dir: TempDir,
    data_file: PathBuf,
    app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let data_file = dir.path().join("flashcards.json");
        let state = AppState::new(JsonFileStore::new(&data_file));

        Self {
            _dir: dir,
            data_file,
            app: router(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to start test server")
    }

    pub fn data_file(&self) -> &PathBuf {
        &self.data_file
    }

    /// Save cards through the API.
    pub async fn seed(&self, server: &TestServer, cards: serde_json::Value) {
        server
            .put("/api/cards")
            .json(&serde_json::json!({ "cards": cards }))
            .await
            .assert_status_ok();
    }
}
