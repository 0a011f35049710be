//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own copy of the fixture dataset.

use super::constants::*;
use super::fixtures::create_test_dataset;
use ratings_explorer::dataset::load_dataset;
use ratings_explorer::server::{make_app, RequestsLoggingLevel, ServerConfig};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance backed by the fixture dataset
///
/// When dropped, the server gracefully shuts down and the dataset is removed.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    _temp_dataset_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port with caching disabled.
    pub async fn spawn() -> Self {
        Self::spawn_with_config(ServerConfig {
            content_cache_age_sec: 0,
            ..ServerConfig::default()
        })
        .await
    }

    /// Spawns a new test server with `config`, its port is ignored.
    ///
    /// # Panics
    ///
    /// Panics if the dataset can't be created, the port can't be bound or
    /// the server doesn't become ready within timeout.
    pub async fn spawn_with_config(config: ServerConfig) -> Self {
        let (temp_dataset_dir, dataset_path) =
            create_test_dataset().expect("Failed to create test dataset");
        let dataset = Arc::new(load_dataset(&dataset_path).expect("Failed to load test dataset"));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            ..config
        };
        let app = make_app(config, dataset);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            _temp_dataset_dir: temp_dataset_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Polls the dashboard page until it answers
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
