//! Content server.
//!
//! Serves the scenarios document at `/api/scenarios`, static assets from the
//! public directory and the `index.html` shell for every other path. The
//! document is read from disk on every request, so edits show up without a
//! restart.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::content::source::SCENARIOS_PATH;
use crate::error::{Error, Result};

/// Body of the 500 response when the document cannot be served.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load scenarios.";

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

#[derive(Debug, Clone)]
struct ServerState {
    content_path: Arc<PathBuf>,
}

/// Build the router for the given configuration.
#[must_use]
pub fn router(config: &Config) -> Router {
    let state = ServerState {
        content_path: Arc::new(config.server.content_path.clone()),
    };
    let assets = ServeDir::new(&config.server.public_dir)
        .fallback(ServeFile::new(config.index_path()));

    Router::new()
        .route(SCENARIOS_PATH, get(scenarios))
        .fallback_service(assets)
        .with_state(state)
}

/// Any well-formed JSON is served as it is on disk.
async fn read_document(path: &Path) -> Result<serde_json::Value> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::ContentRead {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(serde_json::from_str(&text)?)
}

async fn scenarios(State(state): State<ServerState>) -> Response {
    match read_document(&state.content_path).await {
        Ok(document) => {
            debug!("Serving {}", state.content_path.display());
            Json(document).into_response()
        }
        Err(e) => {
            warn!("Failed to load scenarios: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: LOAD_ERROR_MESSAGE,
                }),
            )
                .into_response()
        }
    }
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the server fails while running.
pub async fn serve_on<F>(listener: TcpListener, config: &Config, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::server(e.to_string()))
}

/// Bind the configured address and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid, cannot be bound, or the
/// server fails while running.
pub async fn serve(config: &Config) -> Result<()> {
    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::server(format!("failed to bind {addr}: {e}")))?;

    debug!(
        content = %config.server.content_path.display(),
        public = %config.server.public_dir.display(),
        "Content server configured"
    );
    info!(
        "ProtectCard running on http://localhost:{}",
        config.server.port
    );

    serve_on(listener, config, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
        info!("Shutting down");
    })
    .await
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use super::*;
    use crate::content::{fixtures, ContentDocument, ContentSource, HttpSource};

    const INDEX: &str = "<!doctype html><title>ProtectCard</title><main id=\"app\"></main>";

    fn site(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "protectcard_server_{}_{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(root.join("public")).unwrap();
        std::fs::create_dir_all(root.join("content")).unwrap();
        std::fs::write(root.join("public").join("index.html"), INDEX).unwrap();
        std::fs::write(root.join("public").join("styles.css"), "body{}").unwrap();
        std::fs::write(root.join("content").join("scenarios.json"), fixtures::SAMPLE).unwrap();
        root
    }

    fn config(root: &Path) -> Config {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.server.public_dir = root.join("public");
        config.server.content_path = root.join("content").join("scenarios.json");
        config
    }

    async fn spawn(config: Config) -> SocketAddr {
        crate::logging::init_test_logging();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            serve_on(listener, &config, std::future::pending()).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn test_scenarios_endpoint() {
        let root = site("ok");
        let addr = spawn(config(&root)).await;

        let response = reqwest::get(format!("http://{addr}/api/scenarios"))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let doc: ContentDocument = response.json().await.unwrap();
        assert_eq!(doc, fixtures::document());

        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn test_http_source_reads_from_server() {
        let root = site("source");
        let addr = spawn(config(&root)).await;

        let source = HttpSource::new(&format!("http://{addr}/"));
        let doc = source.fetch().await.unwrap();
        assert_eq!(doc.scenarios.len(), 3);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn test_document_is_reread_per_request() {
        let root = site("reread");
        let addr = spawn(config(&root)).await;
        let url = format!("http://{addr}/api/scenarios");

        let first: ContentDocument = reqwest::get(&url).await.unwrap().json().await.unwrap();
        assert_eq!(first.scenarios.len(), 3);

        std::fs::write(
            root.join("content").join("scenarios.json"),
            r#"{"app":{"name":"ProtectCard","disclaimer":"x"},"scenarios":[]}"#,
        )
        .unwrap();
        let second: ContentDocument = reqwest::get(&url).await.unwrap().json().await.unwrap();
        assert!(second.scenarios.is_empty());

        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn test_malformed_document_is_500() {
        let root = site("bad");
        std::fs::write(root.join("content").join("scenarios.json"), "{oops").unwrap();
        let addr = spawn(config(&root)).await;

        let response = reqwest::get(format!("http://{addr}/api/scenarios"))
            .await
            .unwrap();
        assert_eq!(response.status(), 500);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, serde_json::json!({"error": "Failed to load scenarios."}));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn test_document_is_passed_through() {
        let root = site("passthrough");
        let raw = serde_json::json!({
            "app": {"name": "P", "disclaimer": "d", "version": "2"},
            "scenarios": [{"id": "a", "icon": "x"}]
        });
        std::fs::write(root.join("content").join("scenarios.json"), raw.to_string()).unwrap();
        let addr = spawn(config(&root)).await;

        let response = reqwest::get(format!("http://{addr}/api/scenarios"))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, raw);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn test_missing_document_is_500() {
        let root = site("missing");
        std::fs::remove_file(root.join("content").join("scenarios.json")).unwrap();
        let addr = spawn(config(&root)).await;

        let response = reqwest::get(format!("http://{addr}/api/scenarios"))
            .await
            .unwrap();
        assert_eq!(response.status(), 500);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn test_static_assets_and_shell_fallback() {
        let root = site("static");
        let addr = spawn(config(&root)).await;

        let css = reqwest::get(format!("http://{addr}/styles.css"))
            .await
            .unwrap();
        assert_eq!(css.status(), 200);
        assert_eq!(css.text().await.unwrap(), "body{}");

        for path in ["/", "/scenario/traffic-stop", "/does/not/exist"] {
            let response = reqwest::get(format!("http://{addr}{path}")).await.unwrap();
            assert_eq!(response.status(), 200, "path {path}");
            assert_eq!(response.text().await.unwrap(), INDEX);
        }

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn test_shipped_shell_points_to_terminal_client() {
        let shell = include_str!("../../../public/index.html");
        assert!(shell.contains("<main id=\"app\">"));
        assert!(shell.contains("protectcard show"));
    }

    #[tokio::test]
    async fn test_serve_rejects_bad_host() {
        let mut config = Config::default();
        config.server.host = "not an ip".to_string();
        assert!(serve(&config).await.is_err());
    }
}
