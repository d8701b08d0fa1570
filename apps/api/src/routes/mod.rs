pub mod health;

use axum::{routing::get, Router};
use tower_http::services::ServeFile;

use crate::errors::AppError;
use crate::packing::handlers;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("no route for this path".to_string())
}

pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/health", get(health::health_handler))
        // Packing API
        .route("/api/health", get(health::health_handler))
        .route("/api/calculate", get(handlers::handle_calculate))
        .route("/api/package-sizes", get(handlers::handle_package_sizes))
        // Legacy path kept for older clients
        .route("/calculate", get(handlers::handle_calculate))
        // Web UI
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route_service("/style.css", ServeFile::new(static_dir.join("style.css")))
        .route_service("/script.js", ServeFile::new(static_dir.join("script.js")))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::packing::PackageCatalog;

    fn make_state(static_dir: std::path::PathBuf) -> AppState {
        AppState {
            catalog: Arc::new(PackageCatalog::new([250, 500, 1000, 2000]).unwrap()),
            config: Config {
                port: 0,
                package_sizes: vec![250, 500, 1000, 2000],
                max_quantity: 100_000,
                static_dir,
                rust_log: "info".to_string(),
            },
        }
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let app = build_router(make_state("web/static".into()));
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_calculate_ok() {
        let (status, body) = get_json("/api/calculate?qty=1201").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "requested": 1201,
                "total_delivered": 1250,
                "over_delivery": 49,
                "packages": { "1000": 1, "250": 1 }
            })
        );
    }

    #[tokio::test]
    async fn test_calculate_zero() {
        let (status, body) = get_json("/api/calculate?qty=0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["packages"], json!({}));
    }

    #[tokio::test]
    async fn test_legacy_calculate_path() {
        let (status, body) = get_json("/calculate?qty=5000").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["packages"], json!({ "2000": 2, "1000": 1 }));
    }

    #[tokio::test]
    async fn test_calculate_missing_qty() {
        let (status, body) = get_json("/api/calculate").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "missing 'qty' parameter");
    }

    #[tokio::test]
    async fn test_calculate_non_integer_qty() {
        let (status, body) = get_json("/api/calculate?qty=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_calculate_negative_qty() {
        let (status, body) = get_json("/api/calculate?qty=-100").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_QUANTITY");
    }

    #[tokio::test]
    async fn test_calculate_over_cap() {
        let (status, body) = get_json("/api/calculate?qty=100001").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "QUANTITY_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_package_sizes_ascending() {
        let (status, body) = get_json("/api/package-sizes").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "package_sizes": [250, 500, 1000, 2000] }));
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = get_json("/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_serves_index_from_static_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>packopt</h1>").unwrap();

        let app = build_router(make_state(dir.path().to_path_buf()));
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<h1>packopt</h1>");
    }
}
