mod config;
mod predictions;
mod wishes;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use wt_api_types::{Envelope, ErrorResponse};
use wt_storage::{InMemoryWishStore, RocksDbWishStore, WishStore};

use crate::config::ServiceConfig;

#[derive(Debug, Serialize)]
struct HealthResponse {
    service: &'static str,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct VersionResponse {
    service: &'static str,
    version: &'static str,
}

type ApiResult<T> = Result<Json<Envelope<T>>, (StatusCode, Json<ErrorResponse>)>;

#[derive(Clone)]
struct AppState {
    store: Arc<dyn WishStore>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServiceConfig::from_env()?;

    let store: Arc<dyn WishStore> = match &config.db_path {
        Some(path) => {
            info!("opening wish store at {}", path);
            Arc::new(RocksDbWishStore::open_default(path)?)
        }
        None => {
            warn!("WISH_DB_PATH not set; wishes are kept in memory only");
            Arc::new(InMemoryWishStore::default())
        }
    };

    let app = build_router(AppState { store }, config.static_dir.as_deref());

    info!("wish-service listening on {}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("wish-service stopped");
    Ok(())
}

fn build_router(state: AppState, static_dir: Option<&str>) -> Router {
    let api = Router::new()
        .route("/prediction/random", get(predictions::random_prediction))
        .route("/wish/add", post(wishes::add_wish))
        .route("/wishes/recent", get(wishes::recent_wishes))
        .route("/stats", get(wishes::stats));

    let mut app = Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .nest("/api", api);

    if let Some(dir) = static_dir {
        info!("serving page from {}", dir);
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "wish-service",
        status: "ok",
    })
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        service: "wish-service",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

fn not_found(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new(message)))
}

fn internal_error(err: impl std::fmt::Display) -> (StatusCode, Json<ErrorResponse>) {
    error!("request failed: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(err.to_string())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use wt_api_types::{Prediction, Wish};

    fn app_with(store: impl WishStore + 'static) -> Router {
        build_router(
            AppState {
                store: Arc::new(store),
            },
            None,
        )
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_wish(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/wish/add")
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    struct BrokenStore;

    #[async_trait]
    impl WishStore for BrokenStore {
        async fn add_wish(&self, _text: &str) -> anyhow::Result<Wish> {
            Err(anyhow!("disk full"))
        }

        async fn recent_wishes(&self, _limit: usize) -> anyhow::Result<Vec<Wish>> {
            Err(anyhow!("disk full"))
        }

        async fn wish_count(&self) -> anyhow::Result<u64> {
            Err(anyhow!("disk full"))
        }

        async fn random_prediction(&self) -> anyhow::Result<Option<Prediction>> {
            Err(anyhow!("disk full"))
        }
    }

    #[tokio::test]
    async fn added_wish_shows_up_in_recent_and_stats() {
        let app = app_with(InMemoryWishStore::default());

        let (status, body) = send(&app, post_wish(r#"{"text":"  Peace on earth  "}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["wish"]["text"], "Peace on earth");
        assert_eq!(body["message"], wishes::WISH_ADDED_MESSAGE);

        let (status, body) = send(&app, get_req("/api/wishes/recent?limit=20")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["wishes"][0]["text"], "Peace on earth");

        let (_, body) = send(&app, get_req("/api/stats")).await;
        assert_eq!(body, json!({"success": true, "total_wishes": 1}));
    }

    #[tokio::test]
    async fn blank_and_oversized_wishes_are_rejected() {
        let app = app_with(InMemoryWishStore::default());

        let (status, body) = send(&app, post_wish(r#"{"text":"   "}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Enter the text of your wish");

        let long = json!({ "text": "x".repeat(201) }).to_string();
        let (status, body) = send(&app, post_wish(&long)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Wish is too long (max 200 characters)");

        let (status, body) = send(&app, post_wish("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (_, body) = send(&app, get_req("/api/stats")).await;
        assert_eq!(body["total_wishes"], 0);
    }

    #[tokio::test]
    async fn recent_limit_is_clamped_and_tolerates_garbage() {
        let app = app_with(InMemoryWishStore::default());
        for i in 0..3 {
            send(&app, post_wish(&json!({ "text": format!("wish {i}") }).to_string())).await;
        }

        let (_, body) = send(&app, get_req("/api/wishes/recent?limit=0")).await;
        assert_eq!(body["count"], 1);

        let (status, body) = send(&app, get_req("/api/wishes/recent?limit=lots")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 3);
        assert_eq!(body["wishes"][0]["text"], "wish 2");
    }

    #[tokio::test]
    async fn prediction_is_drawn_or_not_found() {
        let app = app_with(InMemoryWishStore::default());
        let (status, body) = send(&app, get_req("/api/prediction/random")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(body["prediction"]["text"].as_str().is_some_and(|t| !t.is_empty()));

        let app = app_with(InMemoryWishStore::with_predictions(Vec::new()));
        let (status, body) = send(&app, get_req("/api/prediction/random")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"success": false, "error": "No predictions found"}));
    }

    #[tokio::test]
    async fn storage_failures_become_error_envelopes() {
        let app = app_with(BrokenStore);

        let (status, body) = send(&app, post_wish(r#"{"text":"Peace"}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"success": false, "error": "disk full"}));

        let (status, _) = send(&app, get_req("/api/stats")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn health_reports_service_name() {
        let app = app_with(InMemoryWishStore::default());
        let (status, body) = send(&app, get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"service": "wish-service", "status": "ok"}));
    }
}
