#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response};
use axum::Router;
use fashionsd_api::config::ServerConfig;
use fashionsd_api::router::build_app_router;
use fashionsd_api::state::AppState;
use fashionsd_imagegen::{GenerationConfig, GenerationError, GenerationRequest, ImageGenerator};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Bytes written by [`StubGenerator`] for every image.
pub const STUB_IMAGE: &[u8] = b"fake_image_data";

/// Build a test `ServerConfig` with safe defaults, writing images to `output_dir`.
pub fn test_config(output_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8501".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
        generation: GenerationConfig::new("http://127.0.0.1:1", "/generate", output_dir),
    }
}

/// Stands in for the remote generation service.
///
/// Writes [`STUB_IMAGE`] to a new file per call, or fails with a transport
/// style error when built with [`StubGenerator::failing`].
pub struct StubGenerator {
    output_dir: PathBuf,
    fail: bool,
    calls: AtomicUsize,
    last_request: std::sync::Mutex<Option<GenerationRequest>>,
}

impl StubGenerator {
    pub fn new(output_dir: &Path) -> Arc<Self> {
        Arc::new(Self {
            output_dir: output_dir.to_path_buf(),
            fail: false,
            calls: AtomicUsize::new(0),
            last_request: std::sync::Mutex::new(None),
        })
    }

    pub fn failing(output_dir: &Path) -> Arc<Self> {
        Arc::new(Self {
            output_dir: output_dir.to_path_buf(),
            fail: true,
            calls: AtomicUsize::new(0),
            last_request: std::sync::Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for StubGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<PathBuf, GenerationError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        if self.fail {
            return Err(GenerationError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            });
        }

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(format!("stub_{n}.png"));
        tokio::fs::write(&path, STUB_IMAGE).await?;
        Ok(path)
    }
}

/// Build the full application router with all middleware layers.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app(
    pool: SqlitePool,
    generator: Arc<dyn ImageGenerator>,
    output_dir: &Path,
) -> Router {
    let config = test_config(output_dir);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        generator,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::PUT, uri, body).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
