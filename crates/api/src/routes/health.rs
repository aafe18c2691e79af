use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthReport {
    /// `"ok"` when designs can be stored and images written, else `"degraded"`.
    pub status: &'static str,
    pub version: &'static str,
    /// `SELECT 1` against the design store succeeded.
    pub db_healthy: bool,
    /// The generated-image directory exists.
    pub image_dir_present: bool,
}

/// Probe the design store and the image output directory.
///
/// Always answers 200 so the dashboard can show which part is down.
async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let db_healthy = fashionsd_db::health_check(&state.pool).await.is_ok();
    let image_dir_present = tokio::fs::metadata(&state.config.generation.output_dir)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);

    if !db_healthy || !image_dir_present {
        tracing::warn!(db_healthy, image_dir_present, "Service degraded");
    }

    Json(HealthReport {
        status: if db_healthy && image_dir_present { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        image_dir_present,
    })
}

/// `/health`, mounted next to `/designs` at the root.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
