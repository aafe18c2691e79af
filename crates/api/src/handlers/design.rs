//! Handlers for the `/designs` resource.

use std::path::Path as FsPath;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fashionsd_core::design::{
    coerce_dimension, deserialize_patch, NewDesign, DEFAULT_HEIGHT, DEFAULT_WIDTH, FIELD_HEIGHT,
    FIELD_NEGATIVE_PROMPT, FIELD_PROMPT, FIELD_WIDTH,
};
use fashionsd_core::error::CoreError;
use fashionsd_core::generation::DEFAULT_STEPS;
use fashionsd_core::types::DbId;
use fashionsd_db::models::design::Design;
use fashionsd_db::repositories::DesignRepo;
use fashionsd_imagegen::GenerationRequest;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::query::SearchParams;
use crate::state::AppState;

const FIELD_STEPS: &str = "steps";

/// GET /designs
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Design>>> {
    let designs = DesignRepo::list(&state.pool).await?;
    Ok(Json(designs))
}

/// POST /designs
///
/// Generates the image first, then persists the record. If persisting
/// fails the freshly written image is removed again so nothing is left
/// behind.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Design>)> {
    let Json(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let input = parse_create_body(&body)?;

    let request = GenerationRequest {
        prompt: input.prompt.clone(),
        negative_prompt: input.negative_prompt.clone(),
        width: input.width.unsigned_abs(),
        height: input.height.unsigned_abs(),
        steps: input.steps,
    };
    let image_path = state.generator.generate(&request).await?;

    let new_design = NewDesign {
        prompt: input.prompt,
        negative_prompt: input.negative_prompt,
        width: input.width,
        height: input.height,
        file_path: image_path.display().to_string(),
    };

    match DesignRepo::create(&state.pool, &new_design).await {
        Ok(design) => Ok((StatusCode::CREATED, Json(design))),
        Err(err) => {
            discard_image(&image_path).await;
            Err(err.into())
        }
    }
}

/// GET /designs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Design>> {
    let id = parse_design_id(&raw_id)?;
    let design = DesignRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(&raw_id))?;
    Ok(Json(design))
}

/// PUT /designs/{id}
///
/// Applies a partial update. `id` and `created_at` in the body are ignored.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Design>> {
    let id = parse_design_id(&raw_id)?;
    let Json(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let patch = deserialize_patch(&body)?;

    let design = if patch.is_empty() {
        tracing::debug!(%id, "Empty design update, returning stored record");
        DesignRepo::find_by_id(&state.pool, id).await?
    } else {
        DesignRepo::update(&state.pool, id, &patch).await?
    };
    let design = design.ok_or_else(|| not_found(&raw_id))?;
    Ok(Json(design))
}

/// DELETE /designs/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_design_id(&raw_id)?;
    if DesignRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&raw_id))
    }
}

/// GET /designs/search?prompt=
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Design>>> {
    let term = params.prompt.unwrap_or_default();
    let designs = DesignRepo::search(&state.pool, &term).await?;
    Ok(Json(designs))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validated body of `POST /designs`.
#[derive(Debug)]
struct CreateDesignInput {
    prompt: String,
    negative_prompt: String,
    width: i32,
    height: i32,
    steps: u32,
}

/// Only `prompt` is required. Dimensions default to 512x512, steps to 20,
/// and the negative prompt to empty.
fn parse_create_body(body: &Value) -> AppResult<CreateDesignInput> {
    let prompt = body
        .get(FIELD_PROMPT)
        .and_then(Value::as_str)
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Prompt is required".to_string()))?
        .to_string();

    let negative_prompt = match present(body, FIELD_NEGATIVE_PROMPT) {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            return Err(CoreError::Validation(
                "Invalid design: negative_prompt must be a string".to_string(),
            )
            .into())
        }
    };

    let width = optional_positive(body, FIELD_WIDTH)?.unwrap_or(DEFAULT_WIDTH);
    let height = optional_positive(body, FIELD_HEIGHT)?.unwrap_or(DEFAULT_HEIGHT);
    let steps = optional_positive(body, FIELD_STEPS)?
        .map(i32::unsigned_abs)
        .unwrap_or(DEFAULT_STEPS);

    Ok(CreateDesignInput {
        prompt,
        negative_prompt,
        width,
        height,
        steps,
    })
}

fn present<'a>(body: &'a Value, field: &str) -> Option<&'a Value> {
    body.get(field).filter(|v| !v.is_null())
}

fn optional_positive(body: &Value, field: &str) -> AppResult<Option<i32>> {
    Ok(present(body, field)
        .map(|v| coerce_dimension(field, v))
        .transpose()?)
}

/// Unparseable ids cannot match any stored design, so they are reported
/// as not found rather than as a bad request.
fn parse_design_id(raw: &str) -> AppResult<DbId> {
    DbId::parse_str(raw).map_err(|_| not_found(raw))
}

fn not_found(raw_id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Design",
        id: raw_id.to_string(),
    })
}

async fn discard_image(path: &FsPath) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove orphaned image");
    } else {
        tracing::info!(path = %path.display(), "Removed image of unsaved design");
    }
}
