//! Route definitions for design records.

use axum::routing::get;
use axum::Router;

use crate::handlers::design;
use crate::state::AppState;

/// Routes mounted at `/designs`.
///
/// ```text
/// GET    /         -> list
/// POST   /         -> create
/// GET    /search   -> search
/// GET    /{id}     -> get_by_id
/// PUT    /{id}     -> update
/// DELETE /{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(design::list).post(design::create))
        .route("/search", get(design::search))
        .route(
            "/{id}",
            get(design::get_by_id)
                .put(design::update)
                .delete(design::delete),
        )
}
