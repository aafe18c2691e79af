pub mod design;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /designs                    list, create
/// /designs/search?prompt=     case-insensitive prompt search
/// /designs/{id}               get, update, delete
/// ```
///
/// Mounted at the root: the dashboard addresses `/designs` directly.
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/designs", design::router())
}
