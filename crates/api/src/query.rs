//! Query parameter types for API handlers.

use serde::Deserialize;

/// `?prompt=` parameter of `GET /designs/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub prompt: Option<String>,
}
